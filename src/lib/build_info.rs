//! Build metadata baked in by `build.rs`.

/// Short commit hash of the build, `unknown` outside a git checkout.
pub fn git_commit_hash() -> &'static str {
    match option_env!("UNIFACE_WEB_GIT_SHA") {
        Some(value) if !value.trim().is_empty() => value,
        _ => "unknown",
    }
}

/// Footer label: crate version plus commit.
pub fn build_label() -> String {
    format!("v{} ({})", env!("CARGO_PKG_VERSION"), git_commit_hash())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_carries_version_and_commit() {
        let label = build_label();
        assert!(label.starts_with(&format!("v{}", env!("CARGO_PKG_VERSION"))));
        assert!(label.ends_with(&format!("({})", git_commit_hash())));
    }
}
