use std::process::Command;

/// Variables read with `option_env!` in `src/lib/config.rs`.
const CONFIG_VARS: [&str; 9] = [
    "UNIFACE_SUPABASE_URL",
    "UNIFACE_SUPABASE_ANON_KEY",
    "UNIFACE_SITE_URL",
    "UNIFACE_WAITLIST_TABLE",
    "UNIFACE_WAITLIST_DOMAINS",
    "UNIFACE_WAITLIST_REJECTION_MESSAGE",
    "UNIFACE_OAUTH_PROVIDER",
    "UNIFACE_TRUST_OAUTH_SESSIONS",
    "UNIFACE_STORAGE_KEY",
];

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    for var in CONFIG_VARS {
        println!("cargo:rerun-if-env-changed={var}");
    }

    let sha = git_short_sha().unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=UNIFACE_WEB_GIT_SHA={sha}");
}

fn git_short_sha() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let sha = String::from_utf8(output.stdout).ok()?;
    let sha = sha.trim();
    (!sha.is_empty()).then(|| sha.to_string())
}
