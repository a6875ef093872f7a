//! Email-domain allow-list for the waitlist. Beta builds restrict sign-ups to
//! institutional addresses; open builds accept any address.

pub const DEFAULT_REJECTION_MESSAGE: &str = "For the beta, please use your ADA university email.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmailDomainPolicy {
    /// Lowercased suffixes, each starting with `@`. Empty means open.
    suffixes: Vec<String>,
    rejection_message: Option<String>,
}

impl EmailDomainPolicy {
    pub fn open() -> Self {
        Self::default()
    }

    /// Accepts addresses ending in any of `suffixes`. A bare domain such as
    /// `ada.edu.az` is treated as `@ada.edu.az`.
    pub fn restricted<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = suffixes
            .into_iter()
            .map(|suffix| suffix.as_ref().trim().to_lowercase())
            .filter(|suffix| !suffix.is_empty() && suffix != "@")
            .map(|suffix| {
                if suffix.starts_with('@') {
                    suffix
                } else {
                    format!("@{suffix}")
                }
            })
            .collect();
        Self {
            suffixes,
            rejection_message: None,
        }
    }

    /// Parses a comma separated suffix list as found in configuration.
    pub fn from_list(list: &str) -> Self {
        Self::restricted(list.split(','))
    }

    #[must_use]
    pub fn with_rejection_message(mut self, message: impl Into<String>) -> Self {
        self.rejection_message = Some(message.into());
        self
    }

    pub fn is_open(&self) -> bool {
        self.suffixes.is_empty()
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Checks an already normalized (trimmed, lowercased) address.
    pub fn permits(&self, email: &str) -> bool {
        self.is_open() || self.suffixes.iter().any(|suffix| email.ends_with(suffix.as_str()))
    }

    pub fn rejection_message(&self) -> &str {
        self.rejection_message
            .as_deref()
            .unwrap_or(DEFAULT_REJECTION_MESSAGE)
    }

    /// Placeholder for the email input, hinting at the accepted domain.
    pub fn email_placeholder(&self) -> String {
        match self.suffixes.first() {
            Some(suffix) => format!("name{suffix}"),
            None => "name@gmail.com".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_policy_permits_everything() {
        let policy = EmailDomainPolicy::from_list("");
        assert!(policy.is_open());
        assert!(policy.permits("someone@gmail.com"));
    }

    #[test]
    fn restricted_policy_checks_suffix() {
        let policy = EmailDomainPolicy::from_list(" ADA.edu.az , @example.org");
        assert_eq!(policy.suffixes(), ["@ada.edu.az", "@example.org"]);
        assert!(policy.permits("ada@ada.edu.az"));
        assert!(policy.permits("x@example.org"));
        assert!(!policy.permits("ada@gmail.com"));
        // The suffix must match at the domain boundary.
        assert!(!policy.permits("ada@notada.edu.az"));
    }

    #[test]
    fn rejection_message_is_configurable() {
        let policy = EmailDomainPolicy::restricted(["@ada.edu.az"]);
        assert_eq!(policy.rejection_message(), DEFAULT_REJECTION_MESSAGE);

        let policy = policy.with_rejection_message("Use your campus address.");
        assert_eq!(policy.rejection_message(), "Use your campus address.");
    }

    #[test]
    fn placeholder_follows_first_suffix() {
        assert_eq!(
            EmailDomainPolicy::from_list("@ada.edu.az").email_placeholder(),
            "name@ada.edu.az"
        );
        assert_eq!(EmailDomainPolicy::open().email_placeholder(), "name@gmail.com");
    }
}
