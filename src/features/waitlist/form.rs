//! Waitlist form state. Validation runs before any write; a passing form issues
//! exactly one insert and reports the result as a flash. Fields are cleared only
//! after the write succeeded, so a failed attempt can be resubmitted as is.

use crate::app_lib::AppError;
use crate::features::auth::form::normalize_email;
use crate::features::flash::Flash;
use crate::features::waitlist::policy::EmailDomainPolicy;
use crate::features::waitlist::types::{WaitlistEntry, WaitlistStore};

pub const MISSING_NAME_MESSAGE: &str = "Please enter your name.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const SAVED_MESSAGE: &str = "Saved. Now create your account to continue.";
pub const SAVE_FAILED_MESSAGE: &str = "Could not save your request. Please try again.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected error. Try again later.";

/// Checks the raw inputs and returns the row to store.
///
/// # Errors
/// Returns the message to show for the first failing rule: name, email shape,
/// then the domain policy.
pub fn validate_entry(
    full_name: &str,
    email: &str,
    field: &str,
    policy: &EmailDomainPolicy,
) -> Result<WaitlistEntry, String> {
    let full_name = full_name.trim();
    if full_name.is_empty() {
        return Err(MISSING_NAME_MESSAGE.to_string());
    }

    let email = normalize_email(email);
    if email.is_empty() || !email.contains('@') {
        return Err(INVALID_EMAIL_MESSAGE.to_string());
    }
    if !policy.permits(&email) {
        return Err(policy.rejection_message().to_string());
    }

    Ok(WaitlistEntry {
        full_name: full_name.to_string(),
        email,
        field: field.trim().to_string(),
    })
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WaitlistForm {
    pub full_name: String,
    pub email: String,
    pub field: String,
    loading: bool,
    flash: Option<Flash>,
}

impl WaitlistForm {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }

    /// Validates and, on success, marks the form as submitting.
    pub fn begin_submit(&mut self, policy: &EmailDomainPolicy) -> Option<WaitlistEntry> {
        if self.loading {
            return None;
        }
        self.flash = None;

        match validate_entry(&self.full_name, &self.email, &self.field, policy) {
            Ok(entry) => {
                self.loading = true;
                Some(entry)
            }
            Err(message) => {
                self.flash = Some(Flash::error(message));
                None
            }
        }
    }

    /// Applies the insert result and always clears the loading flag.
    pub fn finish(&mut self, result: Result<(), AppError>) {
        self.loading = false;
        match result {
            Ok(()) => {
                self.flash = Some(Flash::success(SAVED_MESSAGE));
                self.full_name.clear();
                self.email.clear();
                self.field.clear();
            }
            Err(err) if err.is_provider_failure() => {
                tracing::error!(error = %err, "waitlist insert rejected");
                self.flash = Some(Flash::error(SAVE_FAILED_MESSAGE));
            }
            Err(err) => {
                tracing::error!(error = %err, "waitlist insert failed");
                self.flash = Some(Flash::error(UNEXPECTED_ERROR_MESSAGE));
            }
        }
    }

    /// Validates, writes, and applies the result in one step.
    pub async fn submit<S>(&mut self, store: &S, policy: &EmailDomainPolicy)
    where
        S: WaitlistStore + ?Sized,
    {
        let Some(entry) = self.begin_submit(policy) else {
            return;
        };
        let result = store.insert(&entry).await;
        self.finish(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(name: &str, email: &str, field: &str) -> WaitlistForm {
        WaitlistForm {
            full_name: name.to_string(),
            email: email.to_string(),
            field: field.to_string(),
            ..WaitlistForm::default()
        }
    }

    #[test]
    fn blank_name_is_rejected_first() {
        let err = validate_entry("   ", "no-at-sign", "", &EmailDomainPolicy::open())
            .expect_err("rejected");
        assert_eq!(err, MISSING_NAME_MESSAGE);
    }

    #[test]
    fn email_without_at_is_rejected() {
        let err = validate_entry("Ada", "ada.example.org", "", &EmailDomainPolicy::open())
            .expect_err("rejected");
        assert_eq!(err, INVALID_EMAIL_MESSAGE);
    }

    #[test]
    fn domain_policy_rejects_other_domains() {
        let policy = EmailDomainPolicy::restricted(["@ada.edu.az"]);
        let err = validate_entry("Ada", "ada@gmail.com", "Math", &policy).expect_err("rejected");
        assert_eq!(err, policy.rejection_message());
    }

    #[test]
    fn entry_values_are_trimmed_and_email_lowercased() {
        let entry = validate_entry(
            "  Ada Lovelace ",
            " Ada@ADA.edu.az ",
            " Math ",
            &EmailDomainPolicy::restricted(["@ada.edu.az"]),
        )
        .expect("valid");
        assert_eq!(entry.full_name, "Ada Lovelace");
        assert_eq!(entry.email, "ada@ada.edu.az");
        assert_eq!(entry.field, "Math");
    }

    #[test]
    fn success_clears_fields() {
        let mut form = filled("Ada", "ada@ada.edu.az", "Math");
        assert!(form.begin_submit(&EmailDomainPolicy::open()).is_some());
        assert!(form.is_loading());

        form.finish(Ok(()));

        assert!(!form.is_loading());
        assert_eq!(form.flash(), Some(&Flash::success(SAVED_MESSAGE)));
        assert!(form.full_name.is_empty() && form.email.is_empty() && form.field.is_empty());
    }

    #[test]
    fn provider_failure_keeps_fields() {
        let mut form = filled("Ada", "ada@ada.edu.az", "Math");
        form.begin_submit(&EmailDomainPolicy::open());

        form.finish(Err(AppError::Provider {
            status: 409,
            message: "duplicate key value".to_string(),
        }));

        assert!(!form.is_loading());
        assert_eq!(form.flash(), Some(&Flash::error(SAVE_FAILED_MESSAGE)));
        assert_eq!(form.email, "ada@ada.edu.az");
    }

    #[test]
    fn transport_failure_uses_generic_message() {
        let mut form = filled("Ada", "ada@ada.edu.az", "Math");
        form.begin_submit(&EmailDomainPolicy::open());

        form.finish(Err(AppError::Network("offline".to_string())));

        assert_eq!(form.flash(), Some(&Flash::error(UNEXPECTED_ERROR_MESSAGE)));
        assert_eq!(form.full_name, "Ada");
    }

    #[test]
    fn submit_is_ignored_while_loading() {
        let mut form = filled("Ada", "ada@ada.edu.az", "Math");
        assert!(form.begin_submit(&EmailDomainPolicy::open()).is_some());
        assert!(form.begin_submit(&EmailDomainPolicy::open()).is_none());
    }
}
