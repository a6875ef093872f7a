use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    /// The provider answered with a non-success status. `message` is the
    /// provider's own text and is shown to users as is.
    #[error("Request failed ({status}): {message}")]
    Provider { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Text rendered in alerts. Provider messages pass through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Provider { message, .. } | AppError::Config(message) => message.clone(),
            _ => self.to_string(),
        }
    }

    /// True when the provider received the request and rejected it, as opposed
    /// to the request never completing or the answer being unreadable.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, AppError::Provider { .. })
    }

    /// True when the provider refused a token grant outright. Only this ends a
    /// stored session; transport and decode failures leave it in place.
    pub fn is_grant_rejection(&self) -> bool {
        matches!(self, AppError::Provider { status: 400 | 401, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_message_is_shown_verbatim() {
        let err = AppError::Provider {
            status: 400,
            message: "Invalid login credentials".to_string(),
        };
        assert_eq!(err.user_message(), "Invalid login credentials");
        assert!(err.is_provider_failure());
        assert_eq!(
            err.to_string(),
            "Request failed (400): Invalid login credentials"
        );
    }

    #[test]
    fn transport_errors_keep_their_prefix() {
        let err = AppError::Network("Unable to reach the server: offline".to_string());
        assert_eq!(
            err.user_message(),
            "Network error: Unable to reach the server: offline"
        );
        assert!(!err.is_provider_failure());
    }

    #[test]
    fn only_provider_refusals_reject_a_grant() {
        let refused = AppError::Provider {
            status: 400,
            message: "Invalid Refresh Token: Already Used".to_string(),
        };
        assert!(refused.is_grant_rejection());
        assert!(
            AppError::Provider {
                status: 401,
                message: "invalid JWT".to_string()
            }
            .is_grant_rejection()
        );

        assert!(
            !AppError::Provider {
                status: 503,
                message: "upstream unavailable".to_string()
            }
            .is_grant_rejection()
        );
        assert!(!AppError::Network("offline".to_string()).is_grant_rejection());
        assert!(!AppError::Parse("truncated body".to_string()).is_grant_rejection());
    }
}
