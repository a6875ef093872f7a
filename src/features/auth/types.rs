//! Request and response types for the identity provider. Sessions carry access
//! and refresh tokens, so their `Debug` output redacts them and they must never be
//! logged in full.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppMetadata {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub providers: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Null until the user follows the confirmation link.
    #[serde(default)]
    pub email_confirmed_at: Option<String>,
    #[serde(default)]
    pub app_metadata: AppMetadata,
}

impl User {
    /// Provider that created the identity, `email` for password accounts.
    pub fn sign_in_provider(&self) -> &str {
        self.app_metadata.provider.as_deref().unwrap_or("email")
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    /// Unix seconds. Older token responses omit it; see [`Session::stamp_expiry`].
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub refresh_token: String,
    pub user: User,
}

impl Session {
    pub fn email(&self) -> Option<&str> {
        self.user.email.as_deref()
    }

    pub fn is_email_confirmed(&self) -> bool {
        self.user.email_confirmed_at.is_some()
    }

    /// True when the session came from a third-party identity provider.
    pub fn is_oauth(&self) -> bool {
        self.user.sign_in_provider() != "email"
    }

    /// Fills `expires_at` from `expires_in` when the provider left it out.
    pub fn stamp_expiry(&mut self, now_secs: i64) {
        if self.expires_at.is_none() {
            let lifetime = i64::try_from(self.expires_in).unwrap_or(i64::MAX);
            self.expires_at = Some(now_secs.saturating_add(lifetime));
        }
    }

    /// True when the access token expires within `margin_secs` of `now_secs`.
    pub fn expires_within(&self, now_secs: i64, margin_secs: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at.saturating_sub(now_secs) <= margin_secs,
            None => false,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .field("refresh_token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Changes reported by the provider client, in the order they happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Github,
}

impl OAuthProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Github => "github",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OAuthProvider::Google => "Google",
            OAuthProvider::Github => "GitHub",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "google" => Some(OAuthProvider::Google),
            "github" => Some(OAuthProvider::Github),
            _ => None,
        }
    }
}

/// Validated email/password pair. Only produced by form validation.
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Serialize)]
pub struct RefreshTokenRequest<'a> {
    pub refresh_token: &'a str,
}

/// Sign-up answers with a session when email confirmation is disabled on the
/// project and with the bare user otherwise.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(Session),
    User(User),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The account exists but must be confirmed by email first.
    ConfirmationSent,
    SignedIn(Session),
}

/// Error body shapes used by the auth and rest endpoints.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProviderErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ProviderErrorBody {
    pub fn into_message(self) -> Option<String> {
        [self.error_description, self.msg, self.message, self.error]
            .into_iter()
            .flatten()
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_json() -> &'static str {
        r#"{
            "access_token": "eyJhbGciOi",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 1700003600,
            "refresh_token": "r-123",
            "user": {
                "id": "7b0c",
                "email": "ada@ada.edu.az",
                "email_confirmed_at": "2024-01-02T03:04:05Z",
                "app_metadata": { "provider": "email", "providers": ["email"] },
                "aud": "authenticated"
            }
        }"#
    }

    #[test]
    fn session_deserializes_token_response() {
        let session: Session = serde_json::from_str(session_json()).expect("session");
        assert_eq!(session.email(), Some("ada@ada.edu.az"));
        assert!(session.is_email_confirmed());
        assert!(!session.is_oauth());
        assert!(session.expires_within(1_700_003_590, 30));
        assert!(!session.expires_within(1_700_000_000, 30));
    }

    #[test]
    fn corrupt_expiry_counts_as_expiring() {
        let mut session: Session = serde_json::from_str(session_json()).expect("session");
        session.expires_at = Some(i64::MIN);
        assert!(session.expires_within(1_700_000_000, 30));
        assert!(session.expires_within(i64::MAX, 30));

        session.expires_at = Some(i64::MAX);
        assert!(!session.expires_within(i64::MIN, 30));
    }

    #[test]
    fn session_debug_redacts_tokens() {
        let session: Session = serde_json::from_str(session_json()).expect("session");
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("eyJhbGciOi"));
        assert!(!rendered.contains("r-123"));
        assert!(rendered.contains("ada@ada.edu.az"));
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let credentials = Credentials {
            email: "ada@ada.edu.az".to_string(),
            password: "hunter2hunter2".to_string(),
        };
        assert!(!format!("{credentials:?}").contains("hunter2"));
    }

    #[test]
    fn stamp_expiry_only_fills_missing_value() {
        let mut session: Session = serde_json::from_str(session_json()).expect("session");
        session.stamp_expiry(0);
        assert_eq!(session.expires_at, Some(1_700_003_600));

        session.expires_at = None;
        session.stamp_expiry(100);
        assert_eq!(session.expires_at, Some(3_700));
    }

    #[test]
    fn sign_up_response_distinguishes_user_from_session() {
        let user_only = r#"{ "id": "7b0c", "email": "ada@ada.edu.az", "email_confirmed_at": null }"#;
        let parsed: SignUpResponse = serde_json::from_str(user_only).expect("user");
        assert!(matches!(parsed, SignUpResponse::User(_)));

        let parsed: SignUpResponse = serde_json::from_str(session_json()).expect("session");
        assert!(matches!(parsed, SignUpResponse::Session(_)));
    }

    #[test]
    fn provider_error_body_prefers_description() {
        let body: ProviderErrorBody = serde_json::from_str(
            r#"{ "error": "invalid_grant", "error_description": "Invalid login credentials" }"#,
        )
        .expect("body");
        assert_eq!(
            body.into_message(),
            Some("Invalid login credentials".to_string())
        );

        let body: ProviderErrorBody =
            serde_json::from_str(r#"{ "code": 422, "msg": "User already registered" }"#)
                .expect("body");
        assert_eq!(body.into_message(), Some("User already registered".to_string()));

        let body = ProviderErrorBody::default();
        assert_eq!(body.into_message(), None);
    }

    #[test]
    fn oauth_provider_parses_config_values() {
        assert_eq!(OAuthProvider::parse(" Google "), Some(OAuthProvider::Google));
        assert_eq!(OAuthProvider::parse("github"), Some(OAuthProvider::Github));
        assert_eq!(OAuthProvider::parse("myspace"), None);
    }
}
