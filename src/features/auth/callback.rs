//! OAuth and email-confirmation landing pad logic. The provider appends the new
//! session to the callback URL fragment; the browser client reads it once, then
//! the pad sends the user on. Fragment values are tokens and must never be logged.

use crate::app_lib::AppError;
use crate::features::auth::types::Session;
use crate::routes::paths;
use url::form_urlencoded;

/// Token bundle carried in `#access_token=...&refresh_token=...`.
#[derive(Clone, PartialEq, Eq)]
pub struct FragmentTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub expires_at: Option<i64>,
    /// `signup`, `recovery`, `magiclink`... when the link came from an email.
    pub kind: Option<String>,
}

impl std::fmt::Debug for FragmentTokens {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FragmentTokens")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Parses a URL fragment (with or without the leading `#`).
///
/// Returns `Ok(None)` when the fragment carries no session.
///
/// # Errors
/// Returns `AppError::Provider` when the provider reported an error in the
/// fragment, and `AppError::Parse` when a session is present but incomplete.
pub fn parse_fragment(fragment: &str) -> Result<Option<FragmentTokens>, AppError> {
    let fragment = fragment.trim_start_matches('#');
    if fragment.is_empty() {
        return Ok(None);
    }

    let mut access_token = None;
    let mut refresh_token = None;
    let mut token_type = None;
    let mut expires_in = None;
    let mut expires_at = None;
    let mut kind = None;
    let mut error = None;
    let mut error_description = None;

    for (key, value) in form_urlencoded::parse(fragment.as_bytes()) {
        let value = value.into_owned();
        match key.as_ref() {
            "access_token" => access_token = Some(value),
            "refresh_token" => refresh_token = Some(value),
            "token_type" => token_type = Some(value),
            "expires_in" => expires_in = value.parse::<u64>().ok(),
            "expires_at" => expires_at = value.parse::<i64>().ok(),
            "type" => kind = Some(value),
            "error" => error = Some(value),
            "error_description" => error_description = Some(value),
            _ => {}
        }
    }

    if error.is_some() || error_description.is_some() {
        let message = error_description
            .or(error)
            .unwrap_or_else(|| "Sign-in failed.".to_string());
        return Err(AppError::Provider {
            status: 400,
            message,
        });
    }

    let Some(access_token) = access_token else {
        return Ok(None);
    };
    let refresh_token = refresh_token
        .ok_or_else(|| AppError::Parse("Callback is missing the refresh token.".to_string()))?;

    Ok(Some(FragmentTokens {
        access_token,
        refresh_token,
        token_type: token_type.unwrap_or_else(|| "bearer".to_string()),
        expires_in: expires_in.unwrap_or(3600),
        expires_at,
        kind,
    }))
}

/// True when the fragment holds a session hand-off or a provider error, keyed by
/// parameter name. Plain anchors such as `#error-codes` are left alone.
pub fn carries_callback_params(fragment: &str) -> bool {
    form_urlencoded::parse(fragment.trim_start_matches('#').as_bytes()).any(|(key, _)| {
        matches!(
            key.as_ref(),
            "access_token" | "refresh_token" | "error" | "error_description"
        )
    })
}

/// Where the callback pad sends the user once the session read finished.
pub fn callback_target(session: Option<&Session>) -> &'static str {
    if session.is_some() {
        paths::DASHBOARD
    } else {
        paths::AUTH
    }
}
