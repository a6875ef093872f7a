//! Auth screen state: email/password sign-up and login plus OAuth hand-off.
//!
//! Flow Overview: `begin_*` validates locally and returns the request to send (or
//! `None` after setting an error message), the caller awaits
//! [`AuthRequest::send`], then hands the result to [`AuthForm::finish`]. The split
//! lets views keep the form in a signal and drop late results after unmount.
//! A successful OAuth start ends in [`AuthPhase::ExternalTransfer`], which has no
//! outgoing transitions: the browser is leaving the app.

use crate::app_lib::AppError;
use crate::features::auth::provider::IdentityProvider;
use crate::features::auth::types::{Credentials, OAuthProvider, SignUpOutcome};
use crate::features::flash::Flash;
use url::Url;

/// Minimum password length enforced before any request is made.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub const INVALID_EMAIL_MESSAGE: &str = "Enter a valid email address.";
pub const ACCOUNT_CREATED_MESSAGE: &str =
    "Account created. Check your email and verify, then log in.";
pub const SIGNED_IN_MESSAGE: &str = "Signed in.";
const AUTH_FAILED_MESSAGE: &str = "Authentication failed.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignUp,
    Login,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignUp => AuthMode::Login,
            AuthMode::Login => AuthMode::SignUp,
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            AuthMode::SignUp => "Create account",
            AuthMode::Login => "Login",
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            AuthMode::SignUp => "Switch to Login",
            AuthMode::Login => "Switch to Sign up",
        }
    }

    pub fn password_autocomplete(self) -> &'static str {
        match self {
            AuthMode::SignUp => "new-password",
            AuthMode::Login => "current-password",
        }
    }
}

/// Local validation failures. No request is made when one is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    InvalidEmail,
    PasswordTooShort,
}

impl ValidationError {
    pub fn message(self) -> String {
        match self {
            ValidationError::InvalidEmail => INVALID_EMAIL_MESSAGE.to_string(),
            ValidationError::PasswordTooShort => {
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters.")
            }
        }
    }
}

/// Trims and lowercases an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Checks the email and password and returns the normalized credentials.
///
/// # Errors
/// Returns the first rule the input breaks, email before password.
pub fn validate_credentials(email: &str, password: &str) -> Result<Credentials, ValidationError> {
    let email = normalize_email(email);
    if email.is_empty() || !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    // UTF-16 units, matching the length the browser reports for the input.
    if password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(Credentials {
        email,
        password: password.to_string(),
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    Editing,
    Submitting,
    /// The browser is navigating to the provider. Terminal.
    ExternalTransfer(Url),
}

/// One validated provider call.
#[derive(Clone, Debug)]
pub enum AuthRequest {
    SignUp {
        credentials: Credentials,
        email_redirect_to: String,
    },
    Login {
        credentials: Credentials,
    },
    OAuth {
        provider: OAuthProvider,
        redirect_to: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthSuccess {
    AccountCreated,
    SignedIn,
    Redirect(Url),
}

/// The outcome of [`AuthRequest::send`], tagged with what was attempted so
/// failures get the right fallback text.
#[derive(Clone, Debug)]
pub struct AuthResult {
    oauth: Option<OAuthProvider>,
    outcome: Result<AuthSuccess, AppError>,
}

impl AuthResult {
    pub fn outcome(&self) -> &Result<AuthSuccess, AppError> {
        &self.outcome
    }
}

impl AuthRequest {
    /// Performs the provider call. Never retries.
    pub async fn send<P>(self, provider: &P) -> AuthResult
    where
        P: IdentityProvider + ?Sized,
    {
        match self {
            AuthRequest::SignUp {
                credentials,
                email_redirect_to,
            } => AuthResult {
                oauth: None,
                outcome: provider
                    .sign_up(&credentials, &email_redirect_to)
                    .await
                    .map(|outcome| match outcome {
                        SignUpOutcome::ConfirmationSent => AuthSuccess::AccountCreated,
                        SignUpOutcome::SignedIn(_) => AuthSuccess::SignedIn,
                    }),
            },
            AuthRequest::Login { credentials } => AuthResult {
                oauth: None,
                outcome: provider
                    .sign_in_with_password(&credentials)
                    .await
                    .map(|_| AuthSuccess::SignedIn),
            },
            AuthRequest::OAuth {
                provider: oauth,
                redirect_to,
            } => AuthResult {
                oauth: Some(oauth),
                outcome: provider
                    .sign_in_with_oauth(oauth, &redirect_to)
                    .await
                    .map(AuthSuccess::Redirect),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    phase: AuthPhase,
    flash: Option<Flash>,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new(AuthMode::default())
    }
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            email: String::new(),
            password: String::new(),
            phase: AuthPhase::Editing,
            flash: None,
        }
    }

    pub fn phase(&self) -> &AuthPhase {
        &self.phase
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }

    /// True while a request is in flight or the browser is leaving.
    pub fn is_loading(&self) -> bool {
        !matches!(self.phase, AuthPhase::Editing)
    }

    pub fn toggle_mode(&mut self) {
        if !self.is_loading() {
            self.mode = self.mode.toggled();
        }
    }

    /// Validates the email/password form for the current mode.
    pub fn begin_submit(&mut self, callback_url: &str) -> Option<AuthRequest> {
        if self.is_loading() {
            return None;
        }
        self.flash = None;

        let credentials = match validate_credentials(&self.email, &self.password) {
            Ok(credentials) => credentials,
            Err(err) => {
                self.flash = Some(Flash::error(err.message()));
                return None;
            }
        };

        self.phase = AuthPhase::Submitting;
        Some(match self.mode {
            AuthMode::SignUp => AuthRequest::SignUp {
                credentials,
                email_redirect_to: callback_url.to_string(),
            },
            AuthMode::Login => AuthRequest::Login { credentials },
        })
    }

    /// Starts a redirect-based sign-in. No local validation applies.
    pub fn begin_oauth(&mut self, provider: OAuthProvider, callback_url: &str) -> Option<AuthRequest> {
        if self.is_loading() {
            return None;
        }
        self.flash = None;
        self.phase = AuthPhase::Submitting;
        Some(AuthRequest::OAuth {
            provider,
            redirect_to: callback_url.to_string(),
        })
    }

    /// Applies a provider result. Returns the URL to leave for after a
    /// successful OAuth start.
    pub fn finish(&mut self, result: AuthResult) -> Option<Url> {
        if self.phase != AuthPhase::Submitting {
            return None;
        }

        match result.outcome {
            Ok(AuthSuccess::AccountCreated) => {
                self.phase = AuthPhase::Editing;
                self.flash = Some(Flash::success(ACCOUNT_CREATED_MESSAGE));
                None
            }
            Ok(AuthSuccess::SignedIn) => {
                self.phase = AuthPhase::Editing;
                self.flash = Some(Flash::success(SIGNED_IN_MESSAGE));
                None
            }
            Ok(AuthSuccess::Redirect(url)) => {
                self.phase = AuthPhase::ExternalTransfer(url.clone());
                Some(url)
            }
            Err(err) => {
                tracing::warn!(error = %err, "authentication request failed");
                self.phase = AuthPhase::Editing;
                let message = err.user_message();
                let message = if message.trim().is_empty() {
                    match result.oauth {
                        Some(provider) => oauth_failed_message(provider),
                        None => AUTH_FAILED_MESSAGE.to_string(),
                    }
                } else {
                    message
                };
                self.flash = Some(Flash::error(message));
                None
            }
        }
    }

    /// Returns the form to editing when the browser could not leave for the
    /// provider. Does nothing unless a transfer was under way.
    pub fn transfer_failed(&mut self, provider: OAuthProvider) -> bool {
        if !matches!(self.phase, AuthPhase::ExternalTransfer(_)) {
            return false;
        }
        self.phase = AuthPhase::Editing;
        self.flash = Some(Flash::error(oauth_failed_message(provider)));
        true
    }

    /// Validates, sends, and applies the email/password form in one step.
    pub async fn submit<P>(&mut self, provider: &P, callback_url: &str) -> Option<Url>
    where
        P: IdentityProvider + ?Sized,
    {
        let request = self.begin_submit(callback_url)?;
        let result = request.send(provider).await;
        self.finish(result)
    }

    /// Starts, sends, and applies an OAuth sign-in in one step.
    pub async fn continue_with_oauth<P>(
        &mut self,
        provider: &P,
        oauth: OAuthProvider,
        callback_url: &str,
    ) -> Option<Url>
    where
        P: IdentityProvider + ?Sized,
    {
        let request = self.begin_oauth(oauth, callback_url)?;
        let result = request.send(provider).await;
        self.finish(result)
    }
}

fn oauth_failed_message(provider: OAuthProvider) -> String {
    format!("{} sign-in failed.", provider.label())
}
