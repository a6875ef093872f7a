//! The contract between screens and the hosted identity service. Screens receive
//! an implementation through context, so tests can swap in an in-memory fake.

use crate::app_lib::AppError;
use crate::features::auth::events::SessionEvents;
use crate::features::auth::types::{Credentials, OAuthProvider, Session, SignUpOutcome, User};
use async_trait::async_trait;
use url::Url;

#[async_trait(?Send)]
pub trait IdentityProvider: Send + Sync {
    /// Current session, refreshed first when it is about to expire.
    async fn get_session(&self) -> Result<Option<Session>, AppError>;

    /// Change notifications for the session returned by [`Self::get_session`].
    fn events(&self) -> &SessionEvents;

    /// Creates an account. `email_redirect_to` is where the confirmation link lands.
    async fn sign_up(
        &self,
        credentials: &Credentials,
        email_redirect_to: &str,
    ) -> Result<SignUpOutcome, AppError>;

    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<Session, AppError>;

    /// Prepares a redirect-based sign-in and returns the page the browser must
    /// leave for. Nothing after the hand-off runs in this app instance.
    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> Result<Url, AppError>;

    async fn get_user(&self) -> Result<User, AppError>;

    async fn sign_out(&self) -> Result<(), AppError>;
}
