//! Session lookups for screens. Lookups never fail from the caller's point of view:
//! provider errors are logged and read as "no session", which keeps guards and the
//! callback pad on a single code path.

use crate::app_lib::AppError;
use crate::features::auth::events::Subscription;
use crate::features::auth::provider::IdentityProvider;
use crate::features::auth::types::{AuthEvent, Session};
use std::sync::Arc;

/// Rules for treating a session as verified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerificationPolicy {
    /// OAuth sessions pass without an email confirmation timestamp.
    pub trust_oauth_sessions: bool,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            trust_oauth_sessions: true,
        }
    }
}

impl VerificationPolicy {
    pub fn is_verified(self, session: Option<&Session>) -> bool {
        match session {
            Some(session) => {
                session.is_email_confirmed() || (self.trust_oauth_sessions && session.is_oauth())
            }
            None => false,
        }
    }
}

/// Shared handle over the identity provider, provided to screens through context.
#[derive(Clone)]
pub struct SessionResolver {
    provider: Arc<dyn IdentityProvider>,
    policy: VerificationPolicy,
}

impl SessionResolver {
    pub fn new(provider: Arc<dyn IdentityProvider>, policy: VerificationPolicy) -> Self {
        Self { provider, policy }
    }

    pub fn provider(&self) -> &dyn IdentityProvider {
        self.provider.as_ref()
    }

    pub fn policy(&self) -> VerificationPolicy {
        self.policy
    }

    /// Current session, or `None` when there is none or the lookup failed.
    pub async fn current_session(&self) -> Option<Session> {
        match self.provider.get_session().await {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(error = %err, "session lookup failed; treating as signed out");
                None
            }
        }
    }

    /// Calls `on_change` for every later session change until the handle is released.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(AuthEvent, Option<Session>) + Send + Sync + 'static,
    {
        self.provider.events().subscribe(on_change)
    }

    pub fn is_verified(&self, session: Option<&Session>) -> bool {
        self.policy.is_verified(session)
    }

    /// Email of the signed-in user, or `None` when it cannot be loaded.
    pub async fn current_user_email(&self) -> Option<String> {
        match self.provider.get_user().await {
            Ok(user) => user.email,
            Err(err) => {
                tracing::warn!(error = %err, "user lookup failed");
                None
            }
        }
    }

    /// Ends the session. Subscribers observe `SignedOut`.
    ///
    /// # Errors
    /// Returns the provider error when the sign-out request fails.
    pub async fn sign_out(&self) -> Result<(), AppError> {
        self.provider.sign_out().await
    }
}
