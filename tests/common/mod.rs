#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Notify;
use uniface::app_lib::AppError;
use uniface::features::auth::events::SessionEvents;
use uniface::features::auth::provider::IdentityProvider;
use uniface::features::auth::types::{
    AppMetadata, AuthEvent, Credentials, OAuthProvider, Session, SignUpOutcome, User,
};
use uniface::features::waitlist::types::{WaitlistEntry, WaitlistStore};
use url::Url;

pub fn session(email: &str, confirmed: bool) -> Session {
    Session {
        access_token: "access".to_string(),
        token_type: "bearer".to_string(),
        expires_in: 3600,
        expires_at: None,
        refresh_token: "refresh".to_string(),
        user: User {
            id: format!("user-{email}"),
            email: Some(email.to_string()),
            email_confirmed_at: confirmed.then(|| "2024-01-01T00:00:00Z".to_string()),
            app_metadata: AppMetadata {
                provider: Some("email".to_string()),
                providers: vec!["email".to_string()],
            },
        },
    }
}

/// In-memory identity provider. Records every call and fails on demand.
#[derive(Default)]
pub struct FakeProvider {
    session: Mutex<Option<Session>>,
    session_error: Mutex<Option<AppError>>,
    next_error: Mutex<Option<AppError>>,
    calls: Mutex<Vec<&'static str>>,
    read_gate: Mutex<Option<Arc<Notify>>>,
    events: SessionEvents,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        let provider = Self::default();
        *provider.session.lock() = Some(session);
        provider
    }

    /// Makes `get_session` fail until cleared.
    pub fn fail_session_reads(&self, err: AppError) {
        *self.session_error.lock() = Some(err);
    }

    /// Holds every `get_session` call until the returned gate is notified.
    pub fn hold_session_reads(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.read_gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    /// Makes the next sign-up, sign-in, or OAuth call fail.
    pub fn fail_next(&self, err: AppError) {
        *self.next_error.lock() = Some(err);
    }

    /// Replaces the session and reports it, as the provider does on sign-in.
    pub fn push(&self, event: AuthEvent, session: Option<Session>) {
        *self.session.lock() = session.clone();
        self.events.emit(event, session.as_ref());
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    fn record(&self, call: &'static str) -> Result<(), AppError> {
        self.calls.lock().push(call);
        match self.next_error.lock().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for FakeProvider {
    async fn get_session(&self) -> Result<Option<Session>, AppError> {
        self.calls.lock().push("get_session");
        let gate = self.read_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(err) = self.session_error.lock().clone() {
            return Err(err);
        }
        Ok(self.session.lock().clone())
    }

    fn events(&self) -> &SessionEvents {
        &self.events
    }

    async fn sign_up(
        &self,
        _credentials: &Credentials,
        _email_redirect_to: &str,
    ) -> Result<SignUpOutcome, AppError> {
        self.record("sign_up")?;
        Ok(SignUpOutcome::ConfirmationSent)
    }

    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<Session, AppError> {
        self.record("sign_in_with_password")?;
        let session = session(&credentials.email, true);
        self.push(AuthEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> Result<Url, AppError> {
        self.record("sign_in_with_oauth")?;
        let mut url = Url::parse("https://project.supabase.co/auth/v1/authorize").expect("url");
        url.query_pairs_mut()
            .append_pair("provider", provider.as_str())
            .append_pair("redirect_to", redirect_to);
        Ok(url)
    }

    async fn get_user(&self) -> Result<User, AppError> {
        self.calls.lock().push("get_user");
        self.session
            .lock()
            .as_ref()
            .map(|session| session.user.clone())
            .ok_or_else(|| AppError::Provider {
                status: 401,
                message: "Auth session missing!".to_string(),
            })
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        self.calls.lock().push("sign_out");
        self.push(AuthEvent::SignedOut, None);
        Ok(())
    }
}

/// In-memory waitlist table.
#[derive(Default)]
pub struct FakeStore {
    rows: Mutex<Vec<WaitlistEntry>>,
    failure: Mutex<Option<AppError>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(err: AppError) -> Self {
        let store = Self::default();
        *store.failure.lock() = Some(err);
        store
    }

    pub fn rows(&self) -> Vec<WaitlistEntry> {
        self.rows.lock().clone()
    }
}

#[async_trait(?Send)]
impl WaitlistStore for FakeStore {
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), AppError> {
        if let Some(err) = self.failure.lock().clone() {
            return Err(err);
        }
        self.rows.lock().push(entry.clone());
        Ok(())
    }
}
