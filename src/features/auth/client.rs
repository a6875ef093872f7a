//! Browser client for the Supabase auth endpoints. It keeps the current session in
//! memory and in `localStorage`, refreshes it shortly before expiry, picks up
//! sessions handed over in the callback URL fragment, and reports every change on
//! its [`SessionEvents`] hub. Tokens pass through here and must never be logged.

use crate::{
    app_lib::{
        AppError,
        api::{Headers, build_url_with_base, get_json, post_empty, post_json},
        config::AppConfig,
    },
    features::auth::{
        callback::{FragmentTokens, carries_callback_params, parse_fragment},
        events::SessionEvents,
        provider::IdentityProvider,
        storage,
        types::{
            AuthEvent, Credentials, OAuthProvider, RefreshTokenRequest, Session, SignUpOutcome,
            SignUpResponse, User,
        },
    },
};
use async_trait::async_trait;
use parking_lot::Mutex;
use url::Url;

/// Sessions expiring within this many seconds are refreshed before use.
const EXPIRY_MARGIN_SECS: i64 = 30;

pub struct SupabaseAuth {
    base_url: String,
    anon_key: String,
    storage_key: String,
    events: SessionEvents,
    current: Mutex<Option<Session>>,
    initialized: futures::lock::Mutex<bool>,
    /// Held for the whole refresh so concurrent readers share one grant.
    refreshing: futures::lock::Mutex<()>,
}

impl SupabaseAuth {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.supabase_url.trim().to_string(),
            anon_key: config.supabase_anon_key.trim().to_string(),
            storage_key: config.session_storage_key(),
            events: SessionEvents::new(),
            current: Mutex::new(None),
            initialized: futures::lock::Mutex::new(false),
            refreshing: futures::lock::Mutex::new(()),
        }
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, AppError> {
        let mut url = Url::parse(&build_url_with_base(
            &self.base_url,
            &format!("/auth/v1{path}"),
        ))
        .map_err(|err| AppError::Config(format!("Supabase URL is invalid: {err}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn headers(&self, access_token: Option<&str>) -> Headers {
        let bearer = access_token.unwrap_or(&self.anon_key);
        vec![
            ("apikey", self.anon_key.clone()),
            ("Authorization", format!("Bearer {bearer}")),
        ]
    }

    /// Loads the stored session and the URL fragment hand-off exactly once.
    /// Concurrent callers wait for the first one to finish.
    async fn ensure_initialized(&self) {
        let mut initialized = self.initialized.lock().await;
        if *initialized {
            return;
        }
        *initialized = true;

        match storage::load(&self.storage_key) {
            Ok(stored) => *self.current.lock() = stored,
            Err(err) => tracing::warn!(error = %err, "stored session unavailable"),
        }

        match take_url_fragment().as_deref().map(parse_fragment) {
            Some(Ok(Some(tokens))) => match self.session_from_fragment(tokens).await {
                Ok(session) => self.store(session, AuthEvent::SignedIn),
                Err(err) => tracing::warn!(error = %err, "callback session could not be loaded"),
            },
            Some(Err(err)) => tracing::warn!(error = %err, "provider reported a sign-in error"),
            Some(Ok(None)) | None => {}
        }

        let current = self.current.lock().clone();
        self.events.emit(AuthEvent::InitialSession, current.as_ref());
    }

    async fn session_from_fragment(&self, tokens: FragmentTokens) -> Result<Session, AppError> {
        let user: User = get_json(
            self.endpoint("/user", &[])?.as_str(),
            &self.headers(Some(&tokens.access_token)),
        )
        .await?;
        let mut session = Session {
            access_token: tokens.access_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
            expires_at: tokens.expires_at,
            refresh_token: tokens.refresh_token,
            user,
        };
        session.stamp_expiry(now_secs());
        Ok(session)
    }

    async fn refresh(&self, session: &Session) -> Result<Session, AppError> {
        let mut refreshed: Session = post_json(
            self.endpoint("/token", &[("grant_type", "refresh_token")])?
                .as_str(),
            &RefreshTokenRequest {
                refresh_token: &session.refresh_token,
            },
            &self.headers(None),
        )
        .await?;
        refreshed.stamp_expiry(now_secs());
        self.store(refreshed.clone(), AuthEvent::TokenRefreshed);
        Ok(refreshed)
    }

    fn needs_refresh(&self) -> bool {
        self.current
            .lock()
            .as_ref()
            .is_some_and(|session| session.expires_within(now_secs(), EXPIRY_MARGIN_SECS))
    }

    fn store(&self, session: Session, event: AuthEvent) {
        if let Err(err) = storage::save(&self.storage_key, &session) {
            tracing::warn!(error = %err, "session kept in memory only");
        }
        *self.current.lock() = Some(session.clone());
        self.events.emit(event, Some(&session));
    }

    fn forget(&self) {
        if let Err(err) = storage::clear(&self.storage_key) {
            tracing::warn!(error = %err, "stored session could not be cleared");
        }
        *self.current.lock() = None;
        self.events.emit(AuthEvent::SignedOut, None);
    }
}

#[async_trait(?Send)]
impl IdentityProvider for SupabaseAuth {
    async fn get_session(&self) -> Result<Option<Session>, AppError> {
        self.ensure_initialized().await;

        if !self.needs_refresh() {
            return Ok(self.current.lock().clone());
        }

        let _refreshing = self.refreshing.lock().await;
        // Another caller may have refreshed or signed out while we waited.
        let current = self.current.lock().clone();
        match current {
            Some(session) if session.expires_within(now_secs(), EXPIRY_MARGIN_SECS) => {
                match self.refresh(&session).await {
                    Ok(refreshed) => Ok(Some(refreshed)),
                    Err(err) if err.is_grant_rejection() => {
                        tracing::warn!(error = %err, "refresh token rejected, signing out");
                        self.forget();
                        Err(err)
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "session refresh failed, keeping stored session");
                        Err(err)
                    }
                }
            }
            other => Ok(other),
        }
    }

    fn events(&self) -> &SessionEvents {
        &self.events
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        email_redirect_to: &str,
    ) -> Result<SignUpOutcome, AppError> {
        let url = self.endpoint("/signup", &[("redirect_to", email_redirect_to)])?;
        let response: SignUpResponse =
            post_json(url.as_str(), credentials, &self.headers(None)).await?;

        match response {
            SignUpResponse::Session(mut session) => {
                session.stamp_expiry(now_secs());
                self.store(session.clone(), AuthEvent::SignedIn);
                Ok(SignUpOutcome::SignedIn(session))
            }
            SignUpResponse::User(_) => Ok(SignUpOutcome::ConfirmationSent),
        }
    }

    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<Session, AppError> {
        let url = self.endpoint("/token", &[("grant_type", "password")])?;
        let mut session: Session = post_json(url.as_str(), credentials, &self.headers(None)).await?;
        session.stamp_expiry(now_secs());
        self.store(session.clone(), AuthEvent::SignedIn);
        Ok(session)
    }

    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> Result<Url, AppError> {
        self.endpoint(
            "/authorize",
            &[("provider", provider.as_str()), ("redirect_to", redirect_to)],
        )
    }

    async fn get_user(&self) -> Result<User, AppError> {
        let session = self.get_session().await?.ok_or_else(|| AppError::Provider {
            status: 401,
            message: "Auth session missing!".to_string(),
        })?;
        get_json(
            self.endpoint("/user", &[])?.as_str(),
            &self.headers(Some(&session.access_token)),
        )
        .await
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        self.ensure_initialized().await;

        let current = self.current.lock().clone();
        let result = match current {
            Some(session) => match self.endpoint("/logout", &[]) {
                Ok(url) => {
                    post_empty(url.as_str(), &self.headers(Some(&session.access_token))).await
                }
                Err(err) => Err(err),
            },
            None => Ok(()),
        };
        // The local session ends even when the server call fails.
        self.forget();
        result
    }
}

#[allow(clippy::cast_possible_truncation)]
fn now_secs() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

/// Returns the URL fragment and strips it from the address bar when it carries
/// callback parameters.
fn take_url_fragment() -> Option<String> {
    let window = web_sys::window()?;
    let location = window.location();
    let hash = location.hash().ok()?;
    let fragment = hash.trim_start_matches('#');
    if !carries_callback_params(fragment) {
        return None;
    }

    let clean = format!(
        "{}{}",
        location.pathname().unwrap_or_default(),
        location.search().unwrap_or_default()
    );
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&clean));
    }
    Some(fragment.to_string())
}
