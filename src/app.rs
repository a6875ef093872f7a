use crate::app_lib::{AppError, config::AppConfig};
use crate::components::{Alert, AlertKind};
use crate::features::auth::{
    client::SupabaseAuth,
    resolver::{SessionResolver, VerificationPolicy},
    state::SessionProvider,
    types::OAuthProvider,
};
use crate::features::waitlist::{client::SupabaseWaitlist, types::WaitlistStore};
use crate::routes::AppRoutes;
use leptos::prelude::*;
use leptos_router::components::Router;
use std::sync::Arc;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::load();
    if let Err(err) = config.validate() {
        tracing::error!(error = %err, "invalid configuration");
        return view! { <ConfigError error=err /> }.into_any();
    }

    let oauth = OAuthProvider::parse(&config.oauth_provider).unwrap_or_else(|| {
        tracing::warn!(provider = %config.oauth_provider, "unknown OAuth provider, using google");
        OAuthProvider::Google
    });
    let resolver = SessionResolver::new(
        Arc::new(SupabaseAuth::new(&config)),
        VerificationPolicy {
            trust_oauth_sessions: config.trust_oauth_sessions,
        },
    );
    let waitlist: Arc<dyn WaitlistStore> = Arc::new(SupabaseWaitlist::new(&config));

    provide_context(waitlist);
    provide_context(oauth);
    provide_context(config);

    view! {
        <SessionProvider resolver=resolver>
            <Router>
                <AppRoutes />
            </Router>
        </SessionProvider>
    }
    .into_any()
}

#[component]
fn ConfigError(error: AppError) -> impl IntoView {
    view! {
        <div class="max-w-xl mx-auto mt-16">
            <h1 class="text-xl font-semibold mb-4">"UNIFACE is not configured"</h1>
            <Alert kind=AlertKind::Error message=error.user_message() />
        </div>
    }
}
