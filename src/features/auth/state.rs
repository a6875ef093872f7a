//! Session context for the frontend. The provider hydrates the session once on
//! mount, follows every later change through a subscription, and exposes derived
//! signals for the header and auth screens. Guards keep their own binding so their
//! decision never depends on this copy.

use crate::features::auth::{resolver::SessionResolver, types::Session};
use leptos::{prelude::*, task::spawn_local};

#[derive(Clone, Copy)]
/// Session state shared through Leptos.
pub struct SessionContext {
    pub session: RwSignal<Option<Session>>,
    pub is_signed_in: Signal<bool>,
}

impl SessionContext {
    fn new(session: RwSignal<Option<Session>>) -> Self {
        let is_signed_in = Signal::derive(move || session.with(Option::is_some));
        Self {
            session,
            is_signed_in,
        }
    }

    pub fn email(&self) -> Signal<Option<String>> {
        let session = self.session;
        Signal::derive(move || {
            session.with(|session| session.as_ref().and_then(|s| s.email().map(str::to_string)))
        })
    }
}

/// Provides the resolver and session context to everything below it.
#[component]
pub fn SessionProvider(resolver: SessionResolver, children: Children) -> impl IntoView {
    let session = RwSignal::new(None);
    provide_context(resolver.clone());
    provide_context(SessionContext::new(session));

    let subscription = resolver.subscribe(move |_, next| session.set(next));
    on_cleanup(move || subscription.unsubscribe());

    spawn_local(async move {
        let current = resolver.current_session().await;
        // The context may already be gone if the app unmounted first.
        let _ = session.try_set(current);
    });

    view! { {children()} }
}

/// Returns the session resolver provided by [`SessionProvider`].
pub fn use_resolver() -> SessionResolver {
    expect_context::<SessionResolver>()
}

/// Returns the current session context or a fallback empty context.
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(|| SessionContext::new(RwSignal::new(None)))
}
