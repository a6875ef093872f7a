//! Landing point for provider redirects (email confirmation and OAuth). The
//! client picks the tokens out of the URL fragment while hydrating, so this page
//! only waits for the session and moves on.

use crate::components::{AppShell, Spinner};
use crate::features::auth::{callback::callback_target, state::use_resolver};
use leptos::{prelude::*, task::spawn_local};
use leptos_router::{NavigateOptions, hooks::use_navigate};

#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let resolver = use_resolver();
    let navigate = use_navigate();

    spawn_local(async move {
        let session = resolver.current_session().await;
        navigate(
            callback_target(session.as_ref()),
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        );
    });

    view! {
        <AppShell>
            <div class="flex flex-col items-center gap-4 min-h-[50vh] justify-center">
                <Spinner label="Completing sign-in…" />
            </div>
        </AppShell>
    }
}
