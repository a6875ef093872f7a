//! Shared layout wrapper with the brand header, account buttons, and footer. It
//! centralizes header markup so routes can focus on content. Navigation is
//! client-side only; the provider enforces access to data.

use crate::app_lib::build_info;
use crate::features::auth::state::{use_resolver, use_session};
use crate::routes::{RouteMatch, Screen, paths, resolve};
use leptos::{prelude::*, task::spawn_local};
use leptos_router::{components::A, hooks::use_location};

/// Wraps routes with a header and main content container.
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let session = use_session();
    let is_signed_in = session.is_signed_in;
    let resolver = use_resolver();
    let pathname = use_location().pathname;
    let on_auth_screen = move || resolve(&pathname.get()) == RouteMatch::Render(Screen::Auth);

    view! {
        <div class="app">
            <header class="app-header">
                <A href=paths::LANDING {..} class="brand">
                    <div class="brand-logo">"U"</div>
                    <span class="brand-name">"UNIFACE"</span>
                </A>
                <div class="header-buttons">
                    <Show
                        when=move || is_signed_in.get()
                        fallback=move || {
                            view! {
                                <Show when=move || !on_auth_screen()>
                                    <A href=paths::AUTH {..} class="btn btn-outline">
                                        "Log in"
                                    </A>
                                    <A href=paths::AUTH {..} class="btn btn-primary">
                                        "Sign up"
                                    </A>
                                </Show>
                            }
                        }
                    >
                        <A href=paths::DASHBOARD {..} class="btn btn-outline">
                            "Dashboard"
                        </A>
                        <button
                            type="button"
                            class="btn btn-primary"
                            on:click={
                                let resolver = resolver.clone();
                                move |_| {
                                    let resolver = resolver.clone();
                                    spawn_local(async move {
                                        if let Err(err) = resolver.sign_out().await {
                                            tracing::warn!(error = %err, "sign-out request failed");
                                        }
                                    });
                                }
                            }
                        >
                            "Sign out"
                        </button>
                    </Show>
                </div>
            </header>
            <main class="app-main">{children()}</main>
            <footer class="app-footer">
                <span>"UNIFACE · "</span>
                <code>{build_info::build_label()}</code>
            </footer>
        </div>
    }
}
