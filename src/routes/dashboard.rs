use crate::components::{AppShell, Button, ButtonStyle};
use crate::features::auth::state::use_resolver;
use leptos::{ev::MouseEvent, prelude::*, task::spawn_local};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let resolver = use_resolver();
    let (email, set_email) = signal::<Option<String>>(None);

    {
        let resolver = resolver.clone();
        spawn_local(async move {
            let current = resolver.current_user_email().await;
            let _ = set_email.try_set(current);
        });
    }

    // The guard sees the SignedOut push and redirects.
    let on_logout = move |_: MouseEvent| {
        let resolver = resolver.clone();
        spawn_local(async move {
            if let Err(err) = resolver.sign_out().await {
                tracing::warn!(error = %err, "sign-out request failed");
            }
        });
    };

    view! {
        <AppShell>
            <div class="dashboard">
                <h1>"Dashboard"</h1>
                <p>"Authenticated ✅"</p>
                <Show when=move || email.with(Option::is_some)>
                    <p class="text-gray-600">
                        "Signed in as: "
                        <strong>{move || email.get().unwrap_or_default()}</strong>
                    </p>
                </Show>
                <Button style=ButtonStyle::Outline {..} on:click=on_logout>
                    "Logout"
                </Button>
            </div>
        </AppShell>
    }
}
