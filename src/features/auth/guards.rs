use crate::features::auth::gate::{GuardBinding, GuardState, GuardView};
use crate::features::auth::state::use_resolver;
use leptos::{prelude::*, task::spawn_local};
use leptos_router::{NavigateOptions, hooks::use_navigate};

/// Renders `children` only for a verified session. Shows a neutral placeholder
/// until the first session read completes and redirects to the auth screen
/// (replacing history) whenever access is denied.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let resolver = use_resolver();
    let navigate = use_navigate();
    let state = RwSignal::new(GuardState::Resolving);

    let binding = GuardBinding::attach(&resolver, move |next| state.set(next));
    let on_unmount = binding.clone();
    on_cleanup(move || on_unmount.unmount());

    spawn_local(async move {
        binding.resolve_initial(&resolver).await;
    });

    Effect::new(move |_| {
        if let GuardView::Redirect(path) = state.get().view() {
            // UX-only guard; row-level security on the provider is the real boundary.
            navigate(
                path,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    view! {
        <Show
            when=move || state.get() == GuardState::Granted
            fallback=|| {
                view! {
                    <div class="flex justify-center items-center min-h-[50vh]">
                        <div class="animate-pulse text-gray-400">"Loading..."</div>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
