use crate::app_lib::config::AppConfig;
use crate::components::{AppShell, Button, ButtonStyle, FlashAlert, Spinner};
use crate::features::auth::form::{AuthForm, AuthRequest};
use crate::features::auth::state::{use_resolver, use_session};
use crate::features::auth::types::OAuthProvider;
use crate::features::flash::FlashKind;
use crate::routes::paths;
use leptos::{
    ev::{MouseEvent, SubmitEvent},
    prelude::*,
    task::spawn_local,
};
use leptos_router::components::A;
use url::Url;
use wasm_bindgen::JsValue;

#[component]
pub fn AuthPage() -> impl IntoView {
    let resolver = use_resolver();
    let session = use_session();
    let config = expect_context::<AppConfig>();
    let oauth = expect_context::<OAuthProvider>();
    let callback_url = config.callback_url(&browser_origin());
    let form = RwSignal::new(AuthForm::default());

    let dispatch = move |request: AuthRequest| {
        let resolver = resolver.clone();
        spawn_local(async move {
            let result = request.send(resolver.provider()).await;
            let Some(Some(url)) = form.try_update(|form| form.finish(result)) else {
                return;
            };
            if let Err(err) = leave_for(&url) {
                tracing::error!(error = ?err, "failed to start provider redirect");
                let _ = form.try_update(|form| form.transfer_failed(oauth));
            }
        });
    };

    let on_submit = {
        let dispatch = dispatch.clone();
        let callback_url = callback_url.clone();
        move |event: SubmitEvent| {
            event.prevent_default();
            if let Some(request) = form.try_update(|form| form.begin_submit(&callback_url)).flatten() {
                dispatch(request);
            }
        }
    };

    let on_oauth = move |_: MouseEvent| {
        if let Some(request) = form.try_update(|form| form.begin_oauth(oauth, &callback_url)).flatten() {
            dispatch(request);
        }
    };

    let loading = Signal::derive(move || form.with(AuthForm::is_loading));
    let flash = Signal::derive(move || form.with(|form| form.flash().cloned()));
    let mode = move || form.with(|form| form.mode);
    let signed_in = move || {
        session.is_signed_in.get()
            && form.with(|form| form.flash().is_some_and(|flash| flash.kind == FlashKind::Success))
    };

    view! {
        <AppShell>
            <div class="auth-card">
                <h1>"Welcome to UNIFACE"</h1>
                <p class="auth-subtitle">"Sign in or create an account to join the discussions."</p>

                <Button
                    full_width=true
                    style=ButtonStyle::Outline
                    disabled=loading
                    {..}
                    on:click=on_oauth
                >
                    {format!("Continue with {}", oauth.label())}
                </Button>

                <div class="auth-divider">
                    <span>"or"</span>
                </div>

                <form class="auth-form" on:submit=on_submit>
                    <label class="field">
                        <span>"Email"</span>
                        <input
                            type="email"
                            autocomplete="email"
                            placeholder="you@example.com"
                            prop:value=move || form.with(|form| form.email.clone())
                            on:input=move |event| {
                                form.update(|form| form.email = event_target_value(&event));
                            }
                        />
                    </label>
                    <label class="field">
                        <span>"Password"</span>
                        <input
                            type="password"
                            autocomplete=move || mode().password_autocomplete()
                            placeholder="At least 8 characters"
                            prop:value=move || form.with(|form| form.password.clone())
                            on:input=move |event| {
                                form.update(|form| form.password = event_target_value(&event));
                            }
                        />
                    </label>
                    <Button
                        button_type="submit"
                        disabled=loading
                        full_width=true
                        busy_label="Please wait..."
                    >
                        {move || mode().submit_label()}
                    </Button>
                </form>

                {move || {
                    loading.get().then_some(view! { <div class="mt-4"><Spinner /></div> })
                }}
                <FlashAlert flash=flash />
                <Show when=signed_in>
                    <p class="mt-4">
                        <A href=paths::DASHBOARD>"Go to your dashboard"</A>
                    </p>
                </Show>

                <button
                    type="button"
                    class="auth-toggle"
                    disabled=move || loading.get()
                    on:click=move |_| form.update(AuthForm::toggle_mode)
                >
                    {move || mode().toggle_label()}
                </button>
            </div>
        </AppShell>
    }
}

fn browser_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

fn leave_for(url: &Url) -> Result<(), JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("window unavailable"))?
        .location()
        .assign(url.as_str())
}
