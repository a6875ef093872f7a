//! Public landing page: hero, sample discussions, and the early-access waitlist.
//! The waitlist is lead capture only; "Create account" leads to the auth screen.

use crate::{
    app_lib::config::AppConfig,
    components::{AppShell, Button, FlashAlert},
    features::{
        feed::SAMPLE_POSTS,
        waitlist::{form::WaitlistForm, types::WaitlistStore},
    },
    routes::paths,
};
use leptos::{ev::SubmitEvent, prelude::*, task::spawn_local};
use leptos_router::components::A;
use std::sync::Arc;

#[component]
pub fn LandingPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let store = expect_context::<Arc<dyn WaitlistStore>>();
    let policy = config.waitlist_policy();
    let email_placeholder = policy.email_placeholder();
    let form = RwSignal::new(WaitlistForm::default());

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();

        let Some(entry) = form.try_update(|form| form.begin_submit(&policy)).flatten() else {
            return;
        };
        let store = Arc::clone(&store);
        spawn_local(async move {
            let result = store.insert(&entry).await;
            // Nothing to update once the page is gone.
            let _ = form.try_update(|form| form.finish(result));
        });
    };

    let loading = Signal::derive(move || form.with(WaitlistForm::is_loading));
    let flash = Signal::derive(move || form.with(|form| form.flash().cloned()));

    view! {
        <AppShell>
            <section class="content">
                <div class="hero">
                    <h1>"Join the community and help people achieve their academic goals."</h1>
                    <p>
                        "UNIFACE is a global academic discussion space where students and
                        researchers ask questions, share resources, and build projects together."
                    </p>
                    <div class="hero-actions">
                        <A href=paths::AUTH {..} class="btn btn-primary">
                            "Create account"
                        </A>
                        <a href="#waitlist" class="btn btn-outline">
                            "Get early access (waitlist)"
                        </a>
                    </div>
                </div>

                <h2 class="section-title">"Latest academic discussions"</h2>
                <div class="post-list">
                    {SAMPLE_POSTS
                        .iter()
                        .map(|post| {
                            view! {
                                <article class="post-card">
                                    <div class="post-header">
                                        <h3>{post.title}</h3>
                                        <span class="post-field">{post.field}</span>
                                    </div>
                                    <p class="post-summary">{post.summary}</p>
                                    <div class="post-meta">
                                        <span>{format!("▲ {} votes", post.votes)}</span>
                                        <span>{format!("💬 {} replies", post.replies)}</span>
                                        <span class="post-note">
                                            "Create an account to view and reply."
                                        </span>
                                    </div>
                                </article>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <aside class="sidebar" id="waitlist">
                <h2>"Get early access"</h2>
                <p class="sidebar-text">
                    "Leave your details and we'll prioritize your access. If you want to use
                    the platform now, create an account."
                </p>
                <form class="signup-form" on:submit=on_submit>
                    <label class="field">
                        <span>"Full name"</span>
                        <input
                            placeholder="Your full name"
                            prop:value=move || form.with(|form| form.full_name.clone())
                            on:input=move |event| {
                                form.update(|form| form.full_name = event_target_value(&event));
                            }
                        />
                    </label>
                    <label class="field">
                        <span>"Email"</span>
                        <input
                            type="email"
                            placeholder=email_placeholder
                            prop:value=move || form.with(|form| form.email.clone())
                            on:input=move |event| {
                                form.update(|form| form.email = event_target_value(&event));
                            }
                        />
                    </label>
                    <label class="field">
                        <span>"Field of interest"</span>
                        <input
                            placeholder="Finance, AI, Environmental science…"
                            prop:value=move || form.with(|form| form.field.clone())
                            on:input=move |event| {
                                form.update(|form| form.field = event_target_value(&event));
                            }
                        />
                    </label>
                    <Button
                        button_type="submit"
                        disabled=loading
                        full_width=true
                        busy_label="Submitting..."
                    >
                        "Join early access (waitlist)"
                    </Button>
                </form>
                <FlashAlert flash=flash />
                <p class="signup-note">
                    "Note: waitlist submission is not an account. Use “Create account” to register."
                </p>
            </aside>
        </AppShell>
    }
}
