#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{FakeProvider, session};
use parking_lot::Mutex;
use std::future::{Future, poll_fn};
use std::pin::pin;
use std::sync::Arc;
use std::task::Poll;
use uniface::app_lib::AppError;
use uniface::features::auth::gate::{GuardBinding, GuardState, GuardView};
use uniface::features::auth::provider::IdentityProvider;
use uniface::features::auth::resolver::{SessionResolver, VerificationPolicy};
use uniface::features::auth::types::AuthEvent;
use uniface::routes::paths;

fn resolver_for(provider: &Arc<FakeProvider>) -> SessionResolver {
    SessionResolver::new(provider.clone(), VerificationPolicy::default())
}

fn attach_recording(resolver: &SessionResolver) -> (GuardBinding, Arc<Mutex<Vec<GuardState>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let binding = GuardBinding::attach(resolver, move |state| sink.lock().push(state));
    (binding, seen)
}

#[tokio::test]
async fn placeholder_until_the_first_read_completes() {
    let provider = Arc::new(FakeProvider::with_session(session("ada@ada.edu.az", true)));
    let resolver = resolver_for(&provider);
    let (binding, seen) = attach_recording(&resolver);

    assert_eq!(binding.state(), GuardState::Resolving);
    assert_eq!(binding.view(), GuardView::Placeholder);
    assert!(seen.lock().is_empty());

    assert_eq!(binding.resolve_initial(&resolver).await, GuardState::Granted);
    assert_eq!(binding.view(), GuardView::Protected);
    assert_eq!(*seen.lock(), vec![GuardState::Granted]);
}

#[tokio::test]
async fn placeholder_for_every_session_state_before_resolution() {
    let providers = [
        FakeProvider::new(),
        FakeProvider::with_session(session("new@ada.edu.az", false)),
        FakeProvider::with_session(session("ada@ada.edu.az", true)),
    ];

    for provider in providers {
        let provider = Arc::new(provider);
        let resolver = resolver_for(&provider);
        let (binding, seen) = attach_recording(&resolver);

        assert_eq!(binding.state(), GuardState::Resolving);
        assert_eq!(binding.view(), GuardView::Placeholder);
        assert!(seen.lock().is_empty());
    }
}

#[tokio::test]
async fn read_in_flight_at_unmount_is_dropped() {
    let provider = Arc::new(FakeProvider::with_session(session("ada@ada.edu.az", true)));
    let gate = provider.hold_session_reads();
    let resolver = resolver_for(&provider);
    let (binding, seen) = attach_recording(&resolver);

    let mut read = pin!(binding.resolve_initial(&resolver));
    let first = poll_fn(|cx| Poll::Ready(read.as_mut().poll(cx))).await;
    assert!(first.is_pending());
    assert_eq!(provider.calls(), vec!["get_session"]);

    binding.unmount();
    gate.notify_one();

    assert_eq!(read.await, GuardState::Resolving);
    assert_eq!(binding.state(), GuardState::Resolving);
    assert!(seen.lock().is_empty());
}

#[tokio::test]
async fn unverified_session_is_denied_with_a_redirect() {
    let provider = Arc::new(FakeProvider::with_session(session("new@ada.edu.az", false)));
    let resolver = resolver_for(&provider);
    let (binding, _) = attach_recording(&resolver);

    assert_eq!(binding.resolve_initial(&resolver).await, GuardState::Denied);
    assert_eq!(binding.view(), GuardView::Redirect(paths::AUTH));
}

#[tokio::test]
async fn sign_in_push_grants_access_without_a_reload() {
    let provider = Arc::new(FakeProvider::new());
    let resolver = resolver_for(&provider);
    let (binding, seen) = attach_recording(&resolver);

    assert_eq!(binding.resolve_initial(&resolver).await, GuardState::Denied);

    provider.push(AuthEvent::SignedIn, Some(session("ada@ada.edu.az", true)));
    assert_eq!(binding.state(), GuardState::Granted);

    provider.push(AuthEvent::SignedOut, None);
    assert_eq!(binding.state(), GuardState::Denied);
    assert_eq!(
        *seen.lock(),
        vec![GuardState::Denied, GuardState::Granted, GuardState::Denied]
    );
}

#[tokio::test]
async fn push_before_the_initial_read_wins() {
    let provider = Arc::new(FakeProvider::new());
    let resolver = resolver_for(&provider);
    let (binding, seen) = attach_recording(&resolver);

    provider.push(AuthEvent::SignedIn, Some(session("ada@ada.edu.az", true)));
    assert_eq!(binding.state(), GuardState::Granted);

    // The read now sees the pushed session too, but even a stale answer could
    // not move the guard back to Resolving or override the push.
    assert_eq!(binding.resolve_initial(&resolver).await, GuardState::Granted);
    assert_eq!(*seen.lock(), vec![GuardState::Granted]);
}

#[tokio::test]
async fn nothing_reaches_the_guard_after_unmount() {
    let provider = Arc::new(FakeProvider::new());
    let resolver = resolver_for(&provider);
    let (binding, seen) = attach_recording(&resolver);
    assert_eq!(provider.events().listener_count(), 1);

    binding.unmount();
    binding.unmount();
    assert!(!binding.is_mounted());
    assert_eq!(provider.events().listener_count(), 0);

    provider.push(AuthEvent::SignedIn, Some(session("ada@ada.edu.az", true)));
    assert_eq!(binding.resolve_initial(&resolver).await, GuardState::Resolving);
    assert!(seen.lock().is_empty());
}

#[tokio::test]
async fn provider_failure_reads_as_signed_out() {
    let provider = Arc::new(FakeProvider::new());
    provider.fail_session_reads(AppError::Network("offline".to_string()));
    let resolver = resolver_for(&provider);

    assert_eq!(resolver.current_session().await, None);

    let (binding, _) = attach_recording(&resolver);
    assert_eq!(binding.resolve_initial(&resolver).await, GuardState::Denied);
}

#[tokio::test]
async fn dashboard_helpers_follow_the_session() {
    let provider = Arc::new(FakeProvider::with_session(session("ada@ada.edu.az", true)));
    let resolver = resolver_for(&provider);
    let (binding, _) = attach_recording(&resolver);
    binding.resolve_initial(&resolver).await;

    assert_eq!(
        resolver.current_user_email().await.as_deref(),
        Some("ada@ada.edu.az")
    );

    resolver.sign_out().await.expect("sign out");
    assert_eq!(binding.state(), GuardState::Denied);
    assert_eq!(resolver.current_user_email().await, None);
}
