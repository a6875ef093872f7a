//! Route guard state machine for protected screens.
//!
//! ```text
//!              initial read / push
//!  Resolving ───────────────────────► Granted ◄──┐
//!      │                                 │       │ push
//!      └────────────────────────────► Denied ────┘
//! ```
//!
//! The guard starts in `Resolving` and shows a neutral placeholder until the first
//! session read (or push) arrives. After that it only moves between `Granted` and
//! `Denied`. Every decision depends on the latest session alone.

use crate::features::auth::events::Subscription;
use crate::features::auth::resolver::{SessionResolver, VerificationPolicy};
use crate::features::auth::types::Session;
use crate::routes::paths;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    Resolving,
    Denied,
    Granted,
}

impl GuardState {
    pub fn view(self) -> GuardView {
        match self {
            GuardState::Resolving => GuardView::Placeholder,
            GuardState::Denied => GuardView::Redirect(paths::AUTH),
            GuardState::Granted => GuardView::Protected,
        }
    }
}

/// What a guarded route renders for a given state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardView {
    Placeholder,
    /// Navigate away, replacing the current history entry.
    Redirect(&'static str),
    Protected,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteGuard {
    state: GuardState,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteGuard {
    pub fn new() -> Self {
        Self {
            state: GuardState::Resolving,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Applies the mount-time session read. Ignored once anything newer arrived.
    pub fn resolve(&mut self, verified: bool) -> GuardState {
        if self.state == GuardState::Resolving {
            self.state = Self::decide(verified);
        }
        self.state
    }

    /// Applies a pushed session change.
    pub fn observe(&mut self, verified: bool) -> GuardState {
        self.state = Self::decide(verified);
        self.state
    }

    pub fn view(&self) -> GuardView {
        self.state.view()
    }

    fn decide(verified: bool) -> GuardState {
        if verified {
            GuardState::Granted
        } else {
            GuardState::Denied
        }
    }
}

type Notify = Arc<dyn Fn(GuardState) + Send + Sync>;

struct BindingInner {
    guard: Mutex<RouteGuard>,
    mounted: AtomicBool,
    subscription: Mutex<Option<Subscription>>,
    notify: Notify,
}

impl BindingInner {
    /// Runs one transition and reports it when the state changed.
    fn transition(&self, step: impl FnOnce(&mut RouteGuard) -> GuardState) -> GuardState {
        let (before, after) = {
            let mut guard = self.guard.lock();
            let before = guard.state();
            (before, step(&mut guard))
        };
        if before != after {
            tracing::debug!(from = ?before, to = ?after, "route guard transition");
            (self.notify)(after);
        }
        after
    }
}

/// A [`RouteGuard`] wired to a [`SessionResolver`] for the lifetime of one mounted
/// view. `on_change` receives every state the guard moves to. After
/// [`GuardBinding::unmount`] neither pushes nor a late initial read reach it.
#[derive(Clone)]
pub struct GuardBinding {
    inner: Arc<BindingInner>,
}

impl GuardBinding {
    /// Subscribes to session changes. The guard stays `Resolving` until
    /// [`GuardBinding::resolve_initial`] completes or a push arrives.
    pub fn attach<F>(resolver: &SessionResolver, on_change: F) -> Self
    where
        F: Fn(GuardState) + Send + Sync + 'static,
    {
        let inner = Arc::new(BindingInner {
            guard: Mutex::new(RouteGuard::new()),
            mounted: AtomicBool::new(true),
            subscription: Mutex::new(None),
            notify: Arc::new(on_change),
        });

        let weak = Arc::downgrade(&inner);
        let policy = resolver.policy();
        let subscription = resolver.subscribe(move |event, session| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if !inner.mounted.load(Ordering::Acquire) {
                return;
            }
            tracing::debug!(?event, "route guard observed session change");
            let verified = policy.is_verified(session.as_ref());
            inner.transition(|guard| guard.observe(verified));
        });
        *inner.subscription.lock() = Some(subscription);

        Self { inner }
    }

    /// Reads the current session and leaves `Resolving`.
    pub async fn resolve_initial(&self, resolver: &SessionResolver) -> GuardState {
        let session = resolver.current_session().await;
        self.apply_initial(resolver.policy(), session.as_ref())
    }

    fn apply_initial(&self, policy: VerificationPolicy, session: Option<&Session>) -> GuardState {
        if !self.is_mounted() {
            return self.state();
        }
        let verified = policy.is_verified(session);
        self.inner.transition(|guard| guard.resolve(verified))
    }

    pub fn state(&self) -> GuardState {
        self.inner.guard.lock().state()
    }

    pub fn view(&self) -> GuardView {
        self.inner.guard.lock().view()
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.load(Ordering::Acquire)
    }

    /// Releases the subscription. Safe to call more than once.
    pub fn unmount(&self) {
        self.inner.mounted.store(false, Ordering::Release);
        self.inner.subscription.lock().take();
    }
}
