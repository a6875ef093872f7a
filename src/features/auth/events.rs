//! Session change notifications. The provider client emits one event per sign-in,
//! sign-out, or refresh; screens subscribe while mounted and release the returned
//! [`Subscription`] when they unmount. A released listener is never called again,
//! including for an emission that is already being dispatched.

use crate::features::auth::types::{AuthEvent, Session};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

type Listener = Arc<dyn Fn(AuthEvent, Option<Session>) + Send + Sync>;

struct Entry {
    active: Arc<AtomicBool>,
    listener: Listener,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: BTreeMap<u64, Entry>,
}

/// Fan-out hub for session changes. Cloning shares the same listener set.
#[derive(Clone, Default)]
pub struct SessionEvents {
    registry: Arc<Mutex<Registry>>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` until the returned handle is released.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(AuthEvent, Option<Session>) + Send + Sync + 'static,
    {
        let active = Arc::new(AtomicBool::new(true));
        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.insert(
            id,
            Entry {
                active: Arc::clone(&active),
                listener: Arc::new(listener),
            },
        );

        Subscription {
            id,
            active,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Delivers `event` to every live listener in registration order.
    ///
    /// The registry lock is not held while listeners run, so a listener may
    /// subscribe, unsubscribe, or emit again.
    pub fn emit(&self, event: AuthEvent, session: Option<&Session>) {
        let snapshot: Vec<(Arc<AtomicBool>, Listener)> = self
            .registry
            .lock()
            .entries
            .values()
            .map(|entry| (Arc::clone(&entry.active), Arc::clone(&entry.listener)))
            .collect();

        tracing::debug!(?event, listeners = snapshot.len(), "session event");

        for (active, listener) in snapshot {
            if active.load(Ordering::Acquire) {
                listener(event, session.cloned());
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.lock().entries.len()
    }
}

/// Handle for one registered listener. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().entries.remove(&self.id);
        }
    }
}
