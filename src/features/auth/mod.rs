//! Auth feature module covering email/password and OAuth sign-in, session change
//! notifications, and route gating. It keeps authentication logic out of the UI
//! and touches security boundaries: passwords and tokens must never be logged.
//!
//! Flow Overview: the auth screen validates locally, then signs up (the provider
//! mails a confirmation link) or signs in. OAuth and confirmation links return
//! through `/auth/callback`, where the browser client lifts the session out of the
//! URL fragment. Guarded routes hold a `GuardBinding` that follows every session
//! change until they unmount.

pub mod callback;
#[cfg(target_arch = "wasm32")]
pub mod client;
pub mod events;
pub mod form;
pub mod gate;
#[cfg(target_arch = "wasm32")]
pub(crate) mod guards;
pub mod provider;
pub mod resolver;
#[cfg(target_arch = "wasm32")]
pub(crate) mod state;
#[cfg(target_arch = "wasm32")]
mod storage;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub(crate) use guards::RequireAuth;
