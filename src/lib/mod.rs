//! Shared frontend utilities for provider access, configuration, errors, and
//! build metadata.
//!
//! ## Provider flows
//!
//! ### Sign-up & email verification
//!
//! 1. **Create:** The client POSTs `{email, password}` to `/auth/v1/signup` with a
//!    `redirect_to` pointing at `/auth/callback`.
//! 2. **Confirm:** The provider mails a link; following it lands on
//!    `/auth/callback#access_token=...`, where the browser client picks up the
//!    session from the URL fragment.
//!
//! ### OAuth
//!
//! The browser leaves the app for `/auth/v1/authorize?provider=...` and comes back
//! to `/auth/callback` with the same fragment-based session hand-off.
//!
//! ### Waitlist
//!
//! One row per submission is POSTed to `/rest/v1/<table>`. Rows are never read back.
//!
//! The helpers attach the public anon key to every request. Access and refresh
//! tokens pass through them but must never be logged.

#[cfg(target_arch = "wasm32")]
pub mod api;
pub mod build_info;
pub mod config;
pub mod errors;

pub use errors::AppError;
