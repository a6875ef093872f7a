//! Early-access waitlist captured on the landing page. This is a lead capture,
//! not an account: rows go to a provider table and nothing here signs anyone in.

#[cfg(target_arch = "wasm32")]
pub mod client;
pub mod form;
pub mod policy;
pub mod types;
