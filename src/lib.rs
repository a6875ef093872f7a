//! # uniface
//!
//! Leptos + WASM frontend for the UNIFACE academic discussion community: a
//! waitlist landing page, an email/password and OAuth auth screen, and a
//! guarded dashboard. Accounts, sessions, and waitlist rows live in a hosted
//! Supabase project; this crate only talks to it.
//!
//! The session/route-gating state machines, form validation, routing table,
//! configuration, and wire types are target-neutral so they can be tested
//! natively. Views and the browser HTTP/storage layer only build for `wasm32`.

#[path = "lib/mod.rs"]
pub mod app_lib;
pub mod features;
pub mod routes;

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
mod components;
