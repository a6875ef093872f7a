//! Domain-level frontend features (auth, waitlist, feed) and their shared logic.
//! Routes import these modules to keep view code focused while validation,
//! provider calls, and session gating stay in dedicated feature areas.

pub mod auth;
pub mod feed;
pub mod flash;
pub mod waitlist;
