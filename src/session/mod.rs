//! Session management for Expense CLI
//!
//! Login state is an explicit [`Session`] value rather than an ambient flag.
//! Interested components subscribe as [`SessionObserver`]s; the
//! [`SessionStore`] is one such observer and keeps the token on disk between
//! runs.

mod state;
mod store;

pub use state::{LogObserver, Session, SessionEvent, SessionObserver, SessionToken};
pub use store::SessionStore;
