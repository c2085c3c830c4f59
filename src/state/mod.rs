//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` holds the plain session data and its derived values, `store`
//! wraps it with persistence and change notification, and `persist` abstracts
//! the durable key/value backend.

pub mod persist;
pub mod session;
pub mod store;
