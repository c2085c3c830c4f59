//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate router and form plumbing from page logic to
//! improve reuse and testability.

pub mod auth;
pub mod form;
pub mod validate;
