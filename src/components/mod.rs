//! Reusable UI components shared by the pages.

pub mod form_error;
pub mod nav_bar;
