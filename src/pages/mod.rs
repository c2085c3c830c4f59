//! Route-level page components.

pub mod change_password;
pub mod course_list;
pub mod dashboard;
pub mod find_password;
pub mod login;
pub mod register;
pub mod update_info;
pub mod update_profile;
