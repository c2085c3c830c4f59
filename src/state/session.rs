//! Auth-session data for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by the route guard and by identity-aware pages. Mutations here are
//! plain and synchronous; `store::SessionStore` wraps them with persistence
//! and change notification so nothing else writes these fields directly.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

use crate::net::types::UserInfo;

pub const GUEST_DISPLAY_NAME: &str = "Guest";
pub const FALLBACK_INITIAL: &str = "U";

/// Token + user pair plus the two lifecycle flags.
///
/// `is_logged_in` holds exactly when both `token` and `user` are present.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
    pub initialized: bool,
    pub soft_logged_out: bool,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref()?.id.as_deref()
    }

    /// Real name, else username, else a guest placeholder.
    pub fn display_name(&self) -> String {
        self.preferred_name().unwrap_or(GUEST_DISPLAY_NAME).to_owned()
    }

    /// Upper-cased first character of the preferred name, for avatar fallbacks.
    pub fn initial(&self) -> String {
        self.preferred_name()
            .and_then(|name| name.chars().next())
            .map_or_else(|| FALLBACK_INITIAL.to_owned(), |c| c.to_uppercase().collect())
    }

    fn preferred_name(&self) -> Option<&str> {
        let user = self.user.as_ref()?;
        [user.real_name.as_str(), user.username.as_str()]
            .into_iter()
            .map(str::trim)
            .find(|name| !name.is_empty())
    }

    /// Store a fresh login. A login following a logout restarts the
    /// initialization cycle so the next startup refreshes the user once.
    pub fn set_user(&mut self, token: String, user: UserInfo) {
        if self.token.is_none() {
            self.initialized = false;
        }
        self.token = Some(token);
        self.user = Some(user);
        self.soft_logged_out = false;
    }

    /// Returns `false` when there is no user to update.
    pub fn set_avatar(&mut self, url: &str) -> bool {
        let Some(user) = self.user.as_mut() else {
            return false;
        };
        url.clone_into(&mut user.avatar_url);
        true
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }

    /// What the route guard needs to know about this session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot { is_logged_in: self.is_logged_in(), soft_logged_out: self.soft_logged_out }
    }
}

/// Guard-facing view of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub is_logged_in: bool,
    pub soft_logged_out: bool,
}
