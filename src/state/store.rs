//! Observable, persisted session store.
//!
//! DESIGN
//! ======
//! `SessionStore` is the only writer of [`Session`]. Every named action
//! mutates the session, writes the snapshot to storage, then notifies
//! subscribers with the new value. The Leptos layer subscribes a signal so
//! views react; tests subscribe plain closures.
//!
//! Execution is single-threaded, so the handle is `Rc`-based and cheap to
//! clone. No borrow is held across an `.await` or a subscriber call.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::rc::Rc;

use super::persist::{SessionStorage, load_json, save_json};
use super::session::Session;
use crate::net::api;
use crate::net::http::ApiClient;
use crate::net::types::UserInfo;

type Subscriber = Rc<dyn Fn(&Session)>;

struct Inner {
    session: RefCell<Session>,
    storage: Box<dyn SessionStorage>,
    key: String,
    subscribers: RefCell<Vec<Subscriber>>,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<Inner>,
}

impl SessionStore {
    /// Rehydrate from `storage[key]`, falling back to an empty session.
    ///
    /// Call this before the router resolves its first navigation.
    pub fn restore(storage: Box<dyn SessionStorage>, key: &str) -> Self {
        let session = load_json::<Session>(storage.as_ref(), key).unwrap_or_default();
        log::debug!("session restored (logged_in={})", session.is_logged_in());
        Self {
            inner: Rc::new(Inner {
                session: RefCell::new(session),
                storage,
                key: key.to_owned(),
                subscribers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.inner.session.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.inner.session.borrow())
    }

    pub fn token(&self) -> Option<String> {
        self.with(|s| s.token.clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.with(Session::is_logged_in)
    }

    /// Register a change listener. It runs after each committed action.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) {
        self.inner.subscribers.borrow_mut().push(Rc::new(listener));
    }

    fn mutate(&self, f: impl FnOnce(&mut Session)) {
        f(&mut self.inner.session.borrow_mut());
        self.commit();
    }

    fn commit(&self) {
        let snapshot = self.snapshot();
        save_json(self.inner.storage.as_ref(), &self.inner.key, &snapshot);
        let subscribers = self.inner.subscribers.borrow().clone();
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    pub fn set_user(&self, token: String, user: UserInfo) {
        self.mutate(|s| s.set_user(token, user));
    }

    pub fn set_avatar(&self, url: &str) {
        let changed = self.inner.session.borrow_mut().set_avatar(url);
        if changed {
            self.commit();
        }
    }

    /// Edit the current user in place; no-op when signed out.
    pub fn update_user(&self, f: impl FnOnce(&mut UserInfo)) {
        let changed = self.inner.session.borrow_mut().user.as_mut().map(f).is_some();
        if changed {
            self.commit();
        }
    }

    pub fn soft_logout(&self) {
        self.mutate(|s| s.soft_logged_out = true);
    }

    pub fn clear_soft_logout(&self) {
        if self.with(|s| s.soft_logged_out) {
            self.mutate(|s| s.soft_logged_out = false);
        }
    }

    /// Drop token and user locally without contacting the server.
    pub fn clear_local(&self) {
        self.mutate(Session::clear);
    }

    /// Best-effort remote logout followed by a guaranteed local clear.
    ///
    /// The remote call is skipped when no token is held. Remote failures are
    /// logged, never returned.
    pub async fn logout(&self, client: &ApiClient) {
        let _clear = ClearOnDrop(self.clone());
        if self.token().is_none() {
            return;
        }
        if let Err(e) = api::logout(client).await {
            log::warn!("remote logout failed: {e}");
        }
    }

    /// Refresh the user record once per session lifetime.
    ///
    /// With a token and a known user id, fetches `/auth/{id}/info` and
    /// replaces the user; any failure performs a full [`Self::logout`].
    pub async fn initialize_user(&self, client: &ApiClient) {
        if self.with(|s| s.initialized) {
            return;
        }
        let pending = self.with(|s| s.token.as_ref().and(s.user_id()).map(str::to_owned));
        if let Some(user_id) = pending {
            match api::fetch_current_user(client, &user_id).await {
                Ok(mut user) => {
                    if user.id.is_none() {
                        user.id = Some(user_id);
                    }
                    self.mutate(|s| s.user = Some(user));
                }
                Err(e) => {
                    log::error!("failed to initialize user: {e}");
                    self.logout(client).await;
                }
            }
        }
        self.mutate(|s| s.initialized = true);
    }
}

/// Clears the session when dropped, including when a logout future is
/// abandoned mid-request.
struct ClearOnDrop(SessionStore);

impl Drop for ClearOnDrop {
    fn drop(&mut self) {
        self.0.clear_local();
    }
}
