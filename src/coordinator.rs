//! Top-level wiring between the session store and the API client.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client reads its bearer token from the store on every request, and a
//! 401 from any endpoint clears the store and leaves for the login page. The
//! coordinator is built once at startup and shared through Leptos context.

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod coordinator_test;

use std::rc::Rc;

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::net::http::{ApiClient, Transport};
use crate::routes::LOGIN_PATH;
use crate::state::persist::SessionStorage;
use crate::state::store::SessionStore;

#[derive(Clone)]
pub struct Coordinator {
    pub store: SessionStore,
    pub api: ApiClient,
}

impl Coordinator {
    /// Restore the session from `storage` and build a client bound to it.
    ///
    /// `redirect` performs a hard navigation; it runs after the local clear
    /// for every 401 response.
    pub fn new(
        config: ClientConfig,
        transport: Rc<dyn Transport>,
        storage: Box<dyn SessionStorage>,
        redirect: impl Fn(&str) + 'static,
    ) -> Self {
        let store = SessionStore::restore(storage, &config.storage_key);
        let token_store = store.clone();
        let unauthorized_store = store.clone();
        let api = ApiClient::new(config, transport)
            .with_token_source(move || token_store.token())
            .with_unauthorized_handler(move || {
                log::warn!("request unauthorized; clearing session");
                unauthorized_store.clear_local();
                redirect(LOGIN_PATH);
            });
        Self { store, api }
    }

    /// Browser wiring: `fetch`, `localStorage`, and `window.location`.
    #[cfg(feature = "csr")]
    pub fn browser(config: ClientConfig) -> Self {
        use crate::net::transport::GlooTransport;
        use crate::state::persist::BrowserStorage;

        Self::new(config, Rc::new(GlooTransport), Box::new(BrowserStorage), |path| {
            if let Some(window) = web_sys::window() {
                if window.location().set_href(path).is_err() {
                    log::error!("failed to navigate to {path}");
                }
            }
        })
    }
}

/// Context handle. The coordinator holds `Rc`s, so it lives in local storage.
pub type CoordinatorHandle = StoredValue<Coordinator, LocalStorage>;

pub fn provide_coordinator(coordinator: Coordinator) -> CoordinatorHandle {
    let handle = StoredValue::new_local(coordinator);
    provide_context(handle);
    handle
}

pub fn use_coordinator() -> CoordinatorHandle {
    expect_context::<CoordinatorHandle>()
}
