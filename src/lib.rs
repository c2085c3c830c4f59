//! # campus-portal
//!
//! Leptos + WASM client for the campus portal web API.
//!
//! The crate is organised around one persisted [`state::store::SessionStore`],
//! one [`net::http::ApiClient`] that reads its token from that store, and a
//! route guard that decides every navigation from the session. Pages are thin
//! views over those pieces; all of the decision logic compiles and is tested
//! natively, while browser glue sits behind the `csr` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod coordinator;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// WASM entry point: set up logging, build the coordinator, mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use leptos::prelude::*;

    use crate::app::App;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let config = config::ClientConfig::from_build_env().unwrap_or_else(|e| {
        log::error!("{e}; falling back to default configuration");
        config::ClientConfig::default()
    });
    log::info!("campus portal starting against {}", config.api_base_url);

    let coordinator = coordinator::Coordinator::browser(config);
    leptos::mount::mount_to_body(move || {
        coordinator::provide_coordinator(coordinator);
        view! { <App/> }
    });
}
