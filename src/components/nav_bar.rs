//! Top bar for signed-in pages: identity, section links, and session controls.
//!
//! SYSTEM CONTEXT
//! ==============
//! "Switch account" keeps the token and only marks a soft logout so the
//! login page becomes reachable. "Log out" ends the session for real.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::coordinator::{Coordinator, use_coordinator};
use crate::routes::LOGIN_PATH;
use crate::state::session::Session;

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let coordinator = use_coordinator();
    let navigate = use_navigate();

    let display_name = move || session.with(Session::display_name);
    let initial = move || session.with(Session::initial);
    let avatar = move || {
        session.with(|s| s.user.as_ref().map(|u| u.avatar_url.clone()).filter(|url| !url.is_empty()))
    };

    let switch_navigate = navigate.clone();
    let on_switch_account = move |_| {
        coordinator.with_value(|c| c.store.soft_logout());
        switch_navigate(LOGIN_PATH, NavigateOptions::default());
    };

    let on_logout = move |_| {
        let Coordinator { store, api } = coordinator.get_value();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            store.logout(&api).await;
            navigate(LOGIN_PATH, NavigateOptions::default());
        });
    };

    view! {
        <nav class="nav-bar">
            <a href="/dashboard" class="nav-bar__brand">"Campus Portal"</a>
            <a href="/course-list" class="nav-bar__link">"Courses"</a>
            <span class="nav-bar__spacer"></span>
            <span class="nav-bar__self">
                {move || match avatar() {
                    Some(url) => view! { <img class="nav-bar__avatar" src=url alt=""/> }.into_any(),
                    None => view! { <span class="nav-bar__initial">{initial}</span> }.into_any(),
                }}
                <span class="nav-bar__name">{display_name}</span>
            </span>
            <button class="btn" on:click=on_switch_account>"Switch account"</button>
            <button class="btn" on:click=on_logout>"Log out"</button>
        </nav>
    }
}
