//! Landing page after sign-in: greeting plus shortcuts.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::nav_bar::NavBar;
use crate::state::session::Session;

/// Shortcut cards shown on the dashboard, as `(href, title, blurb)`.
const SHORTCUTS: &[(&str, &str, &str)] = &[
    ("/course-list", "Courses", "Browse and manage courses"),
    ("/update-info", "Personal information", "Contact and identity details"),
    ("/update-profile", "Profile", "Avatar and public bio"),
    ("/change-password", "Password", "Change your sign-in password"),
];

fn greeting(session: &Session) -> String {
    let role = session.user.as_ref().and_then(|u| u.role.as_deref()).filter(|r| !r.is_empty());
    match role {
        Some(role) => format!("Welcome, {} ({role})", session.display_name()),
        None => format!("Welcome, {}", session.display_name()),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();

    view! {
        <NavBar/>
        <main class="page dashboard-page">
            <header class="dashboard-page__header">
                <span class="dashboard-page__initial">{move || session.with(Session::initial)}</span>
                <h1>{move || session.with(greeting)}</h1>
            </header>
            <div class="dashboard-page__cards">
                {SHORTCUTS
                    .iter()
                    .map(|&(href, title, blurb)| {
                        view! {
                            <a class="dashboard-page__card" href=href>
                                <h2>{title}</h2>
                                <p>{blurb}</p>
                            </a>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </main>
    }
}
