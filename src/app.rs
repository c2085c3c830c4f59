//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
    hooks::{use_location, use_navigate},
};

use crate::coordinator::{Coordinator, use_coordinator};
use crate::pages::{
    change_password::ChangePasswordPage, course_list::CourseListPage, dashboard::DashboardPage,
    find_password::FindPasswordPage, login::LoginPage, register::RegisterPage, update_info::UpdateInfoPage,
    update_profile::UpdateProfilePage,
};
use crate::routes::join_search;
use crate::util::auth::{install_route_guard, may_render};

/// Root application component.
///
/// Expects a coordinator in context (see `provide_coordinator`). Mirrors the
/// session store into a signal for views, refreshes the user once, and only
/// then mounts the guarded routes.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let coordinator = use_coordinator();
    let store = coordinator.with_value(|c| c.store.clone());
    let session = RwSignal::new(store.snapshot());
    store.subscribe(move |s| session.set(s.clone()));
    provide_context(session);

    let ready = RwSignal::new(false);
    leptos::task::spawn_local(async move {
        let Coordinator { store, api } = coordinator.get_value();
        store.initialize_user(&api).await;
        ready.set(true);
    });

    view! {
        <Title text="Campus Portal"/>

        <Router>
            <Show when=move || ready.get() fallback=|| view! { <p class="app-loading">"Loading..."</p> }>
                <GuardedRoutes/>
            </Show>
        </Router>
    }
}

/// Route table behind the navigation guard.
///
/// `/` and unknown paths render nothing; the guard redirects them. No route
/// view mounts until the guard has approved the current location.
#[component]
fn GuardedRoutes() -> impl IntoView {
    let store = use_coordinator().with_value(|c| c.store.clone());
    let location = use_location();
    let current_path = Memo::new(move |_| join_search(&location.pathname.get(), &location.search.get()));
    let approved = install_route_guard(store, current_path, use_navigate());
    let allowed = move || current_path.with(|path| approved.with(|a| may_render(a.as_deref(), path)));

    view! {
        <Show when=allowed>
            <GuardedRouteTable/>
        </Show>
    }
}

#[component]
fn GuardedRouteTable() -> impl IntoView {
    view! {
        <Routes fallback=|| ()>
            <Route path=StaticSegment("login") view=LoginPage/>
            <Route path=StaticSegment("register") view=RegisterPage/>
            <Route path=StaticSegment("find-password") view=FindPasswordPage/>
            <Route path=StaticSegment("change-password") view=ChangePasswordPage/>
            <Route path=StaticSegment("update-info") view=UpdateInfoPage/>
            <Route path=StaticSegment("update-profile") view=UpdateProfilePage/>
            <Route path=StaticSegment("dashboard") view=DashboardPage/>
            <Route path=StaticSegment("course-list") view=CourseListPage/>
            <Route path=StaticSegment("") view=|| ()/>
        </Routes>
    }
}
