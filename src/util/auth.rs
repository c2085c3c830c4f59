//! Route guard wiring for the Leptos router.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route component sits behind one guard. The decision itself lives in
//! `routes::decide`; [`apply_guard`] runs it against the store and
//! [`install_route_guard`] feeds it the router location.
//!
//! A route view only renders once the guard has approved the exact location
//! being shown, so a protected page never mounts (or fires requests) for a
//! signed-out visitor.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::routes::{self, Resolution, Verdict};
use crate::state::session::Session;
use crate::state::store::SessionStore;

/// Decide one navigation against the current session.
///
/// Re-arms a pending soft logout through the store when leaving for a
/// non-auth page. Returns the path to redirect to, or `None` to proceed.
pub fn apply_guard(store: &SessionStore, full_path: &str) -> Option<String> {
    let target = match routes::resolve(full_path) {
        Resolution::Redirect(to) => return Some(to),
        Resolution::Matched(target) => target,
    };
    let outcome = routes::decide(&target, &store.with(Session::snapshot));
    if outcome.clear_soft_logout {
        store.clear_soft_logout();
    }
    match outcome.verdict {
        Verdict::Allow => None,
        Verdict::Redirect(to) => {
            log::debug!("guard redirect {full_path} -> {to}");
            Some(to)
        }
    }
}

/// `true` when the guard approved exactly the location on screen.
pub fn may_render(approved: Option<&str>, current: &str) -> bool {
    approved == Some(current)
}

/// Run the guard once for every location change.
///
/// `current_path` is the router location (path plus query). Session changes
/// alone never re-run the guard, only navigations do. The returned signal
/// holds the last approved location; pair it with [`may_render`].
pub fn install_route_guard<F>(store: SessionStore, current_path: Memo<String>, navigate: F) -> RwSignal<Option<String>>
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let approved = RwSignal::new(None::<String>);
    Effect::new(move || {
        let full_path = current_path.get();
        match apply_guard(&store, &full_path) {
            None => approved.set(Some(full_path)),
            Some(to) => navigate(&to, NavigateOptions { replace: true, ..NavigateOptions::default() }),
        }
    });
    approved
}
