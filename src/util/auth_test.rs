use std::rc::Rc;

use super::*;
use crate::net::types::UserInfo;
use crate::routes::{HOME_PATH, login_redirect};
use crate::state::persist::{MemoryStorage, SessionStorage};
use crate::state::session::Session;

const KEY: &str = "user";

fn store() -> (SessionStore, Rc<MemoryStorage>) {
    let storage = Rc::new(MemoryStorage::new());
    (SessionStore::restore(Box::new(storage.clone()), KEY), storage)
}

fn sign_in(store: &SessionStore) {
    let user = UserInfo { id: Some("1".to_owned()), username: "alice".to_owned(), ..UserInfo::default() };
    store.set_user("tok".to_owned(), user);
}

fn persisted(storage: &MemoryStorage) -> Session {
    serde_json::from_str(&storage.load(KEY).unwrap()).unwrap()
}

/// Mirrors the router wiring: a location renders only once it is approved.
fn navigate(store: &SessionStore, approved: &mut Option<String>, path: &str) -> Option<String> {
    let redirect = apply_guard(store, path);
    if redirect.is_none() {
        *approved = Some(path.to_owned());
    }
    redirect
}

#[test]
fn root_redirects_to_dashboard() {
    let (store, _) = store();
    sign_in(&store);
    assert_eq!(apply_guard(&store, "/"), Some(HOME_PATH.to_owned()));
}

#[test]
fn leaving_for_dashboard_rearms_soft_logout_and_persists() {
    let (store, storage) = store();
    sign_in(&store);
    store.soft_logout();

    assert_eq!(apply_guard(&store, "/login"), None);
    assert!(persisted(&storage).soft_logged_out);

    assert_eq!(apply_guard(&store, "/dashboard"), None);
    assert!(!store.with(|s| s.soft_logged_out));
    assert!(!persisted(&storage).soft_logged_out);
}

#[test]
fn signed_out_protected_visit_never_renders_and_keeps_target() {
    let (store, _) = store();
    let mut approved = None;

    let redirect = navigate(&store, &mut approved, "/course-list");

    assert_eq!(redirect, Some(login_redirect("/course-list")));
    assert!(!may_render(approved.as_deref(), "/course-list"));
}

#[test]
fn previous_approval_does_not_cover_next_location() {
    let (store, _) = store();
    let mut approved = None;
    assert_eq!(navigate(&store, &mut approved, "/login"), None);
    assert!(may_render(approved.as_deref(), "/login"));

    // Still showing the stale approval while the guard handles the new path.
    assert!(!may_render(approved.as_deref(), "/dashboard"));
    let redirect = navigate(&store, &mut approved, "/dashboard");
    assert_eq!(redirect, Some(login_redirect("/dashboard")));
    assert!(!may_render(approved.as_deref(), "/dashboard"));
}

#[test]
fn signed_in_auth_page_bounces_home() {
    let (store, _) = store();
    sign_in(&store);
    assert_eq!(apply_guard(&store, "/login"), Some(HOME_PATH.to_owned()));
    assert_eq!(apply_guard(&store, "/course-list?keyword=os"), None);
}
