use super::*;
use crate::net::types::UserInfo;

#[test]
fn greeting_falls_back_to_guest() {
    assert_eq!(greeting(&Session::default()), "Welcome, Guest");
}

#[test]
fn greeting_includes_role_when_known() {
    let session = Session {
        token: Some("t".to_owned()),
        user: Some(UserInfo {
            real_name: "Alice Li".to_owned(),
            role: Some("admin".to_owned()),
            ..UserInfo::default()
        }),
        ..Session::default()
    };
    assert_eq!(greeting(&session), "Welcome, Alice Li (admin)");
}

#[test]
fn shortcuts_point_at_protected_routes() {
    for &(href, _, _) in SHORTCUTS {
        match crate::routes::resolve(href) {
            crate::routes::Resolution::Matched(target) => assert!(target.requires_auth, "{href}"),
            other => panic!("{href} did not resolve: {other:?}"),
        }
    }
}
