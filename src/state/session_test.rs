use super::*;

fn user(real_name: &str, username: &str) -> UserInfo {
    UserInfo {
        id: Some("1".to_owned()),
        real_name: real_name.to_owned(),
        username: username.to_owned(),
        ..UserInfo::default()
    }
}

// =============================================================
// Login status
// =============================================================

#[test]
fn default_session_is_logged_out() {
    let session = Session::default();
    assert!(!session.is_logged_in());
    assert!(!session.initialized);
    assert!(!session.soft_logged_out);
}

#[test]
fn logged_in_requires_both_token_and_user() {
    let cases = [
        (None, None, false),
        (Some("t".to_owned()), None, false),
        (None, Some(user("A", "a")), false),
        (Some("t".to_owned()), Some(user("A", "a")), true),
    ];
    for (token, user, expected) in cases {
        let session = Session { token, user, ..Session::default() };
        assert_eq!(session.is_logged_in(), expected);
        assert_eq!(session.snapshot().is_logged_in, expected);
    }
}

// =============================================================
// Derived display values
// =============================================================

#[test]
fn display_name_prefers_real_name_then_username() {
    let mut session = Session { user: Some(user("Li Lei", "lilei")), ..Session::default() };
    assert_eq!(session.display_name(), "Li Lei");

    session.user = Some(user("", "lilei"));
    assert_eq!(session.display_name(), "lilei");

    session.user = Some(user(" ", ""));
    assert_eq!(session.display_name(), GUEST_DISPLAY_NAME);

    session.user = None;
    assert_eq!(session.display_name(), GUEST_DISPLAY_NAME);
}

#[test]
fn initial_uppercases_first_character() {
    let session = Session { user: Some(user("", "bob")), ..Session::default() };
    assert_eq!(session.initial(), "B");

    let session = Session { user: Some(user("张三", "zs")), ..Session::default() };
    assert_eq!(session.initial(), "张");

    assert_eq!(Session::default().initial(), FALLBACK_INITIAL);
}

// =============================================================
// Mutations
// =============================================================

#[test]
fn set_user_clears_soft_logout() {
    let mut session = Session { soft_logged_out: true, ..Session::default() };
    session.set_user("t".to_owned(), user("A", "a"));
    assert!(session.is_logged_in());
    assert!(!session.soft_logged_out);
    assert_eq!(session.user_id(), Some("1"));
}

#[test]
fn set_user_after_logout_resets_initialized() {
    let mut session = Session { initialized: true, ..Session::default() };
    session.set_user("t".to_owned(), user("A", "a"));
    assert!(!session.initialized);
}

#[test]
fn set_user_while_logged_in_keeps_initialized() {
    let mut session = Session { token: Some("old".to_owned()), initialized: true, ..Session::default() };
    session.set_user("new".to_owned(), user("A", "a"));
    assert!(session.initialized);
    assert_eq!(session.token.as_deref(), Some("new"));
}

#[test]
fn set_avatar_is_noop_without_user() {
    let mut session = Session::default();
    assert!(!session.set_avatar("https://img/a.png"));
    assert_eq!(session, Session::default());
}

#[test]
fn set_avatar_updates_only_avatar() {
    let mut session = Session { user: Some(user("A", "a")), ..Session::default() };
    assert!(session.set_avatar("https://img/a.png"));
    let user = session.user.unwrap();
    assert_eq!(user.avatar_url, "https://img/a.png");
    assert_eq!(user.real_name, "A");
}

#[test]
fn clear_drops_credentials_but_keeps_flags() {
    let mut session = Session {
        token: Some("t".to_owned()),
        user: Some(user("A", "a")),
        initialized: true,
        soft_logged_out: true,
    };
    session.clear();
    assert_eq!(session.token, None);
    assert_eq!(session.user, None);
    assert!(session.initialized);
    assert!(session.soft_logged_out);
}

#[test]
fn session_json_round_trips_through_storage_shape() {
    let session = Session {
        token: Some("t".to_owned()),
        user: Some(user("A", "a")),
        initialized: true,
        soft_logged_out: false,
    };
    let raw = serde_json::to_string(&session).unwrap();
    assert!(raw.contains("\"softLoggedOut\":false"));
    let restored: Session = serde_json::from_str(&raw).unwrap();
    assert_eq!(restored, session);
}
