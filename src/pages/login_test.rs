use super::*;

#[test]
fn login_payload_checks_id_before_password() {
    assert_eq!(login_payload("abc", ""), Err("Student id must contain digits only."));
    assert_eq!(login_payload("2021", " "), Err("Enter your password."));
}

#[test]
fn login_payload_keeps_password_verbatim() {
    let payload = login_payload(" 2021 ", " pw ").unwrap();
    assert_eq!(payload, LoginPayload { sdu_id: "2021".to_owned(), password: " pw ".to_owned() });
}
