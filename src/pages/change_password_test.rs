use super::*;

#[test]
fn current_password_is_required() {
    assert_eq!(change_password_payload("", "new", "new"), Err("Enter your current password."));
}

#[test]
fn new_password_must_be_confirmed_and_different() {
    assert_eq!(change_password_payload("old", "new", "nex"), Err("Passwords do not match."));
    assert_eq!(
        change_password_payload("same", "same", "same"),
        Err("The new password must differ from the current one.")
    );
}

#[test]
fn valid_change_builds_payload() {
    assert_eq!(
        change_password_payload("old", "new", "new"),
        Ok(ChangePasswordPayload { old_password: "old".to_owned(), new_password: "new".to_owned() })
    );
}
