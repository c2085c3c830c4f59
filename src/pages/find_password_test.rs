use super::*;

#[test]
fn reset_code_payload_requires_an_email_address() {
    assert_eq!(reset_code_payload(" "), Err("Enter your email."));
    assert_eq!(reset_code_payload("alice"), Err("Enter a valid email."));
    assert_eq!(reset_code_payload(" a@b.cn ").unwrap().email, "a@b.cn");
}

#[test]
fn reset_payload_validates_code_and_confirmation() {
    assert_eq!(reset_payload("a@b.cn", "", "pw", "pw"), Err("Enter the verification code."));
    assert_eq!(reset_payload("a@b.cn", "1234", "pw", "px"), Err("Passwords do not match."));

    let payload = reset_payload("a@b.cn", " 1234 ", "pw", "pw").unwrap();
    assert_eq!(
        payload,
        ResetPasswordPayload { email: "a@b.cn".to_owned(), code: "1234".to_owned(), new_password: "pw".to_owned() }
    );
}
