//! Input checks shared by the auth and profile forms.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

/// `true` for a non-empty string of ASCII digits, such as a student id.
pub fn is_all_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

/// Trim `raw` and reject it when blank.
pub fn required<'a>(raw: &'a str, message: &'static str) -> Result<&'a str, &'static str> {
    let value = raw.trim();
    if value.is_empty() { Err(message) } else { Ok(value) }
}

/// Student id must be present and numeric.
pub fn validate_sdu_id(raw: &str) -> Result<String, &'static str> {
    let value = required(raw, "Enter your student id.")?;
    if !is_all_digits(value) {
        return Err("Student id must contain digits only.");
    }
    Ok(value.to_owned())
}

/// New password must be present and typed the same twice.
pub fn validate_new_password(password: &str, confirm: &str) -> Result<String, &'static str> {
    if password.is_empty() {
        return Err("Enter a new password.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(password.to_owned())
}

/// Trimmed value, or `None` when blank. Used for optional form fields.
pub fn optional(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_owned())
}
