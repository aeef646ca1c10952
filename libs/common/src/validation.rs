//! Field checks shared by admin provisioning and the content forms
//!
//! Each check returns the message shown to the caller.

use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

/// Admin usernames, in characters
pub const USERNAME_LENGTH: RangeInclusive<usize> = 3..=32;
/// Admin passwords, in characters
pub const PASSWORD_LENGTH: RangeInclusive<usize> = 8..=128;
/// RFC 5321 path limit
pub const EMAIL_MAX_LENGTH: usize = 254;

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("username pattern compiles"));
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// Character classes every admin password must include
const PASSWORD_CLASSES: [(fn(char) -> bool, &str); 4] = [
    (|c: char| c.is_ascii_uppercase(), "an uppercase letter"),
    (|c: char| c.is_ascii_lowercase(), "a lowercase letter"),
    (|c: char| c.is_ascii_digit(), "a digit"),
    (|c: char| !c.is_alphanumeric(), "a special character"),
];

/// Return the trimmed value of a required text field
pub fn require<'a>(value: Option<&'a str>, label: &str) -> Result<&'a str, String> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(format!("{} is required", label)),
    }
}

fn within(value: &str, label: &str, length: &RangeInclusive<usize>) -> Result<(), String> {
    if length.contains(&value.chars().count()) {
        Ok(())
    } else {
        Err(format!(
            "{} must be {} to {} characters long",
            label,
            length.start(),
            length.end()
        ))
    }
}

pub fn validate_username(username: &str) -> Result<(), String> {
    require(Some(username), "Username")?;
    within(username, "Username", &USERNAME_LENGTH)?;
    if !USERNAME_PATTERN.is_match(username) {
        return Err("Username can only contain letters, numbers, and underscores".to_string());
    }
    Ok(())
}

/// Used for admin accounts, teacher profiles and contact senders alike
pub fn validate_email(email: &str) -> Result<(), String> {
    require(Some(email), "Email")?;
    if email.len() > EMAIL_MAX_LENGTH || !EMAIL_PATTERN.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Strength rule for newly provisioned admin passwords
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    within(password, "Password", &PASSWORD_LENGTH)?;

    match PASSWORD_CLASSES
        .iter()
        .find(|(class, _)| !password.chars().any(class))
    {
        Some((_, name)) => Err(format!("Password must contain {}", name)),
        None => Ok(()),
    }
}
