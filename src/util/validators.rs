//! Form field validation shared by the sign-up and settings pages.
//!
//! Each validator returns the message to show under the field, or `None`
//! when the value is acceptable.

#[cfg(test)]
#[path = "validators_test.rs"]
mod validators_test;

pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long.";
pub const PASSWORD_NEEDS_DIGIT: &str = "Password must contain at least one number.";
pub const PASSWORD_NEEDS_SPECIAL: &str = "Password must contain at least one special character.";
pub const PASSWORD_NEEDS_LOWER: &str = "Password must contain at least one lowercase letter.";
pub const PASSWORD_NEEDS_UPPER: &str = "Password must contain at least one uppercase letter.";
pub const PASSWORDS_DIFFER: &str = "Passwords do not match.";

const PASSWORD_MIN_CHARS: usize = 8;

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

fn is_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-')
}

/// `local@host.tld`, with a purely alphabetic top-level label of two or more letters.
pub fn validate_email(value: &str) -> Option<&'static str> {
    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        domain.rsplit_once('.').is_some_and(|(host, tld)| {
            !local.is_empty()
                && local.chars().all(is_local_char)
                && !host.is_empty()
                && host.chars().all(is_host_char)
                && tld.len() >= 2
                && tld.chars().all(|c| c.is_ascii_alphabetic())
        })
    });
    (!valid).then_some(INVALID_EMAIL)
}

/// Strength rules, reported one at a time in a fixed order.
pub fn validate_password(value: &str) -> Option<&'static str> {
    if value.chars().count() < PASSWORD_MIN_CHARS {
        Some(PASSWORD_TOO_SHORT)
    } else if !value.chars().any(|c| c.is_ascii_digit()) {
        Some(PASSWORD_NEEDS_DIGIT)
    } else if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(PASSWORD_NEEDS_SPECIAL)
    } else if !value.chars().any(|c| c.is_ascii_lowercase()) {
        Some(PASSWORD_NEEDS_LOWER)
    } else if !value.chars().any(|c| c.is_ascii_uppercase()) {
        Some(PASSWORD_NEEDS_UPPER)
    } else {
        None
    }
}

pub fn validate_confirmation(password: &str, confirmation: &str) -> Option<&'static str> {
    (password != confirmation).then_some(PASSWORDS_DIFFER)
}
