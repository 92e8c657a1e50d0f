use super::*;
use crate::util::validators::INVALID_EMAIL;

#[test]
fn blank_fields_are_rejected() {
    assert_eq!(sign_in_credentials("", "secret").unwrap_err(), FIELDS_REQUIRED);
    assert_eq!(sign_in_credentials("  ", "secret").unwrap_err(), FIELDS_REQUIRED);
    assert_eq!(sign_in_credentials("a@b.com", "").unwrap_err(), FIELDS_REQUIRED);
}

#[test]
fn malformed_email_is_rejected() {
    assert_eq!(sign_in_credentials("not-an-email", "secret").unwrap_err(), INVALID_EMAIL);
}

#[test]
fn email_is_trimmed_and_password_kept_verbatim() {
    let credentials = sign_in_credentials("  a@b.com ", " secret ").unwrap();
    assert_eq!(credentials, Credentials::new("a@b.com", " secret "));
}
