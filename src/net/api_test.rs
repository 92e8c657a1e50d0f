use std::time::Duration;

use futures::executor::block_on;
use session::{MemoryStorage, Role, SessionStore};

use super::*;

fn api() -> BrowserApi {
    BrowserApi::new(ApiConfig::new("https://api.example.com/api/v1/", Duration::from_secs(15)))
}

#[test]
fn config_is_kept_with_trailing_slash_trimmed() {
    assert_eq!(api().config().base_url, "https://api.example.com/api/v1");
    assert_eq!(api().config().timeout, Duration::from_secs(15));
}

#[test]
fn network_error_carries_message() {
    assert_eq!(network_error("offline"), AuthError::Network("offline".to_owned()));
}

#[cfg(not(feature = "csr"))]
#[test]
fn login_off_browser_is_a_network_failure() {
    let err = block_on(api().login(&Credentials::new("a@b.com", "x"))).unwrap_err();
    assert_eq!(err, AuthError::Network(UNAVAILABLE.to_owned()));
}

#[cfg(not(feature = "csr"))]
#[test]
fn register_and_change_password_off_browser_fail() {
    let registration = Registration {
        name: "A".to_owned(),
        email: "a@b.com".to_owned(),
        password: "Secret1!".to_owned(),
        role: Role::Student,
    };
    assert!(matches!(block_on(api().register(&registration)), Err(AuthError::Network(_))));

    let change = PasswordChange { old_password: "old".to_owned(), new_password: "new".to_owned() };
    assert!(matches!(block_on(api().change_password("abc", &change)), Err(AuthError::Network(_))));
}

#[cfg(not(feature = "csr"))]
#[test]
fn store_login_off_browser_reports_generic_failure() {
    let store = SessionStore::new(api(), MemoryStorage::default());
    store.rehydrate();
    assert!(!block_on(store.login(&Credentials::new("a@b.com", "x"))));
    let session = store.session();
    assert!(!session.is_authenticated());
    assert_eq!(session.error(), Some(session::error::GENERIC_FAILURE));
}

#[cfg(not(feature = "csr"))]
#[test]
fn marketplace_off_browser_reports_network_message() {
    let market = session::Marketplace::new(api());
    let err = block_on(market.student_applications(Some("abc"))).unwrap_err();
    assert_eq!(err, AuthError::Network(UNAVAILABLE.to_owned()));
    assert_eq!(err.request_message("Could not load applications"), "Network Error: Please check your internet connection.");
}
