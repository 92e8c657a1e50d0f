use serde_json::json;

use super::*;

#[test]
fn credentials_serialize_as_email_password() {
    let body = serde_json::to_value(Credentials::new("a@b.com", "x")).unwrap();
    assert_eq!(body, json!({ "email": "a@b.com", "password": "x" }));
}

#[test]
fn password_change_uses_camel_case_fields() {
    let change = PasswordChange { old_password: "old".into(), new_password: "new".into() };
    assert_eq!(
        serde_json::to_value(change).unwrap(),
        json!({ "oldPassword": "old", "newPassword": "new" })
    );
}

#[test]
fn registration_carries_role_tag() {
    let registration = Registration {
        name: "A".into(),
        email: "a@b.com".into(),
        password: "Secret1!".into(),
        role: Role::Institution,
    };
    assert_eq!(serde_json::to_value(registration).unwrap()["role"], json!("Institution"));
}

#[test]
fn login_response_parses_user_and_token() {
    let response: LoginResponse = serde_json::from_value(json!({
        "user": { "role": "Student", "name": "A", "_id": "42" },
        "token": "abc"
    }))
    .unwrap();
    assert_eq!(response.token, "abc");
    assert_eq!(response.user.role, Role::Student);
}

#[test]
fn login_response_without_token_is_rejected() {
    let parsed = serde_json::from_value::<LoginResponse>(json!({ "user": { "role": "Student" } }));
    assert!(parsed.is_err());
}

#[test]
fn bearer_prefixes_token() {
    assert_eq!(bearer("abc"), "Bearer abc");
}
