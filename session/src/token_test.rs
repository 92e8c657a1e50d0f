use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use serde_json::json;

use super::*;
use crate::role::Role;

#[test]
fn decode_reads_role_and_name() {
    let token = unsigned(&json!({ "role": "Student", "name": "A", "id": "u1" }));
    let identity = decode(&token).unwrap();
    assert_eq!(identity.role, Role::Student);
    assert_eq!(identity.name.as_deref(), Some("A"));
    assert_eq!(identity.extra.get("id"), Some(&json!("u1")));
}

#[test]
fn decode_accepts_padded_payload() {
    let claims = json!({ "role": "Institution", "name": "Uni" }).to_string();
    let token = format!("h.{}.s", URL_SAFE.encode(&claims));
    assert_eq!(decode(&token).unwrap().role, Role::Institution);
}

#[test]
fn decode_accepts_empty_signature() {
    let claims = URL_SAFE_NO_PAD.encode(json!({ "role": "Student" }).to_string());
    assert!(decode(&format!("h.{claims}.")).is_ok());
}

#[test]
fn decode_rejects_missing_payload_segment() {
    assert!(matches!(decode("not-a-token"), Err(DecodeError::Malformed)));
    assert!(matches!(decode(""), Err(DecodeError::Malformed)));
    assert!(matches!(decode("header."), Err(DecodeError::Malformed)));
}

#[test]
fn decode_accepts_header_and_payload_only() {
    let claims = URL_SAFE_NO_PAD.encode(json!({ "role": "Student", "name": "A" }).to_string());
    let identity = decode(&format!("h.{claims}")).unwrap();
    assert_eq!(identity.role, Role::Student);
}

#[test]
fn decode_reads_second_segment_of_longer_tokens() {
    let claims = URL_SAFE_NO_PAD.encode(json!({ "role": "Institution" }).to_string());
    assert_eq!(decode(&format!("h.{claims}.s.extra")).unwrap().role, Role::Institution);
}

#[test]
fn decode_accepts_standard_alphabet_payload() {
    // "~~~" and "???" encode to `+` and `/` in the standard alphabet.
    let claims = json!({ "role": "Student", "name": "~~~???" }).to_string();
    let standard = STANDARD.encode(&claims);
    assert!(standard.contains('+') && standard.contains('/'), "{standard}");

    let identity = decode(&format!("h.{standard}.s")).unwrap();
    assert_eq!(identity.name.as_deref(), Some("~~~???"));
}

#[test]
fn decode_rejects_empty_payload() {
    assert!(matches!(decode("a..c"), Err(DecodeError::Malformed)));
}

#[test]
fn decode_rejects_invalid_base64() {
    assert!(matches!(decode("a.!!!.c"), Err(DecodeError::Base64(_))));
}

#[test]
fn decode_rejects_non_json_payload() {
    let payload = URL_SAFE_NO_PAD.encode("hello");
    assert!(matches!(decode(&format!("a.{payload}.c")), Err(DecodeError::Claims(_))));
}

#[test]
fn decode_rejects_claims_without_role() {
    let token = unsigned(&json!({ "name": "A" }));
    assert!(matches!(decode(&token), Err(DecodeError::Claims(_))));
}

#[test]
fn decode_rejects_unknown_role() {
    let token = unsigned(&json!({ "role": "Admin" }));
    assert!(matches!(decode(&token), Err(DecodeError::Claims(_))));
}

#[test]
fn decode_rejects_non_object_claims() {
    let payload = URL_SAFE_NO_PAD.encode("[1,2,3]");
    assert!(decode(&format!("a.{payload}.c")).is_err());
}

#[test]
fn decode_ignores_surrounding_whitespace() {
    let token = unsigned(&json!({ "role": "Student" }));
    assert!(decode(&format!("  {token}\n")).is_ok());
}
