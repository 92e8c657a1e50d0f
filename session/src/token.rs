//! Bearer-token payload decoding.
//!
//! Reads the claims segment of a compact JWT (`header.payload.signature`).
//! Only the second segment matters: a bare `header.payload` pair decodes too,
//! and the payload may use either the URL-safe or the standard base64
//! alphabet, padded or not. The signature is NOT checked: decoded claims only drive UI personalization
//! and route chrome, while the backend verifies every request it serves.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::error::DecodeError;
use crate::state::Identity;

/// base64url that accepts the payload with or without `=` padding. Standard
/// alphabet input is mapped onto it first.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode the claims carried by `token`.
///
/// # Errors
///
/// Returns [`DecodeError`] when the token has no non-empty second segment,
/// the payload is not base64, or the claims are not an object with a known
/// `role`.
pub fn decode(token: &str) -> Result<Identity, DecodeError> {
    let payload = payload_segment(token.trim()).ok_or(DecodeError::Malformed)?;
    let bytes = PAYLOAD_ENGINE.decode(to_url_safe(payload))?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn payload_segment(token: &str) -> Option<&str> {
    token.split('.').nth(1).filter(|payload| !payload.is_empty())
}

fn to_url_safe(payload: &str) -> String {
    payload
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

/// Build an unsigned token around `claims` for tests.
#[cfg(test)]
pub(crate) fn unsigned(claims: &serde_json::Value) -> String {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.sig")
}
