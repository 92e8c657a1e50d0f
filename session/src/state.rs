//! Session value observed by route guards and navigation chrome.
//!
//! DESIGN
//! ======
//! The bearer token and the identity decoded from it live in one
//! `Option<Authenticated>` so there is no representable state where a token
//! exists without its identity. The role is read through the identity rather
//! than stored a second time.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::role::Role;

/// Claims describing the signed-in user, decoded from the bearer token or
/// taken from the login response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Role tag controlling route access.
    pub role: Role,
    /// Display name, if the claims carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Every other claim, kept opaque.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identity {
    /// Same role and display name; other claims (`iat`, `exp`, ...) may differ.
    #[must_use]
    pub fn is_equivalent(&self, other: &Identity) -> bool {
        self.role == other.role && self.name == other.name
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Authenticated {
    token: String,
    identity: Identity,
}

/// Process-wide authentication state.
///
/// `Session::default()` is the pre-rehydration state: nothing known yet and
/// `loading` set, so guards show a placeholder instead of redirecting.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    auth: Option<Authenticated>,
    loading: bool,
    error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self { auth: None, loading: true, error: None }
    }
}

impl Session {
    /// Settled session with nobody signed in.
    #[must_use]
    pub fn signed_out() -> Self {
        Self { auth: None, loading: false, error: None }
    }

    /// Settled session for `identity` holding `token`.
    #[must_use]
    pub fn signed_in(token: String, identity: Identity) -> Self {
        Self { auth: Some(Authenticated { token, identity }), loading: false, error: None }
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.auth.as_ref().map(|a| a.token.as_str())
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.auth.as_ref().map(|a| &a.identity)
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.identity().map(|i| i.role)
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub(crate) fn begin_attempt(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn authenticate(&mut self, token: String, identity: Identity) {
        *self = Self::signed_in(token, identity);
    }

    /// Record a failed attempt. Any session already held is left untouched.
    pub(crate) fn fail(&mut self, message: String, still_loading: bool) {
        self.loading = still_loading;
        self.error = Some(message);
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::signed_out();
    }
}
