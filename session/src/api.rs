//! Contract with the remote authentication API.
//!
//! The store never speaks HTTP itself. Each host implements [`AuthApi`] over
//! its own transport (`gloo-net` in the browser, `reqwest` natively) and maps
//! transport failures into [`AuthError`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::role::Role;
use crate::state::Identity;

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const CHANGE_PASSWORD_PATH: &str = "/auth/changepassword";

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

/// Successful `POST /auth/login` response.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub user: Identity,
    pub token: String,
}

/// Body of `POST /auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Body of `PUT /auth/changepassword`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

/// Authentication collaborator.
///
/// Futures are `?Send`: the client runs on a single-threaded WASM event loop.
#[async_trait(?Send)]
pub trait AuthApi {
    /// Exchange credentials for a bearer token and the user's claims.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError>;

    /// Create an account. Does not sign the user in.
    async fn register(&self, registration: &Registration) -> Result<(), AuthError>;

    /// Change the password of the account owning `token`.
    async fn change_password(&self, token: &str, change: &PasswordChange) -> Result<(), AuthError>;
}

/// Value for the `Authorization` header carrying `token`.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
