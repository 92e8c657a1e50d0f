//! Generic request seam for the marketplace endpoints.
//!
//! Authentication has its own narrow [`crate::AuthApi`]; everything else the
//! app asks of the REST API goes through [`ApiTransport::send`] so each host
//! implements HTTP once and the typed client in [`crate::marketplace`] stays
//! host-agnostic.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::AuthError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// One call against the API, relative to `ApiConfig::base_url`.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path plus query string, e.g. `/instituteprofile/filter?city=Pune`.
    pub path: String,
    /// Bearer token for the `Authorization` header, when signed in.
    pub bearer: Option<String>,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), bearer: None, body: None }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// `POST` with `body` serialized to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedResponse`] if `body` cannot be serialized.
    pub fn post(path: impl Into<String>, body: &impl Serialize) -> Result<Self, AuthError> {
        Self::new(Method::Post, path).with_json(body)
    }

    /// `PUT` with `body` serialized to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedResponse`] if `body` cannot be serialized.
    pub fn put(path: impl Into<String>, body: &impl Serialize) -> Result<Self, AuthError> {
        Self::new(Method::Put, path).with_json(body)
    }

    fn with_json(mut self, body: &impl Serialize) -> Result<Self, AuthError> {
        let value = serde_json::to_value(body).map_err(|e| AuthError::MalformedResponse(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Attach `token` as the bearer credential. `None` leaves the request anonymous.
    #[must_use]
    pub fn authorized(mut self, token: Option<&str>) -> Self {
        self.bearer = token.map(str::to_owned);
        self
    }
}

/// Sends [`ApiRequest`]s and returns the raw body of 2xx responses.
///
/// Non-2xx responses become [`AuthError::Rejected`] with the parsed error
/// body; transport failures become `Network` or `Timeout`.
#[async_trait(?Send)]
pub trait ApiTransport {
    async fn send(&self, request: &ApiRequest) -> Result<String, AuthError>;
}
