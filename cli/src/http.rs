//! `reqwest` transport for the authentication and marketplace APIs.
//!
//! The request timeout is set on the client, so every call fails with
//! `AuthError::Timeout` once `ApiConfig::timeout` elapses.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use session::api::{CHANGE_PASSWORD_PATH, LOGIN_PATH, REGISTER_PATH, bearer};
use session::{
    ApiConfig, ApiRequest, ApiTransport, AuthApi, AuthError, Credentials, LoginResponse, Method, PasswordChange,
    Registration,
};

pub struct HttpApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpApi {
    pub fn new(config: ApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

fn transport_error(e: reqwest::Error) -> AuthError {
    if e.is_timeout() { AuthError::Timeout } else { AuthError::Network(e.to_string()) }
}

async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, AuthError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    tracing::debug!(%status, "api rejected request");
    Err(AuthError::rejected(status.as_u16(), &body))
}

#[async_trait(?Send)]
impl AuthApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        let resp = self
            .client
            .post(self.config.endpoint(LOGIN_PATH))
            .json(credentials)
            .send()
            .await
            .map_err(transport_error)?;
        let resp = ensure_success(resp).await?;
        resp.json::<LoginResponse>().await.map_err(|e| {
            if e.is_timeout() { AuthError::Timeout } else { AuthError::MalformedResponse(e.to_string()) }
        })
    }

    async fn register(&self, registration: &Registration) -> Result<(), AuthError> {
        let resp = self
            .client
            .post(self.config.endpoint(REGISTER_PATH))
            .json(registration)
            .send()
            .await
            .map_err(transport_error)?;
        ensure_success(resp).await.map(drop)
    }

    async fn change_password(&self, token: &str, change: &PasswordChange) -> Result<(), AuthError> {
        let resp = self
            .client
            .put(self.config.endpoint(CHANGE_PASSWORD_PATH))
            .header(AUTHORIZATION, bearer(token))
            .json(change)
            .send()
            .await
            .map_err(transport_error)?;
        ensure_success(resp).await.map(drop)
    }
}

fn method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait(?Send)]
impl ApiTransport for HttpApi {
    async fn send(&self, request: &ApiRequest) -> Result<String, AuthError> {
        let mut builder = self.client.request(method(request.method), self.config.endpoint(&request.path));
        if let Some(token) = &request.bearer {
            builder = builder.header(AUTHORIZATION, bearer(token));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        tracing::debug!(method = request.method.as_str(), path = %request.path, "api request");
        let resp = ensure_success(builder.send().await.map_err(transport_error)?).await?;
        resp.text().await.map_err(transport_error)
    }
}
