//! `gloo-net` transport for the authentication and marketplace APIs.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, each raced against a
//! `gloo-timers` sleep of `ApiConfig::timeout`.
//! Off-browser: every call fails with `AuthError::Network`, since the fetch
//! API only exists in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses keep their status and body in `AuthError::Rejected`, so
//! the session store can derive the user-facing message per operation.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use session::{
    ApiConfig, ApiRequest, ApiTransport, AuthApi, AuthError, Credentials, LoginResponse, PasswordChange, Registration,
};
#[cfg(feature = "csr")]
use session::api::{CHANGE_PASSWORD_PATH, LOGIN_PATH, REGISTER_PATH, bearer};

#[cfg(any(test, not(feature = "csr")))]
const UNAVAILABLE: &str = "fetch is only available in the browser";

pub struct BrowserApi {
    config: ApiConfig,
}

impl BrowserApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> AuthError {
    AuthError::Network(UNAVAILABLE.to_owned())
}

#[cfg(any(test, feature = "csr"))]
fn network_error(e: impl std::fmt::Display) -> AuthError {
    AuthError::Network(e.to_string())
}

#[cfg(feature = "csr")]
async fn with_timeout<T>(
    timeout: std::time::Duration,
    exchange: impl std::future::Future<Output = Result<T, AuthError>>,
) -> Result<T, AuthError> {
    use futures::future::{Either, select};

    let exchange = std::pin::pin!(exchange);
    let deadline = std::pin::pin!(gloo_timers::future::sleep(timeout));
    match select(exchange, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            log::warn!("api request timed out after {timeout:?}");
            Err(AuthError::Timeout)
        }
    }
}

#[cfg(feature = "csr")]
async fn ensure_ok(resp: gloo_net::http::Response) -> Result<gloo_net::http::Response, AuthError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    log::debug!("api request rejected: {status}");
    Err(AuthError::rejected(status, &body))
}

#[async_trait(?Send)]
impl AuthApi for BrowserApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        #[cfg(feature = "csr")]
        {
            let url = self.config.endpoint(LOGIN_PATH);
            with_timeout(self.config.timeout, async {
                let request = gloo_net::http::Request::post(&url).json(credentials).map_err(network_error)?;
                let resp = ensure_ok(request.send().await.map_err(network_error)?).await?;
                resp.json::<LoginResponse>()
                    .await
                    .map_err(|e| AuthError::MalformedResponse(e.to_string()))
            })
            .await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = credentials;
            Err(unavailable())
        }
    }

    async fn register(&self, registration: &Registration) -> Result<(), AuthError> {
        #[cfg(feature = "csr")]
        {
            let url = self.config.endpoint(REGISTER_PATH);
            with_timeout(self.config.timeout, async {
                let request = gloo_net::http::Request::post(&url).json(registration).map_err(network_error)?;
                ensure_ok(request.send().await.map_err(network_error)?).await.map(drop)
            })
            .await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = registration;
            Err(unavailable())
        }
    }

    async fn change_password(&self, token: &str, change: &PasswordChange) -> Result<(), AuthError> {
        #[cfg(feature = "csr")]
        {
            let url = self.config.endpoint(CHANGE_PASSWORD_PATH);
            let authorization = bearer(token);
            with_timeout(self.config.timeout, async {
                let request = gloo_net::http::Request::put(&url)
                    .header("Authorization", &authorization)
                    .json(change)
                    .map_err(network_error)?;
                ensure_ok(request.send().await.map_err(network_error)?).await.map(drop)
            })
            .await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (token, change);
            Err(unavailable())
        }
    }
}

#[cfg(feature = "csr")]
fn builder(request: &ApiRequest, url: &str) -> gloo_net::http::RequestBuilder {
    use gloo_net::http::Request;
    use session::Method;

    let builder = match request.method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    };
    match &request.bearer {
        Some(token) => builder.header("Authorization", &bearer(token)),
        None => builder,
    }
}

#[async_trait(?Send)]
impl ApiTransport for BrowserApi {
    async fn send(&self, request: &ApiRequest) -> Result<String, AuthError> {
        #[cfg(feature = "csr")]
        {
            let url = self.config.endpoint(&request.path);
            with_timeout(self.config.timeout, async {
                let builder = builder(request, &url);
                let outgoing = match &request.body {
                    Some(body) => builder.json(body),
                    None => builder.build(),
                }
                .map_err(network_error)?;
                let resp = ensure_ok(outgoing.send().await.map_err(network_error)?).await?;
                resp.text().await.map_err(network_error)
            })
            .await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(unavailable())
        }
    }
}

/// Current time as an RFC 3339 timestamp, for application submissions.
pub fn now_iso() -> String {
    #[cfg(feature = "csr")]
    {
        String::from(js_sys::Date::new_0().to_iso_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        String::new()
    }
}
