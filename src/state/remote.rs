//! Load state for data fetched from the REST API.

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

use session::AuthError;

#[derive(Clone, Debug, PartialEq)]
pub enum Remote<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Remote<T> {
    /// Settle from an API result, using `fallback` when the server gave no reason.
    pub fn settle(result: Result<T, AuthError>, fallback: &str) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => {
                log::warn!("request failed: {e}");
                Self::Failed(e.request_message(fallback))
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading | Self::Failed(_) => None,
        }
    }
}
