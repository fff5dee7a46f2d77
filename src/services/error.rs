use thiserror::Error;

use crate::application::error::ApplicationError;

/// Failures raised while talking to a remote provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("not authenticated: {0}")]
    Unauthorized(String),

    #[error("token exchange rejected (status {status:?}): {body}")]
    Exchange { status: Option<u16>, body: String },

    #[error("upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("malformed upstream response: {0}")]
    Decode(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<ProviderError> for ApplicationError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::NotFound(msg) => ApplicationError::NotFound(msg),
            ProviderError::Unauthorized(msg) => ApplicationError::NotAuthenticated(msg),
            ProviderError::Exchange { status, body } => {
                ApplicationError::ExchangeFailed { status, body }
            }
            ProviderError::Upstream { status, body } => ApplicationError::FetchFailed {
                status: Some(status),
                body,
            },
            ProviderError::NetworkError(msg) | ProviderError::Decode(msg) => {
                ApplicationError::FetchFailed {
                    status: None,
                    body: msg,
                }
            }
            ProviderError::InternalError(msg) => ApplicationError::InternalError(msg),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ProviderError::NetworkError("Request timeout".to_string())
        } else if error.is_connect() {
            ProviderError::NetworkError(format!("Connection failed: {}", error))
        } else if error.is_decode() {
            ProviderError::Decode(error.to_string())
        } else if error.is_request() {
            ProviderError::NetworkError(error.to_string())
        } else {
            ProviderError::InternalError(error.to_string())
        }
    }
}
