use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("not authenticated: {0}")]
    NotAuthenticated(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid or expired OAuth state")]
    InvalidState,

    #[error("token exchange failed (status {status:?}): {body}")]
    ExchangeFailed { status: Option<u16>, body: String },

    #[error("upstream fetch failed (status {status:?}): {body}")]
    FetchFailed { status: Option<u16>, body: String },

    #[error("upstream write failed (status {status:?}): {body}")]
    WriteFailed { status: Option<u16>, body: String },

    #[error("secure random source unavailable: {0}")]
    RandomSourceFailure(String),

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    InternalError(String),
}
