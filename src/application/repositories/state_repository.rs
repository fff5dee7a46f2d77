use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::models::state_token::StateToken};

#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Issues a fresh CSRF state token.
    ///
    /// Fails with `RandomSourceFailure` when secure randomness is unavailable.
    async fn generate(&self) -> Result<StateToken, ApplicationError>;

    /// Consumes `token` and reports whether it was issued and still unexpired.
    ///
    /// The entry is removed on every call that finds it, so a second call with
    /// the same value always returns `false`.
    async fn validate(&self, token: &str) -> bool;
}
