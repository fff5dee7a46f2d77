use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::models::connection::Connection};

#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Upserts by `(provider, user_id)`, assigning id and creation time on first insert.
    async fn save(&self, connection: Connection) -> Result<Connection, ApplicationError>;

    async fn get(&self, provider: &str, user_id: &str) -> Result<Connection, ApplicationError>;

    /// Replaces an existing record; never creates one.
    async fn update(&self, connection: Connection) -> Result<Connection, ApplicationError>;

    async fn delete(&self, provider: &str, user_id: &str) -> Result<(), ApplicationError>;

    async fn list(&self, user_id: &str) -> Result<Vec<Connection>, ApplicationError>;
}
