use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    application::{
        error::ApplicationError, repositories::connection_repository::ConnectionRepository,
    },
    domain::models::connection::Connection,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ConnectionKey {
    provider: String,
    user_id: String,
}

impl ConnectionKey {
    fn new(provider: &str, user_id: &str) -> Self {
        Self {
            provider: provider.to_string(),
            user_id: user_id.to_string(),
        }
    }

    fn of(connection: &Connection) -> Self {
        Self::new(&connection.provider, &connection.user_id)
    }
}

/// Connections keyed by `(provider, user_id)`, held in process memory.
#[derive(Default)]
pub struct InMemoryConnectionRepository {
    connections: RwLock<HashMap<ConnectionKey, Connection>>,
}

impl InMemoryConnectionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn validate(connection: &Connection) -> Result<(), ApplicationError> {
        if connection.provider.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "provider cannot be empty".to_string(),
            ));
        }
        if connection.user_id.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "user id cannot be empty".to_string(),
            ));
        }
        if connection.connected && connection.access_token.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "a connected record needs an access token".to_string(),
            ));
        }
        Ok(())
    }

    fn not_found(provider: &str, user_id: &str) -> ApplicationError {
        ApplicationError::NotFound(format!(
            "connection for provider {} and user {}",
            provider, user_id
        ))
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn save(&self, connection: Connection) -> Result<Connection, ApplicationError> {
        Self::validate(&connection)?;

        let key = ConnectionKey::of(&connection);
        let now = Utc::now();
        let mut connection = connection;

        let mut connections = self.connections.write().await;
        if connection.id.is_empty() {
            match connections.get(&key) {
                Some(existing) => {
                    connection.id = existing.id.clone();
                    connection.created_at = existing.created_at;
                }
                None => {
                    connection.id = Uuid::new_v4().to_string();
                    connection.created_at = Some(now);
                }
            }
        }
        if connection.created_at.is_none() {
            connection.created_at = Some(now);
        }
        connection.updated_at = Some(now);

        connections.insert(key, connection.clone());
        info!(
            "Saved {} connection for user {}",
            connection.provider, connection.user_id
        );
        Ok(connection)
    }

    async fn get(&self, provider: &str, user_id: &str) -> Result<Connection, ApplicationError> {
        self.connections
            .read()
            .await
            .get(&ConnectionKey::new(provider, user_id))
            .cloned()
            .ok_or_else(|| Self::not_found(provider, user_id))
    }

    async fn update(&self, connection: Connection) -> Result<Connection, ApplicationError> {
        Self::validate(&connection)?;

        let key = ConnectionKey::of(&connection);
        let mut connections = self.connections.write().await;
        let existing = connections
            .get(&key)
            .ok_or_else(|| Self::not_found(&connection.provider, &connection.user_id))?;

        let mut connection = connection;
        if connection.id.is_empty() {
            connection.id = existing.id.clone();
        }
        if connection.created_at.is_none() {
            connection.created_at = existing.created_at;
        }
        connection.updated_at = Some(Utc::now());

        connections.insert(key, connection.clone());
        debug!(
            "Updated {} connection for user {}",
            connection.provider, connection.user_id
        );
        Ok(connection)
    }

    async fn delete(&self, provider: &str, user_id: &str) -> Result<(), ApplicationError> {
        let removed = self
            .connections
            .write()
            .await
            .remove(&ConnectionKey::new(provider, user_id));

        match removed {
            Some(_) => {
                info!("Deleted {} connection for user {}", provider, user_id);
                Ok(())
            }
            None => Err(Self::not_found(provider, user_id)),
        }
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Connection>, ApplicationError> {
        Ok(self
            .connections
            .read()
            .await
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }
}
