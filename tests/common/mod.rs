#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use playport::{
    application::{
        error::ApplicationError, repositories::connection_repository::ConnectionRepository,
    },
    adapters::repositories::InMemoryConnectionRepository,
    domain::{config::spotify::SpotifyConfig, models::connection::Connection},
};
use wiremock::MockServer;

pub const USER: &str = "default";
pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
pub const REDIRECT_URL: &str = "http://localhost:8080/auth/spotify/callback";

/// `Basic base64("client-id:client-secret")`
pub const BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";

/// Spotify client whose accounts and API hosts both live on `server`.
pub fn spotify_config(server: &MockServer) -> SpotifyConfig {
    SpotifyConfig::new(CLIENT_ID, CLIENT_SECRET, REDIRECT_URL)
        .with_endpoints(&server.uri(), &format!("{}/v1", server.uri()))
}

pub fn spotify_connection(access_token: &str, expires_at: DateTime<Utc>) -> Connection {
    Connection {
        external_user_id: "spotify-user".to_string(),
        external_user_name: "Sam".to_string(),
        access_token: access_token.to_string(),
        refresh_token: "refresh-1".to_string(),
        expires_at: Some(expires_at),
        scopes: vec!["playlist-read-private".to_string()],
        connected: true,
        ..Connection::new("spotify", USER)
    }
}

pub fn live_connection(access_token: &str) -> Connection {
    spotify_connection(access_token, Utc::now() + Duration::hours(1))
}

pub fn expired_connection(access_token: &str) -> Connection {
    spotify_connection(access_token, Utc::now() - Duration::minutes(5))
}

/// Connection store that counts `update` calls.
#[derive(Default)]
pub struct CountingConnectionRepository {
    inner: InMemoryConnectionRepository,
    updates: AtomicUsize,
}

impl CountingConnectionRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectionRepository for CountingConnectionRepository {
    async fn save(&self, connection: Connection) -> Result<Connection, ApplicationError> {
        self.inner.save(connection).await
    }

    async fn get(&self, provider: &str, user_id: &str) -> Result<Connection, ApplicationError> {
        self.inner.get(provider, user_id).await
    }

    async fn update(&self, connection: Connection) -> Result<Connection, ApplicationError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update(connection).await
    }

    async fn delete(&self, provider: &str, user_id: &str) -> Result<(), ApplicationError> {
        self.inner.delete(provider, user_id).await
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Connection>, ApplicationError> {
        self.inner.list(user_id).await
    }
}
