use thiserror::Error;

use crate::domain::config::spotify::SpotifyConfig;

pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_USER_ID: &str = "default";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is required when Spotify is configured")]
    MissingSetting(&'static str),
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server_addr: String,
    /// Stands in for a session-derived identity.
    pub user_id: String,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub spotify_redirect_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            server_addr: non_empty("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string()),
            user_id: non_empty("PLAYPORT_USER_ID").unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            cors_allowed_origins: non_empty("CORS_ALLOWED_ORIGINS").map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
            spotify_client_id: non_empty("SPOTIFY_CLIENT_ID"),
            spotify_client_secret: non_empty("SPOTIFY_CLIENT_SECRET"),
            spotify_redirect_url: non_empty("SPOTIFY_REDIRECT_URL"),
        }
    }

    /// `Ok(None)` when Spotify is left unconfigured, an error when only part of
    /// the client registration is present.
    pub fn spotify(&self) -> Result<Option<SpotifyConfig>, ConfigError> {
        match (
            &self.spotify_client_id,
            &self.spotify_client_secret,
            &self.spotify_redirect_url,
        ) {
            (None, None, None) => Ok(None),
            (Some(id), Some(secret), Some(redirect)) => {
                Ok(Some(SpotifyConfig::new(id, secret, redirect)))
            }
            (None, _, _) => Err(ConfigError::MissingSetting("SPOTIFY_CLIENT_ID")),
            (_, None, _) => Err(ConfigError::MissingSetting("SPOTIFY_CLIENT_SECRET")),
            (_, _, None) => Err(ConfigError::MissingSetting("SPOTIFY_REDIRECT_URL")),
        }
    }
}
