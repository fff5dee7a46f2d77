use std::time::Duration;

pub const SPOTIFY_ACCOUNTS_BASE: &str = "https://accounts.spotify.com";
pub const SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";

pub const SPOTIFY_SCOPES: [&str; 4] = [
    "user-read-private",
    "user-read-email",
    "playlist-read-private",
    "playlist-read-collaborative",
];

/// Registered OAuth client plus the endpoints it talks to.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub accounts_base: String,
    pub api_base: String,
    pub scopes: Vec<String>,
    pub timeout: Duration,
}

impl SpotifyConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_url: redirect_url.into(),
            accounts_base: SPOTIFY_ACCOUNTS_BASE.to_string(),
            api_base: SPOTIFY_API_BASE.to_string(),
            scopes: SPOTIFY_SCOPES.iter().map(|s| s.to_string()).collect(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Points both hosts somewhere else, e.g. a local mock server.
    pub fn with_endpoints(mut self, accounts_base: &str, api_base: &str) -> Self {
        self.accounts_base = accounts_base.trim_end_matches('/').to_string();
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn authorize_url(&self) -> String {
        format!("{}/authorize", self.accounts_base)
    }

    pub fn token_url(&self) -> String {
        format!("{}/api/token", self.accounts_base)
    }

    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }
}
