use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One local user's authorization against one external provider.
///
/// Stored under the key `(provider, user_id)`; at most one record per key.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub provider: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "externalUserId")]
    pub external_user_id: String,
    #[serde(rename = "externalUserName")]
    pub external_user_name: String,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: Option<DateTime<Utc>>,
    pub scopes: Vec<String>,
    pub connected: bool,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Connection {
    pub fn new(provider: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// True when the record can be used to call the provider.
    pub fn is_usable(&self) -> bool {
        self.connected && !self.access_token.is_empty()
    }
}
