use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::connection::Connection;

/// Connection as shown to clients; credentials never leave the server.
#[derive(Debug, Serialize)]
pub struct ConnectionResponse {
    pub provider: String,
    #[serde(rename = "externalUserId")]
    pub external_user_id: String,
    #[serde(rename = "externalUserName")]
    pub external_user_name: String,
    pub connected: bool,
    pub scopes: Vec<String>,
    #[serde(rename = "expiresAt")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Connection> for ConnectionResponse {
    fn from(value: Connection) -> Self {
        ConnectionResponse {
            provider: value.provider,
            external_user_id: value.external_user_id,
            external_user_name: value.external_user_name,
            connected: value.connected,
            scopes: value.scopes,
            expires_at: value.expires_at,
            updated_at: value.updated_at,
        }
    }
}
