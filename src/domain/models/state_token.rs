use chrono::{DateTime, Utc};
use serde::Serialize;

/// Opaque one-time value echoed back by an OAuth callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateToken {
    pub value: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

