use serde::{Deserialize, Serialize};

/// Query string of the OAuth redirect back to us.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub state: String,
    pub code: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConnectionStatusResponse {
    pub provider: String,
    pub connected: bool,
    #[serde(rename = "userName", skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}
