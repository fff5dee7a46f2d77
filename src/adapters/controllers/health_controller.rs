use axum::{extract::State, Json};
use serde::Serialize;
use tracing::debug;

use crate::adapters::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub providers: Vec<String>,
    #[serde(rename = "spotifyEnabled")]
    pub spotify_enabled: bool,
}

pub struct HealthController;

impl HealthController {
    /// GET /api/v1/health
    pub async fn health_check(State(app_state): State<AppState>) -> Json<HealthResponse> {
        debug!("Health check requested");

        Json(HealthResponse {
            status: "healthy".to_string(),
            providers: app_state.transfer_service.list_providers(),
            spotify_enabled: app_state.spotify.is_some(),
        })
    }
}
