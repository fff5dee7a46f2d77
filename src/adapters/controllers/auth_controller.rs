use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
    Json,
};
use tracing::{info, warn};

use crate::{
    adapters::{
        dto::auth_dto::{CallbackQuery, ConnectionStatusResponse},
        state::AppState,
    },
    application::error::ApplicationError,
    services::spotify::{SpotifyProvider, SPOTIFY_PROVIDER_NAME},
};

pub const CONNECTED_REDIRECT: &str = "/api/v1/connections";

pub struct AuthController;

fn require_spotify(
    spotify: Option<Arc<SpotifyProvider>>,
) -> Result<Arc<SpotifyProvider>, ApplicationError> {
    spotify.ok_or_else(|| ApplicationError::ServiceUnavailable("Spotify is not configured".to_string()))
}

impl AuthController {
    /// Starts the authorization-code flow.
    /// GET /auth/spotify/start
    pub async fn spotify_start(State(app_state): State<AppState>) -> Result<Redirect, ApplicationError> {
        let spotify = require_spotify(app_state.spotify)?;
        let state = app_state.state_repository.generate().await?;

        info!("Redirecting to Spotify authorization");
        Ok(Redirect::temporary(&spotify.auth_url(&state.value)))
    }

    /// OAuth redirect target.
    /// GET /auth/spotify/callback?state=..&code=..
    pub async fn spotify_callback(
        State(app_state): State<AppState>,
        Query(query): Query<CallbackQuery>,
    ) -> Result<Redirect, ApplicationError> {
        let spotify = require_spotify(app_state.spotify)?;

        // state is consumed before anything else is looked at
        if !app_state.state_repository.validate(&query.state).await {
            return Err(ApplicationError::InvalidState);
        }

        if let Some(error) = query.error {
            warn!("Spotify authorization denied: {}", error);
            return Err(ApplicationError::BadRequest(format!(
                "Spotify authorization failed: {}",
                error
            )));
        }

        let code = query
            .code
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ApplicationError::BadRequest("Missing authorization code".to_string()))?;

        let token = spotify.exchange(&code).await?;
        spotify
            .save_connection(&app_state.current_user.0, token)
            .await?;

        Ok(Redirect::to(CONNECTED_REDIRECT))
    }

    /// GET /auth/spotify/status
    pub async fn spotify_status(
        State(app_state): State<AppState>,
    ) -> Result<Json<ConnectionStatusResponse>, ApplicationError> {
        let spotify = require_spotify(app_state.spotify)?;
        let connection = spotify
            .connection_status(&app_state.current_user.0)
            .await?
            .filter(|c| c.connected);

        Ok(Json(ConnectionStatusResponse {
            provider: SPOTIFY_PROVIDER_NAME.to_string(),
            connected: connection.is_some(),
            user_name: connection.map(|c| c.external_user_name),
        }))
    }

    /// POST /auth/spotify/disconnect
    pub async fn spotify_disconnect(
        State(app_state): State<AppState>,
    ) -> Result<StatusCode, ApplicationError> {
        let spotify = require_spotify(app_state.spotify)?;
        spotify.disconnect(&app_state.current_user.0).await?;
        Ok(StatusCode::NO_CONTENT)
    }
}
