use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::{
    controllers::{
        auth_controller::AuthController, connection_controller::ConnectionController,
        health_controller::HealthController, provider_controller::ProviderController,
        transfer_controller::TransferController,
    },
    state::AppState,
};

async fn index() -> &'static str {
    "PlayPort - transfer your playlists"
}

pub fn build_router(app_state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/v1/health", get(HealthController::health_check))
        .route("/api/v1/providers", get(ProviderController::list_providers))
        .route(
            "/api/v1/providers/{name}/playlists",
            get(ProviderController::get_playlists),
        )
        .route(
            "/api/v1/providers/{name}/playlists/{playlist_id}",
            get(ProviderController::export_playlist),
        )
        .route("/api/v1/transfers", post(TransferController::create_transfer))
        .route(
            "/api/v1/connections",
            get(ConnectionController::list_connections),
        );

    let auth_routes = Router::new()
        .route("/auth/spotify/start", get(AuthController::spotify_start))
        .route("/auth/spotify/callback", get(AuthController::spotify_callback))
        .route("/auth/spotify/status", get(AuthController::spotify_status))
        .route(
            "/auth/spotify/disconnect",
            post(AuthController::spotify_disconnect),
        );

    Router::new()
        .route("/", get(index))
        .merge(api_routes)
        .merge(auth_routes)
        .with_state(app_state)
}
