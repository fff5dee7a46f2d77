use std::sync::Arc;

use playport::{
    adapters::{
        repositories::{InMemoryConnectionRepository, InMemoryStateRepository},
        router::build_router,
        state::{AppState, CurrentUser},
    },
    application::repositories::{
        connection_repository::ConnectionRepository, state_repository::StateRepository,
    },
    domain::config::app::AppConfig,
    services,
};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();

    let spotify_config = config
        .spotify()
        .expect("ERROR: Spotify configuration is incomplete");

    tracing::info!("Starting playport for user '{}'", config.user_id);

    // Configure CORS
    let cors = if let Some(origins) = &config.cors_allowed_origins {
        let origins: Vec<_> = origins
            .iter()
            .map(|s| s.parse().expect("Invalid CORS origin"))
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Allow all origins if not specified (only for development)
        CorsLayer::permissive()
    };

    let state_repo = Arc::new(InMemoryStateRepository::new());
    let connection_repo =
        Arc::new(InMemoryConnectionRepository::new()) as Arc<dyn ConnectionRepository>;

    let (transfer_service, spotify) =
        services::create_providers(spotify_config, connection_repo.clone())
            .expect("Failed to create providers");

    let app_state = AppState {
        current_user: CurrentUser(config.user_id.clone()),
        state_repository: state_repo.clone() as Arc<dyn StateRepository>,
        connection_repository: connection_repo,
        transfer_service: Arc::new(transfer_service),
        spotify,
    };

    let router = build_router(app_state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&config.server_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.server_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");

    state_repo.shutdown();
    tracing::info!("Server stopped");
}
