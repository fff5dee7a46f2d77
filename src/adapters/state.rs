use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    application::{
        repositories::{
            connection_repository::ConnectionRepository, state_repository::StateRepository,
        },
        services::TransferService,
    },
    services::spotify::SpotifyProvider,
};

/// The local principal every request acts for.
#[derive(Clone)]
pub struct CurrentUser(pub String);

#[derive(Clone, FromRef)]
pub struct AppState {
    pub current_user: CurrentUser,
    pub state_repository: Arc<dyn StateRepository>,
    pub connection_repository: Arc<dyn ConnectionRepository>,
    pub transfer_service: Arc<TransferService>,
    pub spotify: Option<Arc<SpotifyProvider>>,
}
