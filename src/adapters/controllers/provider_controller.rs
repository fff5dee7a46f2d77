use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::{
    adapters::{
        dto::playlist_dto::{PlaylistListResponse, ProviderListResponse},
        state::CurrentUser,
    },
    application::{
        error::ApplicationError,
        services::{Provider, TransferService},
    },
    domain::models::playlist::Playlist,
};

pub struct ProviderController;

fn lookup(
    transfer_service: &TransferService,
    name: &str,
) -> Result<Arc<dyn Provider>, ApplicationError> {
    transfer_service
        .get_provider(name)
        .map_err(|e| ApplicationError::NotFound(e.to_string()))
}

impl ProviderController {
    /// GET /api/v1/providers
    pub async fn list_providers(
        State(transfer_service): State<Arc<TransferService>>,
    ) -> Json<ProviderListResponse> {
        Json(ProviderListResponse {
            providers: transfer_service.list_providers(),
        })
    }

    /// GET /api/v1/providers/{name}/playlists
    pub async fn get_playlists(
        State(transfer_service): State<Arc<TransferService>>,
        State(CurrentUser(user_id)): State<CurrentUser>,
        Path(name): Path<String>,
    ) -> Result<Json<PlaylistListResponse>, ApplicationError> {
        let provider = lookup(&transfer_service, &name)?;
        provider.authenticate(&user_id).await?;

        let playlists = provider.get_playlists(&user_id).await?;
        info!("Fetched {} playlists from '{}'", playlists.len(), name);

        Ok(Json(PlaylistListResponse {
            provider: name,
            playlists,
        }))
    }

    /// GET /api/v1/providers/{name}/playlists/{playlist_id}
    pub async fn export_playlist(
        State(transfer_service): State<Arc<TransferService>>,
        State(CurrentUser(user_id)): State<CurrentUser>,
        Path((name, playlist_id)): Path<(String, String)>,
    ) -> Result<Json<Playlist>, ApplicationError> {
        let provider = lookup(&transfer_service, &name)?;
        provider.authenticate(&user_id).await?;

        let playlist = provider.export_playlist(&user_id, &playlist_id).await?;
        Ok(Json(playlist))
    }
}
