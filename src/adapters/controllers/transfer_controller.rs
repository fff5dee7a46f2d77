use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::{
    adapters::{dto::transfer_dto::TransferRequest, state::CurrentUser},
    application::{
        error::ApplicationError,
        services::{TransferService, TransferSummary},
    },
};

pub struct TransferController;

impl TransferController {
    /// POST /api/v1/transfers
    /// Body: {"source": "mock", "target": "mock", "playlistId": "mock-1"}
    pub async fn create_transfer(
        State(transfer_service): State<Arc<TransferService>>,
        State(CurrentUser(user_id)): State<CurrentUser>,
        Json(body): Json<TransferRequest>,
    ) -> Result<(StatusCode, Json<TransferSummary>), Response> {
        let missing = body.missing_fields();
        if !missing.is_empty() {
            return Err(ApplicationError::BadRequest(format!(
                "missing fields: {}",
                missing.join(", ")
            ))
            .into_response());
        }

        info!(
            "Transfer requested: {} -> {} ({})",
            body.source, body.target, body.playlist_id
        );

        let summary = transfer_service
            .transfer_playlist(&user_id, &body.source, &body.target, &body.playlist_id)
            .await
            .map_err(IntoResponse::into_response)?;

        Ok((StatusCode::CREATED, Json(summary)))
    }
}
