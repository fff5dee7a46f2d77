use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::{error::ApplicationError, services::TransferError};

const RECONNECT_MESSAGE: &str = "Please connect your account and try again";

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApplicationError::NotFound(ref msg) => {
                warn!("Resource not found: {}", msg);
                (StatusCode::NOT_FOUND, "Resource not found".to_string())
            }
            ApplicationError::NotAuthenticated(ref msg) => {
                warn!("Not authenticated: {}", msg);
                (StatusCode::UNAUTHORIZED, RECONNECT_MESSAGE.to_string())
            }
            ApplicationError::InvalidInput(ref msg) | ApplicationError::BadRequest(ref msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "Bad request".to_string())
            }
            ApplicationError::InvalidState => {
                warn!("Invalid or expired OAuth state");
                (StatusCode::BAD_REQUEST, "Invalid state parameter".to_string())
            }
            ApplicationError::Unsupported(ref msg) => {
                warn!("Unsupported operation: {}", msg);
                (StatusCode::NOT_IMPLEMENTED, msg.clone())
            }
            ApplicationError::ServiceUnavailable(ref msg) => {
                warn!("Service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, msg.clone())
            }
            ApplicationError::ExchangeFailed { status, ref body } => {
                error!("Token exchange failed with status {:?}: {}", status, body);
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to exchange authorization code".to_string(),
                )
            }
            ApplicationError::FetchFailed { status, ref body }
            | ApplicationError::WriteFailed { status, ref body } => {
                error!("Upstream provider call failed with status {:?}: {}", status, body);
                (
                    StatusCode::BAD_GATEWAY,
                    "Upstream provider error".to_string(),
                )
            }
            ApplicationError::RandomSourceFailure(ref msg) => {
                error!("Random source failure: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApplicationError::InternalError(ref msg) => {
                error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl IntoResponse for TransferError {
    fn into_response(self) -> Response {
        let (status, stage) = match &self {
            TransferError::ProviderNotFound(name) => {
                warn!("Transfer references unknown provider '{}'", name);
                (StatusCode::NOT_FOUND, "provider")
            }
            TransferError::SourceAuthFailed(cause) => {
                warn!("Transfer source authentication failed: {}", cause);
                (StatusCode::UNAUTHORIZED, "source_auth")
            }
            TransferError::TargetAuthFailed(cause) => {
                warn!("Transfer target authentication failed: {}", cause);
                (StatusCode::UNAUTHORIZED, "target_auth")
            }
            TransferError::ExportFailed(cause) => {
                error!("Transfer export failed: {}", cause);
                (StatusCode::BAD_GATEWAY, "export")
            }
            TransferError::ImportFailed(cause) => {
                error!("Transfer import failed: {}", cause);
                (StatusCode::BAD_GATEWAY, "import")
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
            "stage": stage,
        }));

        (status, body).into_response()
    }
}
