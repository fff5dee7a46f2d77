use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{
    adapters::{dto::connection_dto::ConnectionResponse, state::CurrentUser},
    application::{
        error::ApplicationError, repositories::connection_repository::ConnectionRepository,
    },
};

pub struct ConnectionController;

impl ConnectionController {
    /// GET /api/v1/connections
    pub async fn list_connections(
        State(CurrentUser(user_id)): State<CurrentUser>,
        State(connection_repo): State<Arc<dyn ConnectionRepository>>,
    ) -> Result<Json<Vec<ConnectionResponse>>, ApplicationError> {
        let mut connections = connection_repo.list(&user_id).await?;
        connections.sort_by(|a, b| a.provider.cmp(&b.provider));
        Ok(Json(connections.into_iter().map(ConnectionResponse::from).collect()))
    }
}
