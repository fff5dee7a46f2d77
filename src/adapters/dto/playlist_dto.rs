use serde::Serialize;

use crate::domain::models::playlist::Playlist;

#[derive(Debug, Serialize)]
pub struct PlaylistListResponse {
    pub provider: String,
    pub playlists: Vec<Playlist>,
}

#[derive(Debug, Serialize)]
pub struct ProviderListResponse {
    pub providers: Vec<String>,
}
