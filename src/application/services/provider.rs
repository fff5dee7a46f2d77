use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::models::playlist::Playlist};

/// Capability set every music platform integration exposes.
///
/// Paginated remote APIs are followed to exhaustion inside the implementation;
/// callers always receive fully materialized sequences.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier, used as the registry and connection key.
    fn name(&self) -> &str;

    /// Fails with `NotAuthenticated` when `user_id` holds no usable credential.
    async fn authenticate(&self, user_id: &str) -> Result<(), ApplicationError>;

    async fn get_playlists(&self, user_id: &str) -> Result<Vec<Playlist>, ApplicationError>;

    /// Returns the playlist with its full track list.
    async fn export_playlist(
        &self,
        user_id: &str,
        playlist_id: &str,
    ) -> Result<Playlist, ApplicationError>;

    /// Stores a copy of `playlist` under a new identity owned by this provider.
    async fn import_playlist(
        &self,
        user_id: &str,
        playlist: Playlist,
    ) -> Result<(), ApplicationError>;
}
