use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::{
    application::{error::ApplicationError, services::Provider},
    domain::models::playlist::{Playlist, Track},
};

pub const MOCK_PROVIDER_NAME: &str = "mock";

/// In-memory provider seeded with sample playlists.
pub struct MockProvider {
    name: String,
    authenticated: bool,
    playlists: RwLock<Vec<Playlist>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::named(MOCK_PROVIDER_NAME)
    }

    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            authenticated: true,
            playlists: RwLock::new(sample_playlists(name)),
        }
    }

    /// With `false`, every operation fails with `NotAuthenticated`.
    pub fn with_authentication(mut self, authenticated: bool) -> Self {
        self.authenticated = authenticated;
        self
    }

    fn ensure_authenticated(&self) -> Result<(), ApplicationError> {
        if self.authenticated {
            Ok(())
        } else {
            Err(ApplicationError::NotAuthenticated(format!(
                "no session for provider '{}'",
                self.name
            )))
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn authenticate(&self, _user_id: &str) -> Result<(), ApplicationError> {
        self.ensure_authenticated()
    }

    async fn get_playlists(&self, _user_id: &str) -> Result<Vec<Playlist>, ApplicationError> {
        self.ensure_authenticated()?;
        Ok(self.playlists.read().await.clone())
    }

    async fn export_playlist(
        &self,
        _user_id: &str,
        playlist_id: &str,
    ) -> Result<Playlist, ApplicationError> {
        self.ensure_authenticated()?;
        self.playlists
            .read()
            .await
            .iter()
            .find(|p| p.id == playlist_id)
            .cloned()
            .ok_or_else(|| ApplicationError::NotFound(format!("playlist {}", playlist_id)))
    }

    async fn import_playlist(
        &self,
        _user_id: &str,
        playlist: Playlist,
    ) -> Result<(), ApplicationError> {
        self.ensure_authenticated()?;

        let now = Utc::now();
        let mut imported = playlist;
        imported.id = format!("{}-imported-{}", self.name, Uuid::new_v4());
        imported.provider = self.name.clone();
        imported.track_count = imported.tracks.len();
        imported.created_at = now;
        imported.updated_at = now;

        info!(
            "Imported playlist '{}' into '{}' as {}",
            imported.name, self.name, imported.id
        );
        self.playlists.write().await.push(imported);
        Ok(())
    }
}

fn track(id: &str, title: &str, artist: &str, album: &str, duration: u32, isrc: &str) -> Track {
    Track {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        album: album.to_string(),
        duration,
        isrc: Some(isrc.to_string()),
    }
}

fn sample_playlists(provider: &str) -> Vec<Playlist> {
    let now = Utc::now();
    let sample = |id: &str, name: &str, description: &str, age: Duration, tracks: Vec<Track>| {
        let mut playlist = Playlist::new(id, name, provider).with_tracks(tracks);
        playlist.description = description.to_string();
        playlist.created_at = now - age;
        playlist
    };

    vec![
        sample(
            "mock-1",
            "Summer Vibes 2024",
            "Perfect tunes for summer",
            Duration::days(60),
            vec![
                track("track-1", "Sunshine Day", "The Happy Band", "Good Times", 180, "MOCK12345001"),
                track("track-2", "Beach Walk", "Ocean Sounds", "Coastal Dreams", 240, "MOCK12345002"),
                track("track-3", "Summer Breeze", "Wind Chasers", "Season Collection", 195, "MOCK12345003"),
            ],
        ),
        sample(
            "mock-2",
            "Workout Mix",
            "High energy tracks to keep you moving",
            Duration::days(30),
            vec![
                track("track-4", "Power Up", "Energy Squad", "Motivation", 210, "MOCK12345004"),
                track("track-5", "Push Harder", "Fitness Beats", "Gym Anthems", 195, "MOCK12345005"),
            ],
        ),
        sample(
            "mock-3",
            "Chill Evening",
            "Relaxing music for winding down",
            Duration::days(15),
            vec![track("track-6", "Moonlight", "Ambient Dreams", "Night Sky", 300, "MOCK12345006")],
        ),
    ]
}
