use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// One page of `/me/playlists`.
#[derive(Debug, Deserialize)]
pub struct PlaylistsPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tracks: Option<TracksInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TracksInfo {
    #[serde(default)]
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tracks: Option<TracksInfo>,
}

/// One page of `/playlists/{id}/tracks`.
#[derive(Debug, Deserialize)]
pub struct TracksPage {
    #[serde(default)]
    pub items: Vec<TrackItem>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrackItem {
    // null for tracks removed from the catalogue
    #[serde(default)]
    pub track: Option<TrackDetail>,
}

#[derive(Debug, Deserialize)]
pub struct TrackDetail {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub album: Option<AlbumInfo>,
    #[serde(default)]
    pub artists: Vec<ArtistInfo>,
    #[serde(default)]
    pub external_ids: Option<ExternalIds>,
}

#[derive(Debug, Deserialize)]
pub struct AlbumInfo {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ArtistInfo {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ExternalIds {
    #[serde(default)]
    pub isrc: Option<String>,
}
