use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single song as carried between providers.
///
/// Fields a remote API does not supply stay at their zero value.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    /// Multiple artists are joined with `", "`.
    pub artist: String,
    pub album: String,
    /// Length in whole seconds.
    pub duration: u32,
    pub isrc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tracks: Vec<Track>,
    #[serde(rename = "trackCount")]
    pub track_count: usize,
    pub provider: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    /// A playlist with no tracks, stamped with the current time.
    pub fn new(id: impl Into<String>, name: impl Into<String>, provider: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            tracks: Vec::new(),
            track_count: 0,
            provider: provider.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_tracks(mut self, tracks: Vec<Track>) -> Self {
        self.track_count = tracks.len();
        self.tracks = tracks;
        self
    }
}
