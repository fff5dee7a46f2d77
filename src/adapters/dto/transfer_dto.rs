use serde::Deserialize;

/// Absent fields deserialize as empty and are reported by [`TransferRequest::missing_fields`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TransferRequest {
    pub source: String,
    pub target: String,
    #[serde(rename = "playlistId")]
    pub playlist_id: String,
}

impl TransferRequest {
    /// Names of the fields left blank, if any.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("source", &self.source),
            ("target", &self.target),
            ("playlistId", &self.playlist_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}
