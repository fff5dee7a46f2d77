use std::{collections::HashMap, sync::Arc};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::application::{error::ApplicationError, services::provider::Provider};

/// Names the leg of a transfer that failed.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("provider not found: {0}")]
    ProviderNotFound(String),

    #[error("source authentication failed")]
    SourceAuthFailed(#[source] ApplicationError),

    #[error("target authentication failed")]
    TargetAuthFailed(#[source] ApplicationError),

    #[error("export failed")]
    ExportFailed(#[source] ApplicationError),

    #[error("import failed")]
    ImportFailed(#[source] ApplicationError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferSummary {
    pub source: String,
    pub target: String,
    #[serde(rename = "playlistName")]
    pub playlist_name: String,
    #[serde(rename = "trackCount")]
    pub track_count: usize,
}

/// Registry of providers plus the two-party transfer flow.
#[derive(Default)]
pub struct TransferService {
    providers: HashMap<String, Arc<dyn Provider>>,
}

impl TransferService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider` under its name, replacing any previous entry.
    pub fn register(&mut self, provider: Arc<dyn Provider>) {
        info!("Registering provider '{}'", provider.name());
        self.providers.insert(provider.name().to_string(), provider);
    }

    pub fn get_provider(&self, name: &str) -> Result<Arc<dyn Provider>, TransferError> {
        self.providers
            .get(name)
            .cloned()
            .ok_or_else(|| TransferError::ProviderNotFound(name.to_string()))
    }

    pub fn list_providers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Copies one playlist from `source` to `target` for `user_id`.
    ///
    /// Both sides are authenticated before any data is read. Nothing is staged:
    /// a failed import discards the exported playlist.
    pub async fn transfer_playlist(
        &self,
        user_id: &str,
        source: &str,
        target: &str,
        playlist_id: &str,
    ) -> Result<TransferSummary, TransferError> {
        let source_provider = self.get_provider(source)?;
        let target_provider = self.get_provider(target)?;

        info!(
            "Starting transfer of playlist {} from '{}' to '{}'",
            playlist_id, source, target
        );

        source_provider
            .authenticate(user_id)
            .await
            .map_err(|e| {
                warn!("Source '{}' authentication failed: {}", source, e);
                TransferError::SourceAuthFailed(e)
            })?;

        target_provider
            .authenticate(user_id)
            .await
            .map_err(|e| {
                warn!("Target '{}' authentication failed: {}", target, e);
                TransferError::TargetAuthFailed(e)
            })?;

        let playlist = source_provider
            .export_playlist(user_id, playlist_id)
            .await
            .map_err(|e| {
                warn!("Export of {} from '{}' failed: {}", playlist_id, source, e);
                TransferError::ExportFailed(e)
            })?;

        let summary = TransferSummary {
            source: source.to_string(),
            target: target.to_string(),
            playlist_name: playlist.name.clone(),
            track_count: playlist.tracks.len(),
        };

        target_provider
            .import_playlist(user_id, playlist)
            .await
            .map_err(|e| {
                warn!("Import into '{}' failed: {}", target, e);
                TransferError::ImportFailed(e)
            })?;

        info!(
            "Transferred '{}' ({} tracks) from '{}' to '{}'",
            summary.playlist_name, summary.track_count, source, target
        );
        Ok(summary)
    }
}
