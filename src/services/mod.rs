mod error;
mod mock_provider;
pub mod spotify;

pub use error::ProviderError;
pub use mock_provider::{MockProvider, MOCK_PROVIDER_NAME};

use std::sync::Arc;

use tracing::info;

use crate::{
    application::{
        repositories::connection_repository::ConnectionRepository, services::TransferService,
    },
    domain::config::spotify::SpotifyConfig,
    services::spotify::SpotifyProvider,
};

/// Builds the provider registry.
///
/// The mock provider is always present; Spotify only when it is configured.
pub fn create_providers(
    spotify_config: Option<SpotifyConfig>,
    connections: Arc<dyn ConnectionRepository>,
) -> Result<(TransferService, Option<Arc<SpotifyProvider>>), ProviderError> {
    let mut transfer_service = TransferService::new();
    transfer_service.register(Arc::new(MockProvider::new()));

    let spotify = match spotify_config {
        Some(config) => {
            let provider = Arc::new(SpotifyProvider::new(config, connections)?);
            transfer_service.register(provider.clone());
            info!("Spotify integration enabled");
            Some(provider)
        }
        None => {
            info!("Spotify integration disabled (environment variables not set)");
            None
        }
    };

    Ok((transfer_service, spotify))
}
