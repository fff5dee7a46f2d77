mod provider;
mod token;
mod types;

pub use provider::{SpotifyProvider, SPOTIFY_PROVIDER_NAME};
pub use token::OAuthToken;
