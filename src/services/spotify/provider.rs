use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use tracing::{info, warn};

use crate::{
    application::{
        error::ApplicationError, repositories::connection_repository::ConnectionRepository,
        services::Provider,
    },
    domain::{
        config::spotify::SpotifyConfig,
        models::{
            connection::Connection,
            playlist::{Playlist, Track},
        },
    },
    services::{
        error::ProviderError,
        spotify::{
            token::{exchange_code, OAuthToken, TokenSession},
            types::{PlaylistDetail, PlaylistsPage, TrackDetail, TracksPage, UserProfile},
        },
    },
};

pub const SPOTIFY_PROVIDER_NAME: &str = "spotify";

const PLAYLISTS_PAGE_SIZE: u32 = 50;
const TRACKS_PAGE_SIZE: u32 = 100;

pub struct SpotifyProvider {
    config: SpotifyConfig,
    authorize_endpoint: Url,
    client: Client,
    connections: Arc<dyn ConnectionRepository>,
}

impl SpotifyProvider {
    pub fn new(
        config: SpotifyConfig,
        connections: Arc<dyn ConnectionRepository>,
    ) -> Result<Self, ProviderError> {
        let authorize_endpoint = Url::parse(&config.authorize_url())
            .map_err(|e| ProviderError::InternalError(format!("Invalid accounts URL: {}", e)))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::InternalError(e.to_string()))?;

        Ok(Self {
            config,
            authorize_endpoint,
            client,
            connections,
        })
    }

    /// Authorization redirect carrying `state` and the registered scopes.
    pub fn auth_url(&self, state: &str) -> String {
        let mut url = self.authorize_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.config.redirect_url)
            .append_pair("scope", &self.config.scope_string())
            .append_pair("state", state)
            .append_pair("access_type", "offline");
        url.into()
    }

    /// Trades a one-time authorization code for tokens. Never retried.
    pub async fn exchange(&self, code: &str) -> Result<OAuthToken, ApplicationError> {
        Ok(exchange_code(&self.client, &self.config, code).await?)
    }

    /// Looks up the remote identity behind `token` and stores a live connection.
    pub async fn save_connection(
        &self,
        user_id: &str,
        token: OAuthToken,
    ) -> Result<Connection, ApplicationError> {
        let profile_url = format!("{}/me", self.config.api_base);
        let mut session = TokenSession::new(&self.client, &self.config, token);
        let profile: UserProfile = session.get_json(&profile_url).await?;
        let token = session.token().clone();

        let scopes = if token.scopes.is_empty() {
            self.config.scopes.clone()
        } else {
            token.scopes
        };

        let connection = Connection {
            provider: SPOTIFY_PROVIDER_NAME.to_string(),
            user_id: user_id.to_string(),
            external_user_name: profile.display_name.unwrap_or_else(|| profile.id.clone()),
            external_user_id: profile.id,
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: token.expires_at,
            scopes,
            connected: true,
            ..Connection::default()
        };

        let saved = self.connections.save(connection).await?;
        info!(
            "Spotify account '{}' connected for user {}",
            saved.external_user_id, user_id
        );
        Ok(saved)
    }

    /// Forgets the stored credential for `user_id`.
    pub async fn disconnect(&self, user_id: &str) -> Result<(), ApplicationError> {
        self.connections
            .delete(SPOTIFY_PROVIDER_NAME, user_id)
            .await?;
        info!("Spotify disconnected for user {}", user_id);
        Ok(())
    }

    pub async fn connection_status(
        &self,
        user_id: &str,
    ) -> Result<Option<Connection>, ApplicationError> {
        match self.connections.get(SPOTIFY_PROVIDER_NAME, user_id).await {
            Ok(connection) => Ok(Some(connection)),
            Err(ApplicationError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn usable_connection(&self, user_id: &str) -> Result<Connection, ApplicationError> {
        let connection = self
            .connections
            .get(SPOTIFY_PROVIDER_NAME, user_id)
            .await
            .map_err(|e| match e {
                ApplicationError::NotFound(_) => {
                    ApplicationError::NotAuthenticated("not connected to Spotify".to_string())
                }
                other => other,
            })?;

        if !connection.is_usable() {
            return Err(ApplicationError::NotAuthenticated(
                "Spotify connection not active".to_string(),
            ));
        }
        Ok(connection)
    }

    /// Writes a rotated token back to the store. Runs once per outward call.
    async fn persist_rotation(
        &self,
        mut connection: Connection,
        token: &OAuthToken,
    ) -> Result<(), ApplicationError> {
        if !token.differs_from(&connection) {
            return Ok(());
        }

        connection.access_token = token.access_token.clone();
        if !token.refresh_token.is_empty() {
            connection.refresh_token = token.refresh_token.clone();
        }
        connection.expires_at = token.expires_at;

        self.connections.update(connection).await.map_err(|e| {
            warn!("Failed to persist rotated Spotify token: {}", e);
            e
        })?;
        info!("Persisted rotated Spotify token");
        Ok(())
    }

    /// Follows a pagination link only when it stays on the Web API host and
    /// has not been fetched already.
    fn next_page(&self, next: Option<String>, visited: &HashSet<String>) -> Option<String> {
        let url = next?;
        if !url.starts_with(&format!("{}/", self.config.api_base)) {
            warn!("Ignoring pagination link outside the Web API: {}", url);
            return None;
        }
        if visited.contains(&url) {
            warn!("Pagination link repeats, stopping at {}", url);
            return None;
        }
        Some(url)
    }

    async fn fetch_playlists(
        &self,
        session: &mut TokenSession<'_>,
    ) -> Result<Vec<Playlist>, ProviderError> {
        let mut playlists = Vec::new();
        let mut next = Some(format!(
            "{}/me/playlists?limit={}",
            self.config.api_base, PLAYLISTS_PAGE_SIZE
        ));

        let mut visited = HashSet::new();

        while let Some(url) = next {
            let page: PlaylistsPage = session.get_json(&url).await?;
            visited.insert(url);
            for item in page.items {
                let mut playlist = Playlist::new(item.id, item.name, SPOTIFY_PROVIDER_NAME);
                playlist.description = item.description.unwrap_or_default();
                playlist.track_count = item.tracks.map_or(0, |t| t.total);
                playlists.push(playlist);
            }
            next = self.next_page(page.next, &visited);
        }

        Ok(playlists)
    }

    async fn fetch_playlist(
        &self,
        session: &mut TokenSession<'_>,
        playlist_id: &str,
    ) -> Result<Playlist, ProviderError> {
        let detail_url = format!("{}/playlists/{}", self.config.api_base, playlist_id);
        let detail: PlaylistDetail = session.get_json(&detail_url).await?;

        let mut playlist = Playlist::new(detail.id, detail.name, SPOTIFY_PROVIDER_NAME);
        playlist.description = detail.description.unwrap_or_default();

        let mut tracks = Vec::new();
        let mut next = Some(format!(
            "{}/playlists/{}/tracks?limit={}",
            self.config.api_base, playlist_id, TRACKS_PAGE_SIZE
        ));

        let mut visited = HashSet::new();

        while let Some(url) = next {
            let page: TracksPage = session.get_json(&url).await?;
            visited.insert(url);
            tracks.extend(page.items.into_iter().filter_map(|item| item.track.and_then(to_track)));
            next = self.next_page(page.next, &visited);
        }

        let reported = detail.tracks.map_or(0, |t| t.total);
        playlist = playlist.with_tracks(tracks);
        if reported != playlist.track_count {
            info!(
                "Playlist {} reports {} tracks, {} exported",
                playlist_id, reported, playlist.track_count
            );
        }
        playlist.updated_at = Utc::now();
        Ok(playlist)
    }
}

fn to_track(detail: TrackDetail) -> Option<Track> {
    let id = detail.id.filter(|id| !id.is_empty())?;
    let artist = detail
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Some(Track {
        id,
        title: detail.name,
        artist,
        album: detail.album.map(|a| a.name).unwrap_or_default(),
        duration: (detail.duration_ms / 1000) as u32,
        isrc: detail
            .external_ids
            .and_then(|ids| ids.isrc)
            .filter(|isrc| !isrc.is_empty()),
    })
}

#[async_trait]
impl Provider for SpotifyProvider {
    fn name(&self) -> &str {
        SPOTIFY_PROVIDER_NAME
    }

    async fn authenticate(&self, user_id: &str) -> Result<(), ApplicationError> {
        self.usable_connection(user_id).await.map(|_| ())
    }

    async fn get_playlists(&self, user_id: &str) -> Result<Vec<Playlist>, ApplicationError> {
        let connection = self.usable_connection(user_id).await?;
        let mut session = TokenSession::new(
            &self.client,
            &self.config,
            OAuthToken::from_connection(&connection),
        );

        let result = self.fetch_playlists(&mut session).await;
        self.persist_rotation(connection, session.token()).await?;
        Ok(result?)
    }

    async fn export_playlist(
        &self,
        user_id: &str,
        playlist_id: &str,
    ) -> Result<Playlist, ApplicationError> {
        let connection = self.usable_connection(user_id).await?;
        let mut session = TokenSession::new(
            &self.client,
            &self.config,
            OAuthToken::from_connection(&connection),
        );

        let result = self.fetch_playlist(&mut session, playlist_id).await;
        self.persist_rotation(connection, session.token()).await?;
        Ok(result?)
    }

    async fn import_playlist(
        &self,
        user_id: &str,
        _playlist: Playlist,
    ) -> Result<(), ApplicationError> {
        self.usable_connection(user_id).await?;
        Err(ApplicationError::Unsupported(
            "importing to Spotify is not supported".to_string(),
        ))
    }
}
