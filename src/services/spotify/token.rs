use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    domain::{config::spotify::SpotifyConfig, models::connection::Connection},
    services::{error::ProviderError, spotify::types::TokenResponse},
};

/// Tokens are refreshed this long before their recorded expiry.
const EXPIRY_LEEWAY_SECS: i64 = 10;

/// Access/refresh token pair as issued by the accounts service.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthToken {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub scopes: Vec<String>,
}

impl OAuthToken {
    fn from_response(response: TokenResponse, previous_refresh: &str) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response
                .refresh_token
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| previous_refresh.to_string()),
            // an out-of-range lifetime is treated as no recorded expiry
            expires_at: response
                .expires_in
                .and_then(Duration::try_seconds)
                .and_then(|lifetime| Utc::now().checked_add_signed(lifetime)),
            scopes: response
                .scope
                .map(|s| s.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }

    pub fn from_connection(connection: &Connection) -> Self {
        Self {
            access_token: connection.access_token.clone(),
            refresh_token: connection.refresh_token.clone(),
            expires_at: connection.expires_at,
            scopes: connection.scopes.clone(),
        }
    }

    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .is_some_and(|expiry| expiry - Duration::seconds(EXPIRY_LEEWAY_SECS) <= now)
    }

    /// True when the access token or its expiry differs from what `connection` holds.
    pub fn differs_from(&self, connection: &Connection) -> bool {
        self.access_token != connection.access_token || self.expires_at != connection.expires_at
    }
}

/// Trades an authorization code for tokens. Called once per code.
pub async fn exchange_code(
    client: &Client,
    config: &SpotifyConfig,
    code: &str,
) -> Result<OAuthToken, ProviderError> {
    let response = client
        .post(config.token_url())
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_url.as_str()),
        ])
        .send()
        .await
        .map_err(|e| ProviderError::Exchange {
            status: None,
            body: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("Authorization code exchange rejected with status {}", status);
        return Err(ProviderError::Exchange {
            status: Some(status.as_u16()),
            body,
        });
    }

    let token_response: TokenResponse =
        response.json().await.map_err(|e| ProviderError::Exchange {
            status: Some(status.as_u16()),
            body: e.to_string(),
        })?;

    info!("Authorization code exchanged for tokens");
    Ok(OAuthToken::from_response(token_response, ""))
}

async fn refresh(
    client: &Client,
    config: &SpotifyConfig,
    token: &OAuthToken,
) -> Result<OAuthToken, ProviderError> {
    let response = client
        .post(config.token_url())
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", token.refresh_token.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("Token refresh rejected with status {}: {}", status, body);
        return Err(ProviderError::Unauthorized(format!(
            "token refresh rejected with status {}",
            status
        )));
    }

    let token_response: TokenResponse = response.json().await?;
    let mut refreshed = OAuthToken::from_response(token_response, &token.refresh_token);
    if refreshed.scopes.is_empty() {
        refreshed.scopes = token.scopes.clone();
    }
    Ok(refreshed)
}

/// Bearer-authenticated HTTP access that rotates the access token when it
/// is about to expire.
///
/// One session lives for one outward provider call; the caller compares
/// [`TokenSession::token`] against the stored connection afterwards.
pub struct TokenSession<'a> {
    client: &'a Client,
    config: &'a SpotifyConfig,
    token: OAuthToken,
}

impl<'a> TokenSession<'a> {
    pub fn new(client: &'a Client, config: &'a SpotifyConfig, token: OAuthToken) -> Self {
        Self {
            client,
            config,
            token,
        }
    }

    pub fn token(&self) -> &OAuthToken {
        &self.token
    }

    async fn ensure_fresh(&mut self) -> Result<(), ProviderError> {
        if !self.token.needs_refresh(Utc::now()) {
            return Ok(());
        }
        if self.token.refresh_token.is_empty() {
            return Err(ProviderError::Unauthorized(
                "access token expired and no refresh token is available".to_string(),
            ));
        }

        debug!("Access token expired, refreshing");
        self.token = refresh(self.client, self.config, &self.token).await?;
        info!("Access token refreshed");
        Ok(())
    }

    pub async fn get_json<T: DeserializeOwned>(&mut self, url: &str) -> Result<T, ProviderError> {
        self.ensure_fresh().await?;

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token.access_token)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(ProviderError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("GET {} failed with status {}: {}", url, status, body);
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
