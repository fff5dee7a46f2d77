use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    application::{error::ApplicationError, repositories::state_repository::StateRepository},
    domain::models::state_token::StateToken,
};

const STATE_TOKEN_BYTES: usize = 32;
const STATE_TTL_MINUTES: i64 = 10;
const SWEEP_INTERVAL_SECS: u64 = 5 * 60;

type StateMap = Arc<Mutex<HashMap<String, DateTime<Utc>>>>;

/// Process-local store of issued OAuth state tokens.
///
/// A background task discards expired entries every sweep interval; it is
/// stopped by [`InMemoryStateRepository::shutdown`] or when the repository is
/// dropped.
pub struct InMemoryStateRepository {
    states: StateMap,
    ttl: Duration,
    sweeper: CancellationToken,
}

impl InMemoryStateRepository {
    /// Must be called from within a tokio runtime.
    pub fn new() -> Self {
        Self::with_settings(
            Duration::minutes(STATE_TTL_MINUTES),
            std::time::Duration::from_secs(SWEEP_INTERVAL_SECS),
        )
    }

    pub fn with_settings(ttl: Duration, sweep_interval: std::time::Duration) -> Self {
        let states: StateMap = Arc::new(Mutex::new(HashMap::new()));
        let sweeper = CancellationToken::new();

        tokio::spawn(sweep_loop(states.clone(), sweep_interval, sweeper.clone()));

        Self {
            states,
            ttl,
            sweeper,
        }
    }

    /// Number of issued, unconsumed tokens not yet swept.
    pub async fn pending(&self) -> usize {
        self.states.lock().await.len()
    }

    pub fn shutdown(&self) {
        self.sweeper.cancel();
    }
}

impl Drop for InMemoryStateRepository {
    fn drop(&mut self) {
        self.sweeper.cancel();
    }
}

async fn sweep_loop(states: StateMap, every: std::time::Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(every);
    // the first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("State sweep stopped");
                return;
            }
            _ = ticker.tick() => {
                let now = Utc::now();
                let mut guard = states.lock().await;
                let before = guard.len();
                guard.retain(|_, expires_at| now < *expires_at);
                let removed = before - guard.len();
                if removed > 0 {
                    info!("Swept {} expired OAuth state tokens", removed);
                }
            }
        }
    }
}

fn random_token() -> Result<String, ApplicationError> {
    let mut bytes = [0u8; STATE_TOKEN_BYTES];
    OsRng.try_fill_bytes(&mut bytes).map_err(|e| {
        warn!("OS random source failed: {}", e);
        ApplicationError::RandomSourceFailure(e.to_string())
    })?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

#[async_trait]
impl StateRepository for InMemoryStateRepository {
    async fn generate(&self) -> Result<StateToken, ApplicationError> {
        let value = random_token()?;
        let expires_at = Utc::now() + self.ttl;

        self.states.lock().await.insert(value.clone(), expires_at);
        debug!("Issued OAuth state token expiring at {}", expires_at);

        Ok(StateToken { value, expires_at })
    }

    async fn validate(&self, token: &str) -> bool {
        // removal and the expiry check happen under one lock acquisition
        let removed = self.states.lock().await.remove(token);

        match removed {
            Some(expires_at) if Utc::now() < expires_at => true,
            Some(_) => {
                warn!("Expired OAuth state token presented");
                false
            }
            None => {
                warn!("Unknown or already consumed OAuth state token");
                false
            }
        }
    }
}
