//! CFBD API client with rate limiting.

use crate::error::{DataError, Result};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};

use super::types::{EloRating, Game, GameLines};

/// CFBD API base URL
const CFBD_BASE_URL: &str = "https://api.collegefootballdata.com";

/// Default courtesy rate limit: one request per second
const DEFAULT_RATE_LIMIT: Duration = Duration::from_secs(1);

/// Rate limiter enforcing a minimum interval between requests
pub(crate) struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    pub(crate) fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    pub(crate) async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// Authenticated CFBD API client.
///
/// Requests are serialized through the rate limiter; there is no retry or
/// backoff. A non-success status maps to [`DataError::Api`].
pub struct CfbdClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    base_url: String,
}

impl CfbdClient {
    /// Create a client from the `CFBD_API_KEY` environment variable.
    ///
    /// # Errors
    /// Returns [`DataError::MissingApiKey`] when the variable is unset or
    /// empty. This is the only fatal configuration error in the fetch
    /// stage.
    pub fn from_env() -> Result<Self> {
        let key = std::env::var("CFBD_API_KEY").unwrap_or_default();
        Self::with_api_key(&key, DEFAULT_RATE_LIMIT)
    }

    /// Create a client with an explicit key and rate limit.
    ///
    /// # Arguments
    /// * `api_key` - CFBD bearer token; an empty token is rejected
    /// * `min_interval` - Minimum duration between requests
    pub fn with_api_key(api_key: &str, min_interval: Duration) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(DataError::MissingApiKey);
        }

        let mut headers = reqwest::header::HeaderMap::new();
        let mut auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| DataError::InvalidApiKey)?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(min_interval))),
            base_url: CFBD_BASE_URL.to_string(),
        })
    }

    /// One GET request against an endpoint with a year query parameter.
    async fn get_year<T: DeserializeOwned>(&self, endpoint: &str, year: i32) -> Result<Vec<T>> {
        self.rate_limiter.lock().await.wait().await;

        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(&[("year", year)])
            .send()
            .await
            .map_err(DataError::Network)?;

        if !response.status().is_success() {
            return Err(DataError::Api {
                endpoint: endpoint.to_string(),
                status: response.status(),
            });
        }

        let records: Vec<T> = response.json().await.map_err(DataError::Network)?;
        Ok(records)
    }

    /// Fetch one season of games from `/games`.
    pub async fn games(&self, year: i32) -> Result<Vec<Game>> {
        self.get_year("/games", year).await
    }

    /// Fetch one season of team Elo ratings from `/ratings/elo`.
    pub async fn elo(&self, year: i32) -> Result<Vec<EloRating>> {
        self.get_year("/ratings/elo", year).await
    }

    /// Fetch one season of betting lines from `/lines`.
    pub async fn lines(&self, year: i32) -> Result<Vec<GameLines>> {
        self.get_year("/lines", year).await
    }
}

impl std::fmt::Debug for CfbdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CfbdClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
