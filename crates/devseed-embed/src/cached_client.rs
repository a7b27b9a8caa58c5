use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use devseed_core::config::Secret;
use devseed_core::error::{Error, Result};

use crate::cache::{request_key, CacheEntry, ResponseCache};

#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub status: u16,
    pub body: String,
    pub from_cache: bool,
}

impl CachedResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| Error::Decode(e.to_string()))
    }
}

/// HTTP client that answers repeated requests from a [`ResponseCache`].
/// Only successful responses are stored.
pub struct CachedClient {
    http: Client,
    cache: ResponseCache,
}

impl CachedClient {
    pub fn new(http: Client, cache: ResponseCache) -> Self {
        Self { http, cache }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub async fn post_json<B: Serialize + ?Sized>(&self, url: &str, bearer: &Secret, body: &B) -> Result<CachedResponse> {
        let payload = serde_json::to_vec(body).map_err(|e| Error::Decode(format!("request body: {e}")))?;
        let key = request_key("POST", url, &payload);

        if let Some(entry) = self.cache.get(&key)? {
            debug!(url, key = %key, "cache hit");
            return Ok(CachedResponse { status: entry.status, body: entry.body, from_cache: true });
        }

        debug!(url, key = %key, "cache miss");
        let response = self
            .http
            .post(url)
            .bearer_auth(bearer.expose())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            self.cache.put(&key, &CacheEntry { status: status.as_u16(), body: body.clone(), cached_at: Utc::now() })?;
        }
        Ok(CachedResponse { status: status.as_u16(), body, from_cache: false })
    }
}
