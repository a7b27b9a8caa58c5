use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use devseed_core::config::{Secret, Settings};
use devseed_core::error::{Error, Result};
use devseed_core::http::build_client;

use super::{EmbedProvider, Embedding};
use crate::cache::ResponseCache;
use crate::cached_client::CachedClient;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
    model: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f64>,
}

pub struct OpenAiProvider {
    client: CachedClient,
    url: String,
    api_key: Secret,
    model: String,
}

impl OpenAiProvider {
    /// Provider backed by the on-disk cache in `cache_dir`.
    pub fn new(settings: &Settings, cache_dir: &Path) -> Result<Self> {
        let http = build_client(settings.http_timeout)?;
        let client = CachedClient::new(http, ResponseCache::open(cache_dir)?);
        Ok(Self::with_client(client, &settings.openai_base_url, settings.openai_key.clone(), &settings.embedding_model))
    }

    pub fn with_client(client: CachedClient, base_url: &str, api_key: Secret, model: &str) -> Self {
        let url = format!("{}/embeddings", base_url.trim_end_matches('/'));
        Self { client, url, api_key, model: model.to_string() }
    }
}

#[async_trait]
impl EmbedProvider for OpenAiProvider {
    fn model(&self) -> &str { &self.model }

    async fn embed(&self, text: &str) -> Result<Embedding> {
        let request = EmbeddingRequest { input: text, model: &self.model };
        let response = self.client.post_json(&self.url, &self.api_key, &request).await?;
        if !response.is_success() {
            return Err(Error::Http { context: "embedding request".to_string(), status: response.status, body: response.body });
        }
        let parsed: EmbeddingResponse = response.json()?;
        let vector = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| Error::Embedding(format!("{} returned no vectors", self.model)))?;

        if response.from_cache { info!(dim = vector.len(), "used cached embedding"); }
        else { info!(dim = vector.len(), "generated new embedding"); }
        Ok(Embedding { vector, from_cache: response.from_cache })
    }
}
