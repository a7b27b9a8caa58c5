use async_trait::async_trait;
use devseed_core::error::Result;

/// A vector for one input text, and whether it was served from the local
/// cache instead of the remote model.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub vector: Vec<f64>,
    pub from_cache: bool,
}

#[async_trait]
pub trait EmbedProvider: Send + Sync {
    /// Model name recorded alongside every stored vector.
    fn model(&self) -> &str;
    /// Compute the embedding of one input text.
    async fn embed(&self, text: &str) -> Result<Embedding>;
}

pub mod openai;
