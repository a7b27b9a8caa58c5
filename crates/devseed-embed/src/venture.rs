//! Embedding records for ventures.
//!
//! The embedded text is the venture title and description separated by a
//! blank line. Identical text produces an identical request, which the
//! provider's cache answers without a remote call.
use devseed_core::error::Result;
use devseed_core::types::{EmbeddingRecord, EntityType, VentureRow};

use crate::embed_provider::EmbedProvider;

pub const EMBEDDING_VERSION: &str = "v1";

pub fn venture_text(title: Option<&str>, description: Option<&str>) -> String {
    format!("{}\n\n{}", title.unwrap_or_default(), description.unwrap_or_default())
}

pub async fn embed_venture(user_id: &str, venture: &VentureRow, provider: &dyn EmbedProvider) -> Result<EmbeddingRecord> {
    let text = venture_text(venture.title.as_deref(), venture.description.as_deref());
    let embedding = provider.embed(&text).await?;
    Ok(EmbeddingRecord {
        entity_id: venture.entity_id(),
        user_id: user_id.to_string(),
        entity_type: EntityType::Venture,
        model: provider.model().to_string(),
        vector: embedding.vector,
        version: EMBEDDING_VERSION.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_and_description_are_joined_by_a_blank_line() {
        assert_eq!(venture_text(Some("T"), Some("D")), "T\n\nD");
    }

    #[test]
    fn missing_parts_become_empty() {
        assert_eq!(venture_text(None, Some("D")), "\n\nD");
        assert_eq!(venture_text(Some("T"), None), "T\n\n");
    }
}
