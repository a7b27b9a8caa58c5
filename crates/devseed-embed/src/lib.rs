pub mod cache;
pub mod cached_client;
pub mod embed_provider;
pub mod venture;

pub use cache::ResponseCache;
pub use cached_client::{CachedClient, CachedResponse};
pub use embed_provider::openai::OpenAiProvider;
pub use embed_provider::{EmbedProvider, Embedding};
pub use venture::{embed_venture, venture_text};
