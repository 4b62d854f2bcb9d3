//! Embedding generation via the OpenAI API.

pub mod openai;
pub mod provider;

pub use openai::OpenAIEmbedder;
pub use provider::EmbeddingProvider;
