//! Embedding provider trait.

use crate::types::Result;
use async_trait::async_trait;

/// Text embedding provider.
///
/// Abstraction over embedding backends so the pipeline and vector store
/// depend only on dimensions and the embed operations.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text.
    ///
    /// # Arguments
    ///
    /// * `text` - Input text
    ///
    /// # Returns
    ///
    /// Embedding vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts.
    ///
    /// # Arguments
    ///
    /// * `texts` - Input texts
    ///
    /// # Returns
    ///
    /// One embedding vector per input, in input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embedding dimensionality for this provider's model.
    fn dimensions(&self) -> usize;
}
