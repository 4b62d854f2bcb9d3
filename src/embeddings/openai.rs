//! OpenAI embedding API client.

use crate::embeddings::provider::EmbeddingProvider;
use crate::otel::{llm_span, record_llm_usage, LlmOperation};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

const EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";

/// OpenAI API embedding request.
#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    input: serde_json::Value, // String or Vec<String>
}

/// OpenAI API embedding response.
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    model: String,
    data: Vec<EmbeddingData>,
    usage: EmbeddingUsage,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingUsage {
    prompt_tokens: u32,
}

/// OpenAI embedding provider.
pub struct OpenAIEmbedder {
    api_key: String,
    model: String,
    dimensions: usize,
    client: Client,
}

impl OpenAIEmbedder {
    /// Create new OpenAI embedder.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `model` - Model name (e.g., "text-embedding-ada-002")
    ///
    /// # Returns
    ///
    /// New `OpenAIEmbedder`
    pub fn new(api_key: String, model: String) -> Self {
        // Determine dimensions based on model
        let dimensions = match model.as_str() {
            "text-embedding-3-small" => 1536,
            "text-embedding-3-large" => 3072,
            "text-embedding-ada-002" => 1536,
            _ => 1536, // Default to 1536
        };

        Self {
            api_key,
            model,
            dimensions,
            client: Client::new(),
        }
    }

    /// Call OpenAI embeddings API inside a GenAI span.
    async fn call_api(&self, input: serde_json::Value) -> Result<Vec<Vec<f32>>> {
        let span = llm_span(LlmOperation::Embeddings, &self.model);

        async {
            let request = EmbeddingRequest {
                model: self.model.clone(),
                input,
            };

            let response = self
                .client
                .post(EMBEDDINGS_URL)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await
                .map_err(|e| {
                    AppError::EmbeddingError(format!("OpenAI API request failed: {}", e))
                })?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(AppError::EmbeddingError(format!(
                    "OpenAI API error ({}): {}",
                    status, error_text
                )));
            }

            let embedding_response: EmbeddingResponse = response.json().await.map_err(|e| {
                AppError::EmbeddingError(format!("Failed to parse OpenAI response: {}", e))
            })?;

            record_llm_usage(
                embedding_response.usage.prompt_tokens,
                0,
                &embedding_response.model,
            );

            Ok(embedding_response
                .data
                .into_iter()
                .map(|d| d.embedding)
                .collect())
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.call_api(serde_json::json!(text)).await?;

        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| AppError::EmbeddingError("No embedding returned from OpenAI".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        // OpenAI supports batch embeddings (up to ~2048 texts per request)
        // For simplicity, send all at once (caller should handle chunking if needed)
        self.call_api(serde_json::json!(texts)).await
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_by_model() {
        let embedder =
            OpenAIEmbedder::new("test".to_string(), "text-embedding-ada-002".to_string());
        assert_eq!(embedder.dimensions(), 1536);

        let embedder =
            OpenAIEmbedder::new("test".to_string(), "text-embedding-3-large".to_string());
        assert_eq!(embedder.dimensions(), 3072);

        let embedder = OpenAIEmbedder::new("test".to_string(), "some-future-model".to_string());
        assert_eq!(embedder.dimensions(), 1536);
    }

    #[test]
    fn test_embedding_response_parsing() {
        let body = r#"{
            "object": "list",
            "model": "text-embedding-ada-002",
            "data": [
                {"object": "embedding", "index": 0, "embedding": [0.1, -0.2, 0.3]}
            ],
            "usage": {"prompt_tokens": 8, "total_tokens": 8}
        }"#;

        let parsed: EmbeddingResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].embedding, vec![0.1, -0.2, 0.3]);
        assert_eq!(parsed.usage.prompt_tokens, 8);
    }
}
