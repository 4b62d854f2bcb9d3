//! The demo flow: generate a haiku, store it with its embedding, then find
//! similar haikus.
//!
//! Each stage runs under its own span so the whole run shows up in Phoenix
//! as one trace rooted at `haiku-pipeline`.

use crate::config::Settings;
use crate::embeddings::{EmbeddingProvider, OpenAIEmbedder};
use crate::llm::{ChatClient, ChatMessage};
use crate::types::{AppError, Result};
use crate::vector::{Distance, PointStruct, QdrantClient, ScoredPoint, VectorParams};
use tracing::Instrument;
use uuid::Uuid;

/// Collection holding generated haikus.
pub const COLLECTION_NAME: &str = "haikus";

/// Prompt sent to the chat model.
const HAIKU_PROMPT: &str = "Write a haiku about the ocean.";

/// Number of similar haikus to retrieve.
const SEARCH_LIMIT: usize = 2;

/// Result of one pipeline run.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Generated haiku text
    pub haiku: String,

    /// Similar haikus with scores (may include the one just stored)
    pub similar: Vec<(String, f32)>,
}

/// Run the full pipeline.
///
/// # Arguments
///
/// * `settings` - Runtime configuration
///
/// # Returns
///
/// Generated haiku and similar hits
///
/// # Errors
///
/// Propagates the first failure from any stage; no retry is attempted.
pub async fn run(settings: &Settings) -> Result<PipelineOutput> {
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("haiku-pipeline", run.id = %run_id);

    async {
        let chat = ChatClient::new(settings.openai_api_key.clone(), settings.chat_model.clone());
        let embedder = OpenAIEmbedder::new(
            settings.openai_api_key.clone(),
            settings.embedding_model.clone(),
        );
        let store = QdrantClient::new(settings.qdrant_url());

        store
            .ensure_collection(
                COLLECTION_NAME,
                &VectorParams {
                    size: embedder.dimensions(),
                    distance: Distance::Cosine,
                },
            )
            .await?;

        let (haiku, embedding) = generate_and_store(&chat, &embedder, &store).await?;
        let similar = search_similar(&store, &embedding).await?;

        Ok(PipelineOutput { haiku, similar })
    }
    .instrument(span)
    .await
}

/// Generate a haiku, embed it, and upsert it into Qdrant.
async fn generate_and_store(
    chat: &ChatClient,
    embedder: &OpenAIEmbedder,
    store: &QdrantClient,
) -> Result<(String, Vec<f32>)> {
    let span = tracing::info_span!("generate-and-store");

    async {
        tracing::info!("Generating haiku...");
        let completion = chat.complete(&[ChatMessage::user(HAIKU_PROMPT)]).await?;
        let haiku = completion.content;

        let embedding = embedder.embed(&haiku).await?;
        if embedding.len() != embedder.dimensions() {
            return Err(AppError::EmbeddingError(format!(
                "Expected {} dimensions, got {}",
                embedder.dimensions(),
                embedding.len()
            )));
        }

        store
            .upsert(
                COLLECTION_NAME,
                &[PointStruct {
                    id: 1,
                    vector: embedding.clone(),
                    payload: serde_json::json!({
                        "haiku": haiku,
                        "created_at": chrono::Utc::now().to_rfc3339(),
                    }),
                }],
            )
            .await?;
        tracing::info!("Haiku stored in Qdrant");

        Ok((haiku, embedding))
    }
    .instrument(span)
    .await
}

/// Search for haikus similar to the given embedding.
async fn search_similar(store: &QdrantClient, embedding: &[f32]) -> Result<Vec<(String, f32)>> {
    let span = tracing::info_span!("search-similar");

    async {
        let hits = store.search(COLLECTION_NAME, embedding, SEARCH_LIMIT).await?;
        tracing::info!(count = hits.len(), "Found similar haikus");

        Ok(hits.into_iter().map(extract_hit).collect())
    }
    .instrument(span)
    .await
}

/// Pull the haiku text out of a search hit's payload.
fn extract_hit(hit: ScoredPoint) -> (String, f32) {
    let haiku = hit
        .payload
        .get("haiku")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    (haiku, hit.score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_hit_with_payload() {
        let hit = ScoredPoint {
            id: 1,
            score: 0.87,
            payload: serde_json::json!({"haiku": "Salt wind over foam"}),
        };

        let (haiku, score) = extract_hit(hit);
        assert_eq!(haiku, "Salt wind over foam");
        assert!((score - 0.87).abs() < f32::EPSILON);
    }

    #[test]
    fn test_extract_hit_missing_payload_field() {
        let hit = ScoredPoint {
            id: 2,
            score: 0.5,
            payload: serde_json::Value::Null,
        };

        let (haiku, _) = extract_hit(hit);
        assert!(haiku.is_empty());
    }
}
