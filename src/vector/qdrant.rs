//! Qdrant REST API client.
//!
//! Thin client over the Qdrant HTTP API covering what the pipeline needs:
//! collection bootstrap, point upsert, and similarity search. Every call is
//! wrapped in a database semantic-convention span.

use crate::otel::{db_span, record_db_metrics, DbOperation};
use crate::types::{AppError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

/// Distance metric for a collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Distance {
    /// Cosine similarity
    Cosine,
    /// Dot product
    Dot,
    /// Euclidean distance
    Euclid,
}

/// Vector configuration for a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorParams {
    /// Vector dimensionality
    pub size: usize,

    /// Distance metric
    pub distance: Distance,
}

/// Point to upsert: id, vector, and JSON payload.
#[derive(Debug, Clone, Serialize)]
pub struct PointStruct {
    /// Point identifier
    pub id: u64,

    /// Embedding vector
    pub vector: Vec<f32>,

    /// Arbitrary JSON payload stored with the point
    pub payload: serde_json::Value,
}

/// Search hit: payload plus similarity score.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoredPoint {
    /// Point identifier
    pub id: u64,

    /// Similarity score (higher is closer for cosine)
    pub score: f32,

    /// Stored payload
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Create-collection request body.
#[derive(Debug, Serialize)]
struct CreateCollectionRequest<'a> {
    vectors: &'a VectorParams,
}

/// Upsert request body.
#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    points: &'a [PointStruct],
}

/// Search request body.
#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    limit: usize,
    with_payload: bool,
}

/// Generic Qdrant response envelope.
#[derive(Debug, Deserialize)]
struct QdrantEnvelope<T> {
    result: T,
}

#[derive(Debug, Deserialize)]
struct CollectionsResult {
    collections: Vec<CollectionDescription>,
}

#[derive(Debug, Deserialize)]
struct CollectionDescription {
    name: String,
}

/// Qdrant REST client.
pub struct QdrantClient {
    base_url: String,
    client: Client,
}

impl QdrantClient {
    /// Create new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Qdrant REST base URL (e.g., "http://localhost:6333")
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            client: Client::new(),
        }
    }

    /// List collection names.
    ///
    /// # Errors
    ///
    /// Returns `AppError::VectorStoreError` on request or parse failure.
    pub async fn list_collections(&self) -> Result<Vec<String>> {
        let span = db_span(DbOperation::ListCollections, None);

        async {
            let url = format!("{}/collections", self.base_url);
            let envelope: QdrantEnvelope<CollectionsResult> =
                self.request_json(self.client.get(&url)).await?;

            Ok(envelope
                .result
                .collections
                .into_iter()
                .map(|c| c.name)
                .collect())
        }
        .instrument(span)
        .await
    }

    /// Create a collection.
    ///
    /// # Arguments
    ///
    /// * `name` - Collection name
    /// * `params` - Vector size and distance metric
    ///
    /// # Errors
    ///
    /// Returns `AppError::VectorStoreError` if creation fails (including when
    /// the collection already exists - use [`ensure_collection`](Self::ensure_collection)
    /// for idempotent bootstrap).
    pub async fn create_collection(&self, name: &str, params: &VectorParams) -> Result<()> {
        let span = db_span(DbOperation::CreateCollection, Some(name));

        async {
            let url = format!("{}/collections/{}", self.base_url, name);
            let body = CreateCollectionRequest { vectors: params };
            self.request_json::<serde_json::Value>(self.client.put(&url).json(&body))
                .await?;
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Create the collection if it does not already exist.
    ///
    /// # Arguments
    ///
    /// * `name` - Collection name
    /// * `params` - Vector size and distance metric
    ///
    /// # Returns
    ///
    /// `true` if the collection was created, `false` if it already existed
    pub async fn ensure_collection(&self, name: &str, params: &VectorParams) -> Result<bool> {
        let existing = self.list_collections().await?;
        if existing.iter().any(|c| c == name) {
            tracing::info!(collection = name, "Qdrant collection already exists");
            return Ok(false);
        }

        self.create_collection(name, params).await?;
        tracing::info!(collection = name, "Created Qdrant collection");
        Ok(true)
    }

    /// Upsert points into a collection.
    ///
    /// # Arguments
    ///
    /// * `collection` - Target collection
    /// * `points` - Points to upsert
    ///
    /// # Errors
    ///
    /// Returns `AppError::VectorStoreError` on request or parse failure.
    pub async fn upsert(&self, collection: &str, points: &[PointStruct]) -> Result<()> {
        let span = db_span(DbOperation::Upsert, Some(collection));

        async {
            let url = format!(
                "{}/collections/{}/points?wait=true",
                self.base_url, collection
            );
            let body = UpsertRequest { points };
            self.request_json::<serde_json::Value>(self.client.put(&url).json(&body))
                .await?;
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Similarity search.
    ///
    /// # Arguments
    ///
    /// * `collection` - Target collection
    /// * `vector` - Query vector
    /// * `limit` - Maximum number of hits
    ///
    /// # Returns
    ///
    /// Hits ordered by descending score, payload included
    ///
    /// # Errors
    ///
    /// Returns `AppError::VectorStoreError` on request or parse failure.
    pub async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPoint>> {
        let span = db_span(DbOperation::Search, Some(collection));

        async {
            let url = format!("{}/collections/{}/points/search", self.base_url, collection);
            let body = SearchRequest {
                vector,
                limit,
                with_payload: true,
            };

            let envelope: QdrantEnvelope<Vec<ScoredPoint>> =
                self.request_json(self.client.post(&url).json(&body)).await?;

            record_db_metrics(Some(envelope.result.len()));
            Ok(envelope.result)
        }
        .instrument(span)
        .await
    }

    /// Send a request and parse the JSON body, mapping failures to
    /// `AppError::VectorStoreError` with status and body text.
    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::VectorStoreError(format!("Qdrant request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::VectorStoreError(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::VectorStoreError(format!(
                "Qdrant API error {}: {}",
                status, body
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| AppError::VectorStoreError(format!("Failed to parse Qdrant response: {}", e)))
    }
}
