//! Qdrant vector store client.

pub mod qdrant;

pub use qdrant::{Distance, PointStruct, QdrantClient, ScoredPoint, VectorParams};
