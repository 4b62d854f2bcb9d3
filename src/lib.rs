//! Traced LLM demo pipeline.
//!
//! Generates a haiku with the OpenAI API, exports every span to a Phoenix
//! collector over OTLP/HTTP, embeds the haiku, stores it in Qdrant, and
//! searches for similar haikus. The three backing services (Phoenix,
//! Postgres, Qdrant) run from the bundled `docker-compose.yml`.
//!
//! # Modules
//!
//! - [`config`]: environment/CLI configuration
//! - [`otel`]: tracer registration and semantic-convention span helpers
//! - [`llm`]: OpenAI chat completion client with token tracking
//! - [`embeddings`]: embedding provider trait and OpenAI implementation
//! - [`vector`]: Qdrant REST client
//! - [`pipeline`]: the demo flow itself
//! - [`types`]: shared error and result types

pub mod config;
pub mod embeddings;
pub mod llm;
pub mod otel;
pub mod pipeline;
pub mod types;
pub mod vector;
