//! OpenTelemetry instrumentation for the haiku pipeline.
//!
//! Follows OpenTelemetry semantic conventions:
//! - GenAI spans: https://opentelemetry.io/docs/specs/semconv/gen-ai/gen-ai-spans/
//! - Database spans: https://opentelemetry.io/docs/specs/semconv/database/database-spans/
//!
//! # GenAI Conventions
//!
//! **Span naming**: `{gen_ai.operation.name} {gen_ai.request.model}`
//! - Example: `chat gpt-4o`, `embeddings text-embedding-ada-002`
//!
//! **Required attributes**:
//! - `gen_ai.system`: Always `"openai"`
//! - `gen_ai.operation.name`: Operation type (chat, embeddings)
//! - `gen_ai.request.model`: Requested model name
//!
//! **Recorded after the call**:
//! - `gen_ai.response.model`: Model that served the request
//! - `gen_ai.usage.input_tokens` / `gen_ai.usage.output_tokens`
//!
//! # Database Conventions
//!
//! Qdrant operations use `db.system.name = "qdrant"` with
//! `db.operation.name` and `db.collection.name`.
//!
//! # Registration
//!
//! [`register`] wires the OTLP/HTTP exporter to the Phoenix collector and
//! installs a `tracing` subscriber, so span creation anywhere in the crate
//! flows to Phoenix. The API clients create these spans themselves - call
//! sites need no explicit tracing code.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_phoenix_app::otel::{db_span, DbOperation};
//!
//! let span = db_span(DbOperation::Search, Some("haikus"));
//! let _guard = span.entered();
//!
//! // Perform Qdrant operation
//! let hits = store.search(&collection, &vector, 2).await?;
//! ```

pub mod db;
pub mod genai;
pub mod init;

#[cfg(test)]
pub(crate) mod testing;

pub use db::{db_span, record_db_metrics, DbOperation};
pub use genai::{llm_span, record_llm_usage, LlmOperation};
pub use init::{register, TelemetryGuard};
