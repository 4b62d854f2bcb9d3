//! Runtime configuration from CLI flags and environment variables.
//!
//! Every setting can be supplied either as a flag or through the environment,
//! matching the variables documented in `.env.example`. The OpenAI key is the
//! only required value; everything else defaults to the local compose
//! topology.

use crate::types::{AppError, Result};
use clap::Parser;

/// Traced haiku demo: OpenAI completions exported to Phoenix, embeddings stored in Qdrant.
#[derive(Debug, Clone, Parser)]
#[command(name = "haiku", version, about)]
pub struct Settings {
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    /// Phoenix OTLP trace ingestion endpoint (full URL including /v1/traces)
    #[arg(
        long,
        env = "PHOENIX_COLLECTOR_ENDPOINT",
        default_value = "http://localhost:6006/v1/traces"
    )]
    pub phoenix_endpoint: String,

    /// Project name traces are grouped under in the Phoenix UI
    #[arg(long, env = "PHOENIX_PROJECT_NAME", default_value = "sample-llm-app")]
    pub project_name: String,

    /// Qdrant host
    #[arg(long, env = "QDRANT_HOST", default_value = "localhost")]
    pub qdrant_host: String,

    /// Qdrant REST port
    #[arg(long, env = "QDRANT_PORT", default_value_t = 6333)]
    pub qdrant_port: u16,

    /// Chat completion model
    #[arg(long, env = "OPENAI_CHAT_MODEL", default_value = "gpt-4o")]
    pub chat_model: String,

    /// Embedding model
    #[arg(long, env = "OPENAI_EMBEDDING_MODEL", default_value = "text-embedding-ada-002")]
    pub embedding_model: String,

    /// Log filter directive (RUST_LOG syntax)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Settings {
    /// Parse settings from CLI arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigError` if a required value is missing or a
    /// flag fails to parse. Help/version requests propagate clap's exit.
    pub fn load() -> Result<Self> {
        Self::try_parse().map_err(|e| match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                // Let clap print and exit for --help / --version
                e.exit()
            }
            _ => AppError::ConfigError(e.to_string()),
        })
    }

    /// Qdrant REST base URL.
    pub fn qdrant_url(&self) -> String {
        format!("http://{}:{}", self.qdrant_host, self.qdrant_port)
    }
}
