//! Haiku demo entry point.
//!
//! Parses configuration, registers the Phoenix tracer, runs the pipeline,
//! and flushes spans before exit so the trace is visible in the Phoenix UI
//! within the batch-flush delay.

use anyhow::Context;
use llm_phoenix_app::types::AppError;
use llm_phoenix_app::{config::Settings, otel, pipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load configuration")?;

    let guard = otel::register(
        &settings.project_name,
        &settings.phoenix_endpoint,
        &settings.log_filter,
    )
    .context("Failed to register Phoenix tracer")?;

    let result = pipeline::run(&settings).await;

    match &result {
        Ok(output) => {
            println!("Generated Haiku:");
            println!("{}", output.haiku);
            println!("\nSimilar Haikus:");
            for (haiku, score) in &output.similar {
                println!("Score: {:.4}\n{}\n", score, haiku);
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Pipeline failed");
        }
    }

    let flush = guard.shutdown();
    resolve_exit(result.map(|_| ()), flush)
}

/// Combine the pipeline and flush outcomes into the process exit result.
///
/// A pipeline failure takes precedence: the flush error is logged, not
/// returned, so the root cause is what reaches the operator. A flush failure
/// after a successful run is still an error - the trace never made it to the
/// collector.
fn resolve_exit(
    pipeline: Result<(), AppError>,
    flush: Result<(), AppError>,
) -> anyhow::Result<()> {
    match (pipeline, flush) {
        (Ok(()), Ok(())) => Ok(()),
        (Ok(()), Err(e)) => Err(anyhow::Error::new(e).context("Failed to flush spans")),
        (Err(e), flush) => {
            if let Err(flush_err) = flush {
                tracing::error!(error = %flush_err, "Failed to flush spans");
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_error_wins_over_flush_error() {
        let err = resolve_exit(
            Err(AppError::LlmError("completion failed".to_string())),
            Err(AppError::TelemetryError("flush timed out".to_string())),
        )
        .unwrap_err();

        assert!(err.to_string().contains("LLM error"));
        assert!(!err.to_string().contains("flush"));
    }

    #[test]
    fn test_flush_error_surfaces_after_successful_run() {
        let err = resolve_exit(
            Ok(()),
            Err(AppError::TelemetryError("flush timed out".to_string())),
        )
        .unwrap_err();

        assert!(format!("{:#}", err).contains("flush"));
    }

    #[test]
    fn test_clean_run_exits_ok() {
        assert!(resolve_exit(Ok(()), Ok(())).is_ok());
    }
}
