//! Tracer registration against the Phoenix collector.
//!
//! Mirrors Phoenix's `register(project_name=..., endpoint=..., auto_instrument=True)`
//! entry point: one call installs a process-wide tracer provider with a batch
//! OTLP/HTTP exporter and composes the `tracing-opentelemetry` layer with the
//! fmt subscriber. After registration every span created through `tracing`
//! macros is exported to the collector on the batch flush interval.

use crate::types::{AppError, Result};
use opentelemetry::{global, trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::{Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{runtime, trace::TracerProvider, Resource};
use opentelemetry_semantic_conventions::resource::SERVICE_NAME;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Resource attribute Phoenix uses to group traces into a project.
const PROJECT_NAME_ATTR: &str = "openinference.project.name";

/// Guard holding the installed tracer provider.
///
/// Dropping the guard (or calling [`TelemetryGuard::shutdown`]) flushes the
/// batch processor so spans emitted just before process exit still reach the
/// collector.
pub struct TelemetryGuard {
    provider: Option<TracerProvider>,
}

impl TelemetryGuard {
    /// Flush pending spans and shut the provider down.
    ///
    /// # Errors
    ///
    /// Returns `AppError::TelemetryError` if the final export fails, e.g.
    /// because the collector became unreachable.
    pub fn shutdown(mut self) -> Result<()> {
        if let Some(provider) = self.provider.take() {
            for result in provider.force_flush() {
                result.map_err(|e| AppError::TelemetryError(format!("Span flush failed: {}", e)))?;
            }
            provider
                .shutdown()
                .map_err(|e| AppError::TelemetryError(format!("Tracer shutdown failed: {}", e)))?;
        }
        Ok(())
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("Tracer shutdown failed: {}", e);
            }
        }
    }
}

/// Register the Phoenix tracer process-wide.
///
/// # Arguments
///
/// * `project_name` - Phoenix project traces are grouped under
/// * `endpoint` - OTLP/HTTP trace endpoint (full URL including `/v1/traces`)
/// * `log_filter` - `RUST_LOG`-style directive for the fmt layer
///
/// # Returns
///
/// Guard that flushes the exporter on shutdown
///
/// # Errors
///
/// Returns `AppError::TelemetryError` if the exporter cannot be built, the
/// filter directive is invalid, or a global subscriber is already installed.
/// An unreachable endpoint is not detected here - export failures surface in
/// the background batch task, matching the upstream SDK behavior.
pub fn register(project_name: &str, endpoint: &str, log_filter: &str) -> Result<TelemetryGuard> {
    let exporter = SpanExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(endpoint)
        .build()
        .map_err(|e| AppError::TelemetryError(format!("Failed to build OTLP exporter: {}", e)))?;

    let resource = Resource::new(vec![
        KeyValue::new(SERVICE_NAME, project_name.to_string()),
        KeyValue::new(PROJECT_NAME_ATTR, project_name.to_string()),
    ]);

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_resource(resource)
        .build();

    global::set_tracer_provider(provider.clone());

    let tracer = provider.tracer("llm-phoenix-app");

    let filter = EnvFilter::try_new(log_filter)
        .map_err(|e| AppError::TelemetryError(format!("Invalid log filter: {}", e)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .try_init()
        .map_err(|e| AppError::TelemetryError(format!("Failed to install subscriber: {}", e)))?;

    tracing::info!(
        project = project_name,
        endpoint = endpoint,
        "Phoenix tracer registered"
    );

    Ok(TelemetryGuard {
        provider: Some(provider),
    })
}
