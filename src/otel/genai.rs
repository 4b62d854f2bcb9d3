//! GenAI operation instrumentation.
//!
//! Implements OpenTelemetry GenAI semantic conventions for OpenAI API calls.
//! The LLM and embedding clients create these spans around every request,
//! which is what makes the pipeline auto-instrumented: call sites never
//! touch tracing directly.

use tracing::{field::Empty, span, Level, Span};

/// GenAI operation types (maps to `gen_ai.operation.name`).
#[derive(Debug, Clone, Copy)]
pub enum LlmOperation {
    /// Chat completion request
    Chat,
    /// Embedding request
    Embeddings,
}

impl LlmOperation {
    /// Get operation name as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Embeddings => "embeddings",
        }
    }
}

/// Create GenAI operation span with semantic conventions.
///
/// # Arguments
///
/// * `operation` - GenAI operation type
/// * `model` - Requested model name
///
/// # Returns
///
/// Tracing span with GenAI semantic attributes; usage fields are declared
/// empty and filled in by [`record_llm_usage`] once the response arrives.
///
/// # Example
///
/// ```rust,ignore
/// let span = llm_span(LlmOperation::Chat, "gpt-4o");
/// let _guard = span.entered();
/// ```
pub fn llm_span(operation: LlmOperation, model: &str) -> Span {
    // Span name: "{operation} {model}"
    let span_name = format!("{} {}", operation.as_str(), model);

    span!(
        Level::INFO,
        "llm",
        otel.name = %span_name,
        otel.kind = "client",
        gen_ai.system = "openai",
        gen_ai.operation.name = operation.as_str(),
        gen_ai.request.model = model,
        gen_ai.response.model = Empty,
        gen_ai.usage.input_tokens = Empty,
        gen_ai.usage.output_tokens = Empty,
    )
}

/// Record token usage in the current GenAI span.
///
/// # Arguments
///
/// * `input_tokens` - Prompt token count from the API response
/// * `output_tokens` - Completion token count (0 for embeddings)
/// * `response_model` - Model that actually served the request
///
/// # Example
///
/// ```rust,ignore
/// let span = llm_span(LlmOperation::Chat, "gpt-4o");
/// let _guard = span.entered();
///
/// let response = call_api().await?;
/// record_llm_usage(response.usage.prompt_tokens, response.usage.completion_tokens, &response.model);
/// ```
pub fn record_llm_usage(input_tokens: u32, output_tokens: u32, response_model: &str) {
    let span = Span::current();
    span.record("gen_ai.usage.input_tokens", input_tokens);
    span.record("gen_ai.usage.output_tokens", output_tokens);
    span.record("gen_ai.response.model", response_model);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names() {
        assert_eq!(LlmOperation::Chat.as_str(), "chat");
        assert_eq!(LlmOperation::Embeddings.as_str(), "embeddings");
    }

    #[test]
    fn test_llm_span_creation() {
        tracing::subscriber::with_default(tracing_subscriber::registry::Registry::default(), || {
            let span = llm_span(LlmOperation::Chat, "gpt-4o");
            assert_eq!(span.metadata().unwrap().name(), "llm");
        });
    }

    #[test]
    fn test_llm_span_semantic_attributes() {
        let fields = crate::otel::testing::recorded_span_fields(|| {
            let span = llm_span(LlmOperation::Chat, "gpt-4o");
            let _guard = span.entered();
            record_llm_usage(14, 17, "gpt-4o-2024-08-06");
        });

        assert_eq!(fields["otel.name"], "chat gpt-4o");
        assert_eq!(fields["otel.kind"], "client");
        assert_eq!(fields["gen_ai.system"], "openai");
        assert_eq!(fields["gen_ai.operation.name"], "chat");
        assert_eq!(fields["gen_ai.request.model"], "gpt-4o");
        assert_eq!(fields["gen_ai.response.model"], "gpt-4o-2024-08-06");
        assert_eq!(fields["gen_ai.usage.input_tokens"], "14");
        assert_eq!(fields["gen_ai.usage.output_tokens"], "17");
    }

    #[test]
    fn test_embeddings_span_name() {
        let fields = crate::otel::testing::recorded_span_fields(|| {
            let _guard = llm_span(LlmOperation::Embeddings, "text-embedding-ada-002").entered();
        });

        assert_eq!(fields["otel.name"], "embeddings text-embedding-ada-002");
        assert_eq!(fields["gen_ai.operation.name"], "embeddings");
    }
}
