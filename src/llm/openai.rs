//! OpenAI Chat Completions API client.
//!
//! Every request is wrapped in a GenAI semantic-convention span, so chat
//! calls show up in Phoenix without any tracing code at the call site.
//! Token usage and estimated cost are returned with each completion.

use crate::otel::{llm_span, record_llm_usage, LlmOperation};
use crate::types::{AppError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Single chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Message role ("system", "user", "assistant")
    pub role: String,

    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }
}

/// Token usage and estimated cost for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the input (system prompt + user content)
    pub input_tokens: u32,

    /// Number of tokens in the output (LLM response)
    pub output_tokens: u32,

    /// Estimated cost in USD based on model pricing
    pub estimated_cost_usd: f64,

    /// Model name used for the request
    pub model: String,
}

/// Completion text plus usage metadata.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Generated text
    pub content: String,

    /// Token usage for cost tracking
    pub usage: TokenUsage,
}

/// Chat completion request body.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

/// Chat completion response body.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: String,
    choices: Vec<Choice>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// OpenAI chat completion client.
pub struct ChatClient {
    api_key: String,
    model: String,
    client: Client,
}

impl ChatClient {
    /// Create new chat client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `model` - Model name (e.g., "gpt-4o")
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: Client::new(),
        }
    }

    /// Request a chat completion.
    ///
    /// # Arguments
    ///
    /// * `messages` - Conversation messages
    ///
    /// # Returns
    ///
    /// Completion text with token usage
    ///
    /// # Errors
    ///
    /// Returns `AppError::LlmError` if the request fails, the API returns a
    /// non-success status, or the response cannot be parsed.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<Completion> {
        let span = llm_span(LlmOperation::Chat, &self.model);

        async {
            let request = ChatRequest {
                model: &self.model,
                messages,
            };

            let response = self
                .client
                .post(CHAT_COMPLETIONS_URL)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await
                .map_err(|e| AppError::LlmError(format!("OpenAI API request failed: {}", e)))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| AppError::LlmError(format!("Failed to read response: {}", e)))?;

            if !status.is_success() {
                return Err(AppError::LlmError(format!(
                    "OpenAI API error {}: {}",
                    status, body
                )));
            }

            let parsed: ChatResponse = serde_json::from_str(&body)
                .map_err(|e| AppError::LlmError(format!("Failed to parse OpenAI response: {}", e)))?;

            let content = parsed
                .choices
                .first()
                .ok_or_else(|| AppError::LlmError("No response from OpenAI".to_string()))?
                .message
                .content
                .clone();

            record_llm_usage(
                parsed.usage.prompt_tokens,
                parsed.usage.completion_tokens,
                &parsed.model,
            );

            let usage = TokenUsage {
                input_tokens: parsed.usage.prompt_tokens,
                output_tokens: parsed.usage.completion_tokens,
                estimated_cost_usd: self
                    .calculate_cost(parsed.usage.prompt_tokens, parsed.usage.completion_tokens),
                model: parsed.model,
            };

            tracing::info!(
                model = %usage.model,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                cost_usd = usage.estimated_cost_usd,
                "Chat completion succeeded"
            );

            Ok(Completion { content, usage })
        }
        .instrument(span)
        .await
    }

    /// Calculate cost based on model pricing.
    ///
    /// # Arguments
    ///
    /// * `input_tokens` - Number of input tokens
    /// * `output_tokens` - Number of output tokens
    ///
    /// # Returns
    ///
    /// Estimated cost in USD
    ///
    /// # Pricing (2025)
    ///
    /// | Model | Input (per MTok) | Output (per MTok) |
    /// |-------|------------------|-------------------|
    /// | gpt-4o | $2.50 | $10.00 |
    /// | gpt-4o-mini | $0.15 | $0.60 |
    /// | gpt-4.1 | $2.00 | $8.00 |
    fn calculate_cost(&self, input_tokens: u32, output_tokens: u32) -> f64 {
        let (input_cost_per_mtok, output_cost_per_mtok) = match self.model.as_str() {
            "gpt-4o" => (2.5, 10.0),
            "gpt-4o-mini" => (0.15, 0.6),
            "gpt-4.1" => (2.0, 8.0),
            _ => {
                tracing::warn!(
                    model = %self.model,
                    "Unknown model pricing - cost calculation will be 0"
                );
                (0.0, 0.0)
            }
        };

        let input_cost = (input_tokens as f64 / 1_000_000.0) * input_cost_per_mtok;
        let output_cost = (output_tokens as f64 / 1_000_000.0) * output_cost_per_mtok;

        input_cost + output_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_wire_shape() {
        let messages = vec![ChatMessage::user("Write a haiku about the ocean.")];
        let request = ChatRequest {
            model: "gpt-4o",
            messages: &messages,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Write a haiku about the ocean.");
    }

    #[test]
    fn test_chat_response_parsing() {
        let body = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": "gpt-4o-2024-08-06",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "Waves kiss the shoreline"},
                    "finish_reason": "stop"
                }
            ],
            "usage": {"prompt_tokens": 14, "completion_tokens": 17, "total_tokens": 31}
        }"#;

        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Waves kiss the shoreline");
        assert_eq!(parsed.usage.prompt_tokens, 14);
        assert_eq!(parsed.usage.completion_tokens, 17);
        assert_eq!(parsed.model, "gpt-4o-2024-08-06");
    }

    #[test]
    fn test_calculate_cost_gpt4o() {
        let client = ChatClient::new("test".to_string(), "gpt-4o".to_string());

        // 10k input, 2k output = 0.025 + 0.02 = $0.045
        let cost = client.calculate_cost(10_000, 2_000);
        assert!((cost - 0.045).abs() < 0.0001);
    }

    #[test]
    fn test_calculate_cost_unknown_model() {
        let client = ChatClient::new("test".to_string(), "unknown-model".to_string());

        let cost = client.calculate_cost(10_000, 2_000);
        assert_eq!(cost, 0.0);
    }
}
