//! OpenAI chat completion client with auto-instrumentation and token tracking.

pub mod openai;

pub use openai::{ChatClient, ChatMessage, Completion, TokenUsage};
