//! LlmProvider trait definition.
//!
//! The model capability: given a prompt/message list and optional tool set
//! or structured-output schema, return a completion. Uses RPITIT (native
//! async fn in traits, Rust 2024 edition); implementations live in
//! `quillcast-infra`.

use quillcast_types::llm::{CompletionRequest, CompletionResponse, LlmError, TokenCount};

/// Trait for LLM provider backends.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai_compatible").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;

    /// Estimate the token cost of a request without sending it.
    fn count_tokens(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<TokenCount, LlmError>> + Send;
}
