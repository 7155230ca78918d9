//! Bounded tool-use reasoning loop.
//!
//! The model may request tool calls, receive their results, and continue,
//! up to a hard round cap. The cap is the loop-breaker: model cooperation
//! is never assumed.

use tracing::{Instrument, info_span, warn};

use quillcast_types::character::CharacterConfig;
use quillcast_types::config::RuntimeConfig;
use quillcast_types::error::ToolError;
use quillcast_types::llm::{CompletionRequest, Message};

use crate::llm::BoxLlmProvider;
use crate::tools::BoxTool;

use super::NodeError;

/// Runs one node's model call, optionally with bound tools.
pub struct ToolLoop<'a> {
    provider: &'a BoxLlmProvider,
    config: &'a RuntimeConfig,
}

impl<'a> ToolLoop<'a> {
    pub fn new(provider: &'a BoxLlmProvider, config: &'a RuntimeConfig) -> Self {
        Self { provider, config }
    }

    /// Run the loop and return the final assistant text.
    ///
    /// Tool results are appended to the working transcript as human
    /// messages named after the tool, then the model is called again.
    /// When the round cap is hit, the last model text is returned with a
    /// warning rather than looping further.
    pub async fn run(
        &self,
        system_prompt: &str,
        history: Vec<Message>,
        tools: &[BoxTool],
        character: &CharacterConfig,
    ) -> Result<String, NodeError> {
        let mut messages = history;
        let specs = if tools.is_empty() {
            None
        } else {
            Some(tools.iter().map(BoxTool::spec).collect())
        };

        let mut rounds = 0u32;
        loop {
            let request = CompletionRequest {
                model: self.config.model.clone(),
                messages: messages.clone(),
                system: Some(system_prompt.to_string()),
                max_tokens: self.config.max_tokens,
                temperature: Some(self.config.temperature),
                tools: specs.clone(),
                output_config: None,
            };

            let span = info_span!(
                "gen_ai.complete",
                gen_ai.system = self.provider.name(),
                gen_ai.request.model = %request.model,
                gen_ai.request.max_tokens = request.max_tokens,
                tool_round = rounds,
            );
            let response = self.provider.complete(&request).instrument(span).await?;

            if response.tool_calls.is_empty() {
                return Ok(response.content);
            }
            if rounds >= self.config.max_tool_rounds {
                warn!(
                    rounds,
                    cap = self.config.max_tool_rounds,
                    "Tool round cap reached, returning last model text"
                );
                return Ok(response.content);
            }
            rounds += 1;

            if !response.content.is_empty() {
                messages.push(Message::ai(response.content.clone()));
            }
            for call in &response.tool_calls {
                let tool = tools
                    .iter()
                    .find(|t| t.name() == call.name)
                    .ok_or_else(|| ToolError::UnknownTool(call.name.clone()))?;
                let result = tool.invoke(call.input.clone(), character).await?;
                messages.push(Message::human_named(result, call.name.clone()));
            }
        }
    }
}
