//! Supervisor node: model-decided routing over a closed enumeration.
//!
//! The model is constrained to the `RouterDecision` JSON schema and the
//! response is validated on parse. A value outside the enumeration is a
//! contract violation that propagates; there is no silent default worker.

use std::sync::Arc;

use tracing::{Instrument, info_span};

use quillcast_types::agent::{RouteTarget, RouterDecision, WORKERS};
use quillcast_types::config::RuntimeConfig;
use quillcast_types::error::RouteError;
use quillcast_types::llm::{CompletionRequest, OutputConfig};

use crate::context::ContextWindowManager;
use crate::graph::state::TeamState;
use crate::llm::BoxLlmProvider;

use super::NodeError;

pub struct SupervisorNode {
    provider: Arc<BoxLlmProvider>,
    window: Arc<ContextWindowManager>,
    config: Arc<RuntimeConfig>,
}

impl SupervisorNode {
    pub fn new(
        provider: Arc<BoxLlmProvider>,
        window: Arc<ContextWindowManager>,
        config: Arc<RuntimeConfig>,
    ) -> Self {
        Self {
            provider,
            window,
            config,
        }
    }

    fn system_prompt() -> String {
        let members = WORKERS
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "You are a supervisor tasked with managing a conversation between the \
             following workers: {members}. Given the user request, respond with the \
             worker to act next. Each worker will perform a task and respond with \
             their results and status. When finished, respond with FINISH."
        )
    }

    /// Decide which node runs next.
    pub async fn route(&self, state: &TeamState) -> Result<RouteTarget, NodeError> {
        let trimmed = self.window.limit(&state.messages)?;

        let schema = serde_json::to_value(schemars::schema_for!(RouterDecision))
            .unwrap_or_else(|_| serde_json::json!({"type": "object"}));

        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: trimmed,
            system: Some(Self::system_prompt()),
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
            tools: None,
            output_config: Some(OutputConfig::json_schema("router_decision", schema)),
        };

        let span = info_span!(
            "supervisor.route",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
        );
        let response = self.provider.complete(&request).instrument(span).await?;

        if response.content.trim().is_empty() {
            return Err(RouteError::EmptyDecision("blank response".to_string()).into());
        }

        let decision: RouterDecision = serde_json::from_str(&response.content)
            .map_err(|_| RouteError::InvalidTarget(response.content.clone()))?;

        Ok(decision.next)
    }
}
