//! Researcher node: search-bound findings gathering.
//!
//! Bound to the search tool only; it never publishes. Appends one
//! "researcher"-named message and always hands control back to the
//! supervisor.

use std::sync::Arc;

use quillcast_types::character::CharacterConfig;
use quillcast_types::config::RuntimeConfig;
use quillcast_types::llm::Message;

use crate::context::ContextWindowManager;
use crate::graph::state::TeamState;
use crate::llm::BoxLlmProvider;
use crate::tools::BoxTool;

use super::{Directive, NodeError, ToolLoop};

const RESEARCHER_PROMPT: &str = "You are a researcher. Your job is to perform \
    research on the internet and report your findings. Do not write tweets or \
    perform any other actions.";

pub struct ResearcherNode {
    provider: Arc<BoxLlmProvider>,
    window: Arc<ContextWindowManager>,
    config: Arc<RuntimeConfig>,
    search: BoxTool,
}

impl ResearcherNode {
    pub fn new(
        provider: Arc<BoxLlmProvider>,
        window: Arc<ContextWindowManager>,
        config: Arc<RuntimeConfig>,
        search: BoxTool,
    ) -> Self {
        Self {
            provider,
            window,
            config,
            search,
        }
    }

    /// Gather findings for the current request.
    pub async fn run(
        &self,
        state: &TeamState,
        character: &CharacterConfig,
    ) -> Result<(Message, Directive), NodeError> {
        let trimmed = self.window.limit(&state.messages)?;
        let tools = std::slice::from_ref(&self.search);

        let findings = ToolLoop::new(&self.provider, &self.config)
            .run(RESEARCHER_PROMPT, trimmed, tools, character)
            .await?;

        Ok((
            Message::human_named(findings, "researcher"),
            Directive::ToSupervisor,
        ))
    }
}
