//! Editor node: review, revision requests, and publication.
//!
//! Bound to the publish tool only. Normally the model critiques the draft
//! (the supervisor re-routes to the writer) or publishes it. Below the
//! configured deadline threshold the node publishes the latest draft
//! itself, without a model round-trip, so the deadline does not depend on
//! the model following instructions.

use std::sync::Arc;

use tracing::{info, warn};

use quillcast_types::character::CharacterConfig;
use quillcast_types::config::RuntimeConfig;
use quillcast_types::llm::Message;

use crate::context::ContextWindowManager;
use crate::graph::state::TeamState;
use crate::llm::BoxLlmProvider;
use crate::tools::BoxTool;

use super::{Directive, NodeError, ToolLoop};

pub struct EditorNode {
    provider: Arc<BoxLlmProvider>,
    window: Arc<ContextWindowManager>,
    config: Arc<RuntimeConfig>,
    publish: BoxTool,
}

impl EditorNode {
    pub fn new(
        provider: Arc<BoxLlmProvider>,
        window: Arc<ContextWindowManager>,
        config: Arc<RuntimeConfig>,
        publish: BoxTool,
    ) -> Self {
        Self {
            provider,
            window,
            config,
            publish,
        }
    }

    fn system_prompt(&self, character: &CharacterConfig, state: &TeamState) -> String {
        let mut prompt = format!(
            "You are an editor. Your job is to scrutinize the writer's output and \
             ensure that it meets the requirements of {name}'s character. You will \
             critique the output and ask the writer to revise it if necessary. \
             Remember that the tweet must sound original and different from the \
             past tweets. If the output is satisfactory, post it with the \
             post_tweet tool.\n\n\
             ## Deadline\n\
             There are {steps} scheduler steps left before the publish deadline. \
             If fewer than {threshold} steps remain, you must post the tweet \
             immediately.",
            name = character.character_name,
            steps = state.remaining_steps,
            threshold = self.config.publish_deadline_steps,
        );
        if !state.past_tweets.is_empty() {
            prompt.push_str("\n\nPast tweets:\n");
            for tweet in &state.past_tweets {
                prompt.push_str("- ");
                prompt.push_str(tweet);
                prompt.push('\n');
            }
        }
        prompt
    }

    /// The most recent writer draft. Only writer-authored messages count;
    /// anything else in state is not publishable material.
    fn latest_draft(state: &TeamState) -> Option<&str> {
        state
            .messages
            .iter()
            .rev()
            .find(|m| m.name.as_deref() == Some("writer"))
            .map(|m| m.content.as_str())
    }

    /// Review the draft; publish it when satisfied or when the deadline
    /// forces it.
    pub async fn run(
        &self,
        state: &TeamState,
        character: &CharacterConfig,
    ) -> Result<(Message, Directive), NodeError> {
        if state.remaining_steps < self.config.publish_deadline_steps {
            return self.forced_publish(state, character).await;
        }

        let trimmed = self.window.limit(&state.messages)?;
        let prompt = self.system_prompt(character, state);
        let tools = std::slice::from_ref(&self.publish);

        let verdict = ToolLoop::new(&self.provider, &self.config)
            .run(&prompt, trimmed, tools, character)
            .await?;

        Ok((
            Message::human_named(verdict, "editor"),
            Directive::ToSupervisor,
        ))
    }

    /// Deadline override: publish the latest draft as-is.
    async fn forced_publish(
        &self,
        state: &TeamState,
        character: &CharacterConfig,
    ) -> Result<(Message, Directive), NodeError> {
        let Some(draft) = Self::latest_draft(state) else {
            warn!(
                remaining_steps = state.remaining_steps,
                "Publish deadline reached with no draft in state"
            );
            return Ok((
                Message::human_named(
                    "Deadline reached, but no draft exists to publish.",
                    "editor",
                ),
                Directive::ToSupervisor,
            ));
        };
        info!(
            remaining_steps = state.remaining_steps,
            threshold = self.config.publish_deadline_steps,
            "Publish deadline reached, posting latest draft"
        );
        let confirmation = self
            .publish
            .invoke(serde_json::json!({ "tweet": draft }), character)
            .await?;

        Ok((
            Message::human_named(
                format!("Deadline reached; published without further revision. {confirmation}"),
                "editor",
            ),
            Directive::ToSupervisor,
        ))
    }
}
