//! Writer node: draft production.
//!
//! Bound to no tools. The route to the editor is a fixed edge encoded
//! here, never a model decision: every draft goes through review.

use std::sync::Arc;

use quillcast_types::character::CharacterConfig;
use quillcast_types::config::RuntimeConfig;
use quillcast_types::llm::Message;

use crate::context::ContextWindowManager;
use crate::graph::state::TeamState;
use crate::llm::BoxLlmProvider;

use super::{Directive, NodeError, ToolLoop};

pub struct WriterNode {
    provider: Arc<BoxLlmProvider>,
    window: Arc<ContextWindowManager>,
    config: Arc<RuntimeConfig>,
}

impl WriterNode {
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

    fn system_prompt(character: &CharacterConfig, past_tweets: &[String]) -> String {
        let mut prompt = format!(
            "You are a writer. Your job is to write a tweet that matches the style \
             and voice of {}. You will write the tweet and send it to the editor \
             for review.",
            character.character_name
        );
        if !past_tweets.is_empty() {
            prompt.push_str("\n\nPast tweets (the new one must sound different):\n");
            for tweet in past_tweets {
                prompt.push_str("- ");
                prompt.push_str(tweet);
                prompt.push('\n');
            }
        }
        prompt
    }

    /// Produce a draft post.
    pub async fn run(
        &self,
        state: &TeamState,
        character: &CharacterConfig,
    ) -> Result<(Message, Directive), NodeError> {
        let trimmed = self.window.limit(&state.messages)?;
        let prompt = Self::system_prompt(character, &state.past_tweets);

        let draft = ToolLoop::new(&self.provider, &self.config)
            .run(&prompt, trimmed, &[], character)
            .await?;

        Ok((Message::human_named(draft, "writer"), Directive::ToEditor))
    }
}
