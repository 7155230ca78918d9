//! Publishing tool.
//!
//! `post_tweet` generates a fresh UUIDv7 identifier, records the post as a
//! new single-post conversation via the store, and returns a confirmation.
//!
//! NOT idempotent: every call creates a new stored record. Callers must not
//! retry blindly on ambiguous failure without an idempotency-key strategy.
//! A failed store write propagates; it is never reported as a success.

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use quillcast_types::character::CharacterConfig;
use quillcast_types::error::ToolError;

use crate::store::ConversationStore;

use super::Tool;

/// Model-supplied input for a publish call.
#[derive(Debug, Deserialize)]
struct PublishInput {
    tweet: String,
}

/// The `post_tweet` tool bound to the editor.
pub struct PublishTool<S: ConversationStore> {
    store: S,
}

impl<S: ConversationStore> PublishTool<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Publish `content` on behalf of `character`.
    ///
    /// Exposed directly (besides the [`Tool`] surface) so the editor's
    /// deadline override can invoke it without a model round-trip.
    pub async fn publish(
        &self,
        content: &str,
        character: &CharacterConfig,
    ) -> Result<String, ToolError> {
        let tweet_id = Uuid::now_v7().to_string();
        info!(
            character = %character.character_name,
            tweet_id = %tweet_id,
            "Publishing post"
        );
        self.store.put_post(character, &tweet_id, content).await?;
        Ok(format!("Tweet posted (id {tweet_id})"))
    }
}

impl<S: ConversationStore> Tool for PublishTool<S> {
    fn name(&self) -> &str {
        "post_tweet"
    }

    fn description(&self) -> &str {
        "Publish the final tweet on behalf of the character. Creates a new post every call."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "tweet": { "type": "string", "description": "Final tweet text to publish" }
            },
            "required": ["tweet"],
            "additionalProperties": false
        })
    }

    async fn invoke(
        &self,
        input: serde_json::Value,
        character: &CharacterConfig,
    ) -> Result<String, ToolError> {
        let input: PublishInput = serde_json::from_value(input)
            .map_err(|e| ToolError::InvalidInput(e.to_string()))?;
        self.publish(&input.tweet, character).await
    }
}
