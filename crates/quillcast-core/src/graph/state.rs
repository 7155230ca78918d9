//! Shared state for one team run.

use quillcast_types::agent::RouteTarget;
use quillcast_types::llm::Message;

/// Conversation state owned by a single graph run.
///
/// `messages` and `past_tweets` are append-only: nodes add, the window
/// manager trims copies, nothing rewrites history in place.
#[derive(Debug, Clone)]
pub struct TeamState {
    /// Full conversation transcript, in arrival order.
    pub messages: Vec<Message>,
    /// Previously published posts, used to steer drafts away from repeats.
    pub past_tweets: Vec<String>,
    /// Node executions left before the run is cut off.
    pub remaining_steps: u32,
    /// The supervisor's most recent routing decision.
    pub next: Option<RouteTarget>,
}

impl TeamState {
    pub fn new(messages: Vec<Message>, step_budget: u32) -> Self {
        Self {
            messages,
            past_tweets: Vec::new(),
            remaining_steps: step_budget,
            next: None,
        }
    }

    pub fn append_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn append_past_tweets<I>(&mut self, tweets: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.past_tweets.extend(tweets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = TeamState::new(vec![Message::human("hi")], 10);
        assert_eq!(state.messages.len(), 1);
        assert!(state.past_tweets.is_empty());
        assert_eq!(state.remaining_steps, 10);
        assert!(state.next.is_none());
    }

    #[test]
    fn test_appends_preserve_order() {
        let mut state = TeamState::new(vec![Message::human("one")], 10);
        state.append_message(Message::human_named("two", "researcher"));
        state.append_message(Message::human_named("three", "writer"));
        let contents: Vec<&str> = state.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["one", "two", "three"]);

        state.append_past_tweets(["a".to_string(), "b".to_string()]);
        state.append_past_tweets(["c".to_string()]);
        assert_eq!(state.past_tweets, ["a", "b", "c"]);
    }
}
