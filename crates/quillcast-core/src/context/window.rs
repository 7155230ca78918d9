//! Context window manager: trims a conversation to fit a token budget.
//!
//! System messages are kept intact and always precede the rest; the oldest
//! non-system messages are dropped from the front until the counted cost
//! fits. Trimming that would discard every non-system message is an error
//! surfaced to the caller, never silently tolerated.

use std::sync::Arc;

use tracing::debug;

use quillcast_types::error::ContextError;
use quillcast_types::llm::{Message, MessageRole};

/// Injected token-estimation capability.
///
/// Exact tokenization is model-specific, so the counter is supplied by the
/// caller rather than owned here.
pub trait TokenCounter: Send + Sync {
    /// Estimate the token cost of a message sequence.
    fn count(&self, messages: &[Message]) -> u32;
}

/// Character-count heuristic: ~4 characters per token, plus a small
/// per-message overhead for role/name framing.
///
/// Conservative enough for budget enforcement; exact counting would
/// require a tokenizer or a provider round-trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTokenCounter;

/// Per-message framing overhead in tokens.
const MESSAGE_OVERHEAD_TOKENS: u32 = 4;

impl TokenCounter for HeuristicTokenCounter {
    fn count(&self, messages: &[Message]) -> u32 {
        messages
            .iter()
            .map(|m| {
                let chars = m.content.len() + m.name.as_deref().map_or(0, str::len);
                (chars as u32 / 4) + MESSAGE_OVERHEAD_TOKENS
            })
            .sum()
    }
}

/// Trims conversation histories to a token budget.
pub struct ContextWindowManager {
    token_budget: u32,
    counter: Option<Arc<dyn TokenCounter>>,
}

impl ContextWindowManager {
    /// Create a manager with a token budget and an optional default counter.
    pub fn new(token_budget: u32, counter: Option<Arc<dyn TokenCounter>>) -> Self {
        Self {
            token_budget,
            counter,
        }
    }

    /// Whether a token counter is available.
    ///
    /// Checked once per run, before any node executes: a missing counter is
    /// a configuration error, not something to discover mid-conversation.
    pub fn ensure_counter(&self) -> Result<(), ContextError> {
        if self.counter.is_some() {
            Ok(())
        } else {
            Err(ContextError::MissingTokenCounter)
        }
    }

    /// Trim `messages` to fit the budget using the configured counter.
    pub fn limit(&self, messages: &[Message]) -> Result<Vec<Message>, ContextError> {
        let counter = self
            .counter
            .as_deref()
            .ok_or(ContextError::MissingTokenCounter)?;
        self.limit_with(messages, counter)
    }

    /// Trim `messages` to fit the budget using an explicit counter.
    ///
    /// Retained messages keep their relative order; system messages are
    /// never dropped and always precede the remainder.
    pub fn limit_with(
        &self,
        messages: &[Message],
        counter: &dyn TokenCounter,
    ) -> Result<Vec<Message>, ContextError> {
        let (system, mut rest): (Vec<Message>, Vec<Message>) = messages
            .iter()
            .cloned()
            .partition(|m| m.role == MessageRole::System);

        let mut dropped = 0usize;
        loop {
            let mut candidate = system.clone();
            candidate.extend(rest.iter().cloned());
            let cost = counter.count(&candidate);
            if cost <= self.token_budget {
                // A prompt with no conversation content left is useless;
                // surface that instead of sending a system-only request.
                if rest.is_empty() {
                    return Err(ContextError::BudgetExhausted {
                        cost,
                        budget: self.token_budget,
                    });
                }
                if dropped > 0 {
                    debug!(dropped, cost, budget = self.token_budget, "Trimmed context window");
                }
                return Ok(candidate);
            }
            if rest.is_empty() {
                return Err(ContextError::BudgetExhausted {
                    cost,
                    budget: self.token_budget,
                });
            }
            // Oldest non-system message goes first.
            rest.remove(0);
            dropped += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts one token per character, no overhead. Makes budgets exact.
    struct CharCounter;

    impl TokenCounter for CharCounter {
        fn count(&self, messages: &[Message]) -> u32 {
            messages.iter().map(|m| m.content.len() as u32).sum()
        }
    }

    fn manager(budget: u32) -> ContextWindowManager {
        ContextWindowManager::new(budget, Some(Arc::new(CharCounter)))
    }

    #[test]
    fn test_no_counter_is_configuration_error() {
        let mgr = ContextWindowManager::new(100, None);
        assert!(matches!(
            mgr.ensure_counter(),
            Err(ContextError::MissingTokenCounter)
        ));
        assert!(matches!(
            mgr.limit(&[Message::human("hi")]),
            Err(ContextError::MissingTokenCounter)
        ));
    }

    #[test]
    fn test_under_budget_is_untouched() {
        let mgr = manager(100);
        let messages = vec![
            Message::system("sys"),
            Message::human("one"),
            Message::ai("two"),
        ];
        let kept = mgr.limit(&messages).unwrap();
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[0].content, "sys");
        assert_eq!(kept[1].content, "one");
        assert_eq!(kept[2].content, "two");
    }

    #[test]
    fn test_drops_oldest_non_system_first() {
        // sys(3) + aaaa(4) + bbbb(4) + cccc(4) = 15; budget 12 drops "aaaa".
        let mgr = manager(12);
        let messages = vec![
            Message::human("aaaa"),
            Message::system("sys"),
            Message::human("bbbb"),
            Message::ai("cccc"),
        ];
        let kept = mgr.limit(&messages).unwrap();
        assert_eq!(kept.len(), 3);
        // System first, then the retained remainder in original order.
        assert_eq!(kept[0].role, MessageRole::System);
        assert_eq!(kept[1].content, "bbbb");
        assert_eq!(kept[2].content, "cccc");
    }

    #[test]
    fn test_output_never_longer_than_input() {
        let mgr = manager(6);
        let messages = vec![
            Message::system("sy"),
            Message::human("aa"),
            Message::human("bb"),
            Message::human("cc"),
        ];
        let kept = mgr.limit(&messages).unwrap();
        assert!(kept.len() <= messages.len());
        assert!(kept.iter().any(|m| m.role == MessageRole::System));
    }

    #[test]
    fn test_budget_below_system_cost_fails() {
        let mgr = manager(2);
        let messages = vec![Message::system("sys"), Message::human("hello")];
        let err = mgr.limit(&messages).unwrap_err();
        assert!(matches!(err, ContextError::BudgetExhausted { budget: 2, .. }));
    }

    #[test]
    fn test_emptying_the_remainder_is_never_silent() {
        // Dropping the sole message would make the result fit, but an empty
        // non-system set is an error, not a success.
        let mgr = manager(1);
        let messages = vec![Message::human("hello")];
        assert!(matches!(
            mgr.limit(&messages),
            Err(ContextError::BudgetExhausted { .. })
        ));
    }

    #[test]
    fn test_system_only_input_is_exhaustion() {
        let mgr = manager(100);
        let messages = vec![Message::system("sys")];
        assert!(matches!(
            mgr.limit(&messages),
            Err(ContextError::BudgetExhausted { .. })
        ));
    }

    #[test]
    fn test_preserves_relative_order_of_retained() {
        let mgr = manager(9);
        let messages = vec![
            Message::human("aaa"),
            Message::human("bbb"),
            Message::human("ccc"),
            Message::human("ddd"),
        ];
        let kept = mgr.limit(&messages).unwrap();
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[0].content, "bbb");
        assert_eq!(kept[1].content, "ccc");
        assert_eq!(kept[2].content, "ddd");
    }
}
