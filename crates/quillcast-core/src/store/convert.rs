//! Post-to-message conversion.
//!
//! Stored posts become conversation messages for prompt assembly: a post
//! authored by the character itself reads as an `Ai` message, anything else
//! as a `Human` message from the poster.

use quillcast_types::character::Post;
use quillcast_types::llm::{Message, MessageRole};

/// Convert one stored post into a message, from the character's point of view.
pub fn post_to_message(character_name: &str, post: &Post) -> Message {
    if post.user == character_name {
        Message {
            role: MessageRole::Ai,
            content: post.content.clone(),
            name: Some(character_name.to_string()),
        }
    } else {
        Message {
            role: MessageRole::Human,
            content: post.content.clone(),
            name: Some(post.user.clone()),
        }
    }
}

/// Convert a thread of posts into messages, preserving order.
pub fn posts_to_messages(character_name: &str, posts: &[Post]) -> Vec<Message> {
    posts
        .iter()
        .map(|post| post_to_message(character_name, post))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post(user: &str, content: &str) -> Post {
        Post {
            tweet_id: "t-1".to_string(),
            user: user.to_string(),
            content: content.to_string(),
            meta: serde_json::Value::Null,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_own_post_is_ai_message() {
        let msg = post_to_message("Luna", &post("Luna", "moonrise soon"));
        assert_eq!(msg.role, MessageRole::Ai);
        assert_eq!(msg.name.as_deref(), Some("Luna"));
    }

    #[test]
    fn test_foreign_post_is_human_message() {
        let msg = post_to_message("Luna", &post("fan42", "love this!"));
        assert_eq!(msg.role, MessageRole::Human);
        assert_eq!(msg.name.as_deref(), Some("fan42"));
    }

    #[test]
    fn test_thread_order_preserved() {
        let posts = vec![post("Luna", "one"), post("fan", "two"), post("Luna", "three")];
        let messages = posts_to_messages("Luna", &posts);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content, "one");
        assert_eq!(messages[1].role, MessageRole::Human);
        assert_eq!(messages[2].role, MessageRole::Ai);
    }
}
