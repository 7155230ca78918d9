//! Character persona and stored conversation types.
//!
//! A character is the persona a team run posts on behalf of. Conversation
//! records are the persisted, character-scoped post threads; `(character_id,
//! conversation_id)` uniquely identify a record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

/// Opaque identifier for a character.
///
/// A string newtype rather than a UUID: the conversation store is an
/// external system whose key format the core does not control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CharacterId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Call-scoped character configuration for one team run.
///
/// Passed by reference to every node and tool; never stored in the shared
/// message state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterConfig {
    pub character_id: CharacterId,
    pub character_name: String,
}

/// A single post inside a conversation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub tweet_id: String,
    /// Handle of the post's author.
    pub user: String,
    pub content: String,
    /// Freeform metadata from the publishing platform.
    #[serde(default)]
    pub meta: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

/// A persisted, character-scoped thread of posts.
///
/// `op_user` is the handle of the original poster: the character's own name
/// for self-started threads, someone else's for foreign conversations the
/// character participates in. Records are appended to, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub character_id: CharacterId,
    pub conversation_id: String,
    pub op_user: String,
    pub posts: Vec<Post>,
    pub created_date: DateTime<Utc>,
}

impl ConversationRecord {
    /// The thread's opening post, if any.
    pub fn first_post(&self) -> Option<&Post> {
        self.posts.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(user: &str, content: &str) -> Post {
        Post {
            tweet_id: "t-1".to_string(),
            user: user.to_string(),
            content: content.to_string(),
            meta: serde_json::Value::Null,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_character_id_display() {
        let id = CharacterId::new("char-42");
        assert_eq!(id.to_string(), "char-42");
        assert_eq!(id.as_str(), "char-42");
    }

    #[test]
    fn test_record_first_post() {
        let record = ConversationRecord {
            character_id: CharacterId::from("char-42"),
            conversation_id: "conv-1".to_string(),
            op_user: "Luna".to_string(),
            posts: vec![sample_post("Luna", "hello"), sample_post("fan", "hi!")],
            created_date: Utc::now(),
        };
        assert_eq!(record.first_post().unwrap().content, "hello");
    }

    #[test]
    fn test_post_meta_defaults_to_null() {
        let json = r#"{
            "tweet_id": "t-9",
            "user": "Luna",
            "content": "hey",
            "timestamp": "2026-01-01T00:00:00Z"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.meta.is_null());
    }
}
