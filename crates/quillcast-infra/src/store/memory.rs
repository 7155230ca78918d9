//! In-memory conversation store over concurrent maps.
//!
//! Keyed `(character_id, conversation_id)`. Read-modify-write on a record
//! is not transactionally guarded: concurrent updates to the same
//! conversation are last-write-wins. Records are appended to, never
//! deleted.

use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

use quillcast_core::store::{ConversationStore, ThreadFetcher};
use quillcast_types::character::{CharacterConfig, CharacterId, ConversationRecord, Post};
use quillcast_types::error::StoreError;

pub struct InMemoryConversationStore<F: ThreadFetcher> {
    characters: DashMap<CharacterId, CharacterConfig>,
    conversations: DashMap<(CharacterId, String), ConversationRecord>,
    fetcher: F,
}

impl<F: ThreadFetcher> InMemoryConversationStore<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            characters: DashMap::new(),
            conversations: DashMap::new(),
            fetcher,
        }
    }

    /// Register a character so `get_character` can resolve it.
    pub fn insert_character(&self, character: CharacterConfig) {
        self.characters
            .insert(character.character_id.clone(), character);
    }

    fn key(character_id: &CharacterId, conversation_id: &str) -> (CharacterId, String) {
        (character_id.clone(), conversation_id.to_string())
    }
}

impl<F: ThreadFetcher> ConversationStore for InMemoryConversationStore<F> {
    async fn get_character(
        &self,
        character_id: &CharacterId,
    ) -> Result<CharacterConfig, StoreError> {
        self.characters
            .get(character_id)
            .map(|c| c.clone())
            .ok_or(StoreError::NotFound)
    }

    async fn put_post(
        &self,
        character: &CharacterConfig,
        tweet_id: &str,
        content: &str,
    ) -> Result<(), StoreError> {
        let now = Utc::now();
        let record = ConversationRecord {
            character_id: character.character_id.clone(),
            conversation_id: tweet_id.to_string(),
            op_user: character.character_name.clone(),
            posts: vec![Post {
                tweet_id: tweet_id.to_string(),
                user: character.character_name.clone(),
                content: content.to_string(),
                meta: serde_json::Value::Null,
                timestamp: now,
            }],
            created_date: now,
        };
        debug!(
            character = %character.character_id,
            conversation = tweet_id,
            "Stored new self-started conversation"
        );
        self.conversations
            .insert(Self::key(&character.character_id, tweet_id), record);
        Ok(())
    }

    async fn put_foreign_conversation(
        &self,
        character_id: &CharacterId,
        op_user: &str,
        conversation_id: &str,
        posts: Vec<Post>,
    ) -> Result<(), StoreError> {
        let record = ConversationRecord {
            character_id: character_id.clone(),
            conversation_id: conversation_id.to_string(),
            op_user: op_user.to_string(),
            posts,
            created_date: Utc::now(),
        };
        self.conversations
            .insert(Self::key(character_id, conversation_id), record);
        Ok(())
    }

    async fn update_conversation(
        &self,
        character_id: &CharacterId,
        conversation_id: &str,
    ) -> Result<(), StoreError> {
        let mut record = self
            .conversations
            .get(&Self::key(character_id, conversation_id))
            .map(|r| r.clone())
            .ok_or(StoreError::NotFound)?;

        let fetched = self
            .fetcher
            .fetch_new_posts(character_id, conversation_id)
            .await?;
        let mut added = 0usize;
        for post in fetched {
            if !record.posts.iter().any(|p| p.tweet_id == post.tweet_id) {
                record.posts.push(post);
                added += 1;
            }
        }
        if added > 0 {
            debug!(
                character = %character_id,
                conversation = conversation_id,
                added,
                "Merged fetched posts into conversation"
            );
        }
        // Last-write-wins against concurrent updaters.
        self.conversations
            .insert(Self::key(character_id, conversation_id), record);
        Ok(())
    }

    async fn get_conversation(
        &self,
        character_id: &CharacterId,
        conversation_id: &str,
    ) -> Result<ConversationRecord, StoreError> {
        self.conversations
            .get(&Self::key(character_id, conversation_id))
            .map(|r| r.clone())
            .ok_or(StoreError::NotFound)
    }

    async fn latest_posts(
        &self,
        character_id: &CharacterId,
        character_name: &str,
        limit: u32,
    ) -> Result<Vec<Post>, StoreError> {
        let mut records: Vec<ConversationRecord> = self
            .conversations
            .iter()
            .filter(|entry| {
                entry.key().0 == *character_id && entry.value().op_user == character_name
            })
            .map(|entry| entry.value().clone())
            .collect();
        // UUIDv7 conversation ids sort newest-last lexicographically.
        records.sort_by(|a, b| b.conversation_id.cmp(&a.conversation_id));

        Ok(records
            .into_iter()
            .take(limit as usize)
            .filter_map(|r| r.first_post().cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quillcast_core::store::NoopThreadFetcher;

    struct FixedFetcher(Vec<Post>);

    impl ThreadFetcher for FixedFetcher {
        async fn fetch_new_posts(
            &self,
            _character_id: &CharacterId,
            _conversation_id: &str,
        ) -> Result<Vec<Post>, StoreError> {
            Ok(self.0.clone())
        }
    }

    fn character() -> CharacterConfig {
        CharacterConfig {
            character_id: CharacterId::from("char-1"),
            character_name: "Luna".to_string(),
        }
    }

    fn post(tweet_id: &str, user: &str, content: &str) -> Post {
        Post {
            tweet_id: tweet_id.to_string(),
            user: user.to_string(),
            content: content.to_string(),
            meta: serde_json::Value::Null,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_character_lookup() {
        let store = InMemoryConversationStore::new(NoopThreadFetcher);
        assert!(matches!(
            store.get_character(&CharacterId::from("char-1")).await,
            Err(StoreError::NotFound)
        ));

        store.insert_character(character());
        let found = store
            .get_character(&CharacterId::from("char-1"))
            .await
            .unwrap();
        assert_eq!(found.character_name, "Luna");
    }

    #[tokio::test]
    async fn test_each_publish_is_its_own_conversation() {
        let store = InMemoryConversationStore::new(NoopThreadFetcher);
        let c = character();
        store.put_post(&c, "t-1", "first").await.unwrap();
        store.put_post(&c, "t-2", "second").await.unwrap();

        let one = store
            .get_conversation(&c.character_id, "t-1")
            .await
            .unwrap();
        assert_eq!(one.op_user, "Luna");
        assert_eq!(one.posts.len(), 1);
        assert_eq!(one.posts[0].content, "first");

        let two = store
            .get_conversation(&c.character_id, "t-2")
            .await
            .unwrap();
        assert_eq!(two.posts[0].content, "second");
    }

    #[tokio::test]
    async fn test_latest_posts_filters_and_orders() {
        let store = InMemoryConversationStore::new(NoopThreadFetcher);
        let c = character();
        store.put_post(&c, "a-1", "oldest").await.unwrap();
        store.put_post(&c, "b-2", "middle").await.unwrap();
        store.put_post(&c, "c-3", "newest").await.unwrap();
        // A thread someone else started must not count as the character's
        // own post.
        store
            .put_foreign_conversation(
                &c.character_id,
                "someone_else",
                "z-9",
                vec![post("z-9", "someone_else", "their thread")],
            )
            .await
            .unwrap();

        let latest = store
            .latest_posts(&c.character_id, "Luna", 2)
            .await
            .unwrap();
        let contents: Vec<&str> = latest.iter().map(|p| p.content.as_str()).collect();
        assert_eq!(contents, ["newest", "middle"]);
    }

    #[tokio::test]
    async fn test_update_merges_without_duplicates() {
        let fetched = vec![
            post("t-1", "Luna", "already there"),
            post("t-2", "fan", "a reply"),
        ];
        let store = InMemoryConversationStore::new(FixedFetcher(fetched));
        let c = character();
        store.put_post(&c, "t-1", "already there").await.unwrap();

        store
            .update_conversation(&c.character_id, "t-1")
            .await
            .unwrap();
        let record = store
            .get_conversation(&c.character_id, "t-1")
            .await
            .unwrap();
        // Only the genuinely new post was appended.
        assert_eq!(record.posts.len(), 2);
        assert_eq!(record.posts[1].user, "fan");
    }

    #[tokio::test]
    async fn test_update_unknown_conversation_is_not_found() {
        let store = InMemoryConversationStore::new(NoopThreadFetcher);
        assert!(matches!(
            store
                .update_conversation(&CharacterId::from("char-1"), "missing")
                .await,
            Err(StoreError::NotFound)
        ));
    }
}
