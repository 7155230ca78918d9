//! BoxConversationStore -- object-safe wrapper for [`ConversationStore`].
//!
//! Same shadow-trait pattern as `llm::box_provider`: an object-safe trait
//! with boxed futures, a blanket impl, and a delegating wrapper.

use std::future::Future;
use std::pin::Pin;

use quillcast_types::character::{CharacterConfig, CharacterId, ConversationRecord, Post};
use quillcast_types::error::StoreError;

use super::ConversationStore;

/// Object-safe version of [`ConversationStore`] with boxed futures.
pub trait ConversationStoreDyn: Send + Sync {
    fn get_character_boxed<'a>(
        &'a self,
        character_id: &'a CharacterId,
    ) -> Pin<Box<dyn Future<Output = Result<CharacterConfig, StoreError>> + Send + 'a>>;

    fn put_post_boxed<'a>(
        &'a self,
        character: &'a CharacterConfig,
        tweet_id: &'a str,
        content: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>>;

    fn put_foreign_conversation_boxed<'a>(
        &'a self,
        character_id: &'a CharacterId,
        op_user: &'a str,
        conversation_id: &'a str,
        posts: Vec<Post>,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>>;

    fn update_conversation_boxed<'a>(
        &'a self,
        character_id: &'a CharacterId,
        conversation_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>>;

    fn get_conversation_boxed<'a>(
        &'a self,
        character_id: &'a CharacterId,
        conversation_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ConversationRecord, StoreError>> + Send + 'a>>;

    fn latest_posts_boxed<'a>(
        &'a self,
        character_id: &'a CharacterId,
        character_name: &'a str,
        limit: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Post>, StoreError>> + Send + 'a>>;
}

impl<T: ConversationStore> ConversationStoreDyn for T {
    fn get_character_boxed<'a>(
        &'a self,
        character_id: &'a CharacterId,
    ) -> Pin<Box<dyn Future<Output = Result<CharacterConfig, StoreError>> + Send + 'a>> {
        Box::pin(self.get_character(character_id))
    }

    fn put_post_boxed<'a>(
        &'a self,
        character: &'a CharacterConfig,
        tweet_id: &'a str,
        content: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>> {
        Box::pin(self.put_post(character, tweet_id, content))
    }

    fn put_foreign_conversation_boxed<'a>(
        &'a self,
        character_id: &'a CharacterId,
        op_user: &'a str,
        conversation_id: &'a str,
        posts: Vec<Post>,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>> {
        Box::pin(self.put_foreign_conversation(character_id, op_user, conversation_id, posts))
    }

    fn update_conversation_boxed<'a>(
        &'a self,
        character_id: &'a CharacterId,
        conversation_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>> {
        Box::pin(self.update_conversation(character_id, conversation_id))
    }

    fn get_conversation_boxed<'a>(
        &'a self,
        character_id: &'a CharacterId,
        conversation_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ConversationRecord, StoreError>> + Send + 'a>> {
        Box::pin(self.get_conversation(character_id, conversation_id))
    }

    fn latest_posts_boxed<'a>(
        &'a self,
        character_id: &'a CharacterId,
        character_name: &'a str,
        limit: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Post>, StoreError>> + Send + 'a>> {
        Box::pin(self.latest_posts(character_id, character_name, limit))
    }
}

/// Type-erased conversation store.
pub struct BoxConversationStore {
    inner: Box<dyn ConversationStoreDyn + Send + Sync>,
}

impl BoxConversationStore {
    /// Wrap a concrete `ConversationStore` in a type-erased box.
    pub fn new<T: ConversationStore + 'static>(store: T) -> Self {
        Self {
            inner: Box::new(store),
        }
    }

    pub async fn get_character(
        &self,
        character_id: &CharacterId,
    ) -> Result<CharacterConfig, StoreError> {
        self.inner.get_character_boxed(character_id).await
    }

    pub async fn put_post(
        &self,
        character: &CharacterConfig,
        tweet_id: &str,
        content: &str,
    ) -> Result<(), StoreError> {
        self.inner.put_post_boxed(character, tweet_id, content).await
    }

    pub async fn put_foreign_conversation(
        &self,
        character_id: &CharacterId,
        op_user: &str,
        conversation_id: &str,
        posts: Vec<Post>,
    ) -> Result<(), StoreError> {
        self.inner
            .put_foreign_conversation_boxed(character_id, op_user, conversation_id, posts)
            .await
    }

    pub async fn update_conversation(
        &self,
        character_id: &CharacterId,
        conversation_id: &str,
    ) -> Result<(), StoreError> {
        self.inner
            .update_conversation_boxed(character_id, conversation_id)
            .await
    }

    pub async fn get_conversation(
        &self,
        character_id: &CharacterId,
        conversation_id: &str,
    ) -> Result<ConversationRecord, StoreError> {
        self.inner
            .get_conversation_boxed(character_id, conversation_id)
            .await
    }

    pub async fn latest_posts(
        &self,
        character_id: &CharacterId,
        character_name: &str,
        limit: u32,
    ) -> Result<Vec<Post>, StoreError> {
        self.inner
            .latest_posts_boxed(character_id, character_name, limit)
            .await
    }
}
