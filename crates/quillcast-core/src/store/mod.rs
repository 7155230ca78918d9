//! Conversation store ports.
//!
//! The core never touches a storage technology directly: it speaks to these
//! traits, and `quillcast-infra` provides implementations. All operations
//! key on `(character_id, conversation_id)`.

pub mod box_store;
pub mod convert;

pub use box_store::BoxConversationStore;

use quillcast_types::character::{CharacterConfig, CharacterId, ConversationRecord, Post};
use quillcast_types::error::StoreError;

/// Persistence port for characters and their conversation threads.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait ConversationStore: Send + Sync {
    /// Fetch a character's configuration.
    fn get_character(
        &self,
        character_id: &CharacterId,
    ) -> impl std::future::Future<Output = Result<CharacterConfig, StoreError>> + Send;

    /// Record a freshly published post as a new single-post conversation
    /// keyed by the tweet id.
    fn put_post(
        &self,
        character: &CharacterConfig,
        tweet_id: &str,
        content: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Record a conversation started by someone else that the character
    /// participates in.
    fn put_foreign_conversation(
        &self,
        character_id: &CharacterId,
        op_user: &str,
        conversation_id: &str,
        posts: Vec<Post>,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Merge newly fetched external posts into an existing conversation.
    ///
    /// The fetch itself is the [`ThreadFetcher`] capability the store was
    /// constructed with. Read-modify-write is not transactionally guarded;
    /// concurrent updates to the same conversation are last-write-wins.
    fn update_conversation(
        &self,
        character_id: &CharacterId,
        conversation_id: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Retrieve one conversation record.
    fn get_conversation(
        &self,
        character_id: &CharacterId,
        conversation_id: &str,
    ) -> impl std::future::Future<Output = Result<ConversationRecord, StoreError>> + Send;

    /// The character's own most recent opening posts, newest first.
    ///
    /// Filters to records whose `op_user` equals `character_name` and
    /// returns the first post of each, descending by conversation id.
    fn latest_posts(
        &self,
        character_id: &CharacterId,
        character_name: &str,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Post>, StoreError>> + Send;
}

/// External capability that fetches new posts for a conversation from the
/// publishing platform.
///
/// Injected into store adapters so `update_conversation` can merge fresh
/// replies without the core knowing how they are obtained.
pub trait ThreadFetcher: Send + Sync {
    fn fetch_new_posts(
        &self,
        character_id: &CharacterId,
        conversation_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Post>, StoreError>> + Send;
}

/// A fetcher that never finds new posts. Useful for tests and for
/// deployments without a platform read API.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopThreadFetcher;

impl ThreadFetcher for NoopThreadFetcher {
    async fn fetch_new_posts(
        &self,
        _character_id: &CharacterId,
        _conversation_id: &str,
    ) -> Result<Vec<Post>, StoreError> {
        Ok(Vec::new())
    }
}
