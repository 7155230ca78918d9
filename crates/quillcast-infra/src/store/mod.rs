//! Conversation store adapters.

pub mod memory;

pub use memory::InMemoryConversationStore;
