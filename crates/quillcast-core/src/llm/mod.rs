//! Model capability abstraction.
//!
//! `LlmProvider` is the trait concrete backends implement;
//! `BoxLlmProvider` wraps any of them for runtime dispatch.

pub mod box_provider;
pub mod provider;

pub use box_provider::BoxLlmProvider;
pub use provider::LlmProvider;
