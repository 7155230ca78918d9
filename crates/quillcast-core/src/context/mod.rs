//! Context-window budget enforcement.

pub mod window;

pub use window::{ContextWindowManager, HeuristicTokenCounter, TokenCounter};
