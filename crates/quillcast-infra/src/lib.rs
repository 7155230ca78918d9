//! Infrastructure adapters for Quillcast.
//!
//! Concrete implementations of the capability traits the core defines:
//! an in-memory conversation store, a DuckDuckGo search client, an
//! OpenAI-compatible LLM provider, plus the runtime-config loader and the
//! shared HTTP client the adapters are built on.

pub mod config;
pub mod http;
pub mod llm;
pub mod search;
pub mod store;
