//! Multi-agent control-flow core for Quillcast.
//!
//! A supervisor-routed state machine dispatches work among role-specialized
//! agent nodes (researcher, writer, editor), accumulates shared conversation
//! state, enforces a context-window budget, and terminates deterministically
//! via a hard step budget.
//!
//! External capabilities (LLM completion, search, publishing, conversation
//! persistence) are injected behind traits; adapters live in
//! `quillcast-infra`.

pub mod agent;
pub mod context;
pub mod graph;
pub mod llm;
pub mod store;
pub mod tools;
