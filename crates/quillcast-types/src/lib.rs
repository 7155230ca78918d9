//! Shared domain types for Quillcast.
//!
//! This crate has no business logic: it defines the data shapes exchanged
//! between the control-flow core (`quillcast-core`) and the capability
//! adapters (`quillcast-infra`).

pub mod agent;
pub mod character;
pub mod config;
pub mod error;
pub mod llm;
