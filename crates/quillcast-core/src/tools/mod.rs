//! Capability tools agents may invoke.
//!
//! Each tool is a named function with a typed input/output contract,
//! surfaced to the model as a [`ToolSpec`] and invoked by the bounded
//! reasoning loop in `agent::engine`. The character configuration is
//! call-scoped: it rides along on every invocation instead of living in
//! the shared message state.

pub mod publish;
pub mod search;

pub use publish::PublishTool;
pub use search::{BoxSearchClient, SearchClient, SearchResult, SearchTool};

use std::future::Future;
use std::pin::Pin;

use quillcast_types::character::CharacterConfig;
use quillcast_types::error::ToolError;
use quillcast_types::llm::ToolSpec;

/// A capability an agent node can be bound to.
///
/// Uses RPITIT; [`BoxTool`] provides the object-safe wrapper nodes hold.
pub trait Tool: Send + Sync {
    /// Stable tool name the model calls it by.
    fn name(&self) -> &str;

    /// One-line description shown to the model.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's input object.
    fn input_schema(&self) -> serde_json::Value;

    /// Invoke the tool with model-supplied input.
    fn invoke(
        &self,
        input: serde_json::Value,
        character: &CharacterConfig,
    ) -> impl Future<Output = Result<String, ToolError>> + Send;
}

/// Object-safe version of [`Tool`] with boxed futures.
pub trait ToolDyn: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn input_schema(&self) -> serde_json::Value;

    fn invoke_boxed<'a>(
        &'a self,
        input: serde_json::Value,
        character: &'a CharacterConfig,
    ) -> Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send + 'a>>;
}

impl<T: Tool> ToolDyn for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn description(&self) -> &str {
        Tool::description(self)
    }

    fn input_schema(&self) -> serde_json::Value {
        Tool::input_schema(self)
    }

    fn invoke_boxed<'a>(
        &'a self,
        input: serde_json::Value,
        character: &'a CharacterConfig,
    ) -> Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send + 'a>> {
        Box::pin(self.invoke(input, character))
    }
}

/// Type-erased tool handle.
pub struct BoxTool {
    inner: Box<dyn ToolDyn + Send + Sync>,
}

impl BoxTool {
    /// Wrap a concrete [`Tool`] in a type-erased box.
    pub fn new<T: Tool + 'static>(tool: T) -> Self {
        Self {
            inner: Box::new(tool),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn description(&self) -> &str {
        self.inner.description()
    }

    /// The [`ToolSpec`] advertised to the model.
    pub fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.inner.name().to_string(),
            description: self.inner.description().to_string(),
            input_schema: self.inner.input_schema(),
        }
    }

    pub async fn invoke(
        &self,
        input: serde_json::Value,
        character: &CharacterConfig,
    ) -> Result<String, ToolError> {
        self.inner.invoke_boxed(input, character).await
    }
}
