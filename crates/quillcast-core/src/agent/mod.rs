//! Role-specialized agent nodes.
//!
//! Each node wraps one model call (plus, for researcher and editor, a
//! bounded tool-use loop), appends exactly one role-authored message to
//! shared state, and returns a routing directive. Worker directives are
//! fixed edges; only the supervisor's directive is model-decided.

pub mod editor;
pub mod engine;
pub mod researcher;
pub mod supervisor;
pub mod writer;

pub use editor::EditorNode;
pub use engine::ToolLoop;
pub use researcher::ResearcherNode;
pub use supervisor::SupervisorNode;
pub use writer::WriterNode;

use thiserror::Error;

use quillcast_types::error::{ContextError, RouteError, ToolError};
use quillcast_types::llm::LlmError;

/// Fixed routing directive a worker node returns.
///
/// Workers never reach the terminal state directly; only the supervisor
/// does, via its model-decided [`RouteTarget`](quillcast_types::agent::RouteTarget).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    ToSupervisor,
    ToEditor,
}

/// Errors from a single node execution.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Route(#[from] RouteError),
}
