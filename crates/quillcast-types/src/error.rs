use thiserror::Error;

/// Errors from context-window trimming.
#[derive(Debug, Error)]
pub enum ContextError {
    /// No token counter was configured. Fatal before any node executes.
    #[error("no token counter configured for context window management")]
    MissingTokenCounter,

    /// Trimming would discard every non-system message and still exceed the
    /// budget. Never silently tolerated.
    #[error("context budget exhausted: {cost} tokens remain against a budget of {budget}")]
    BudgetExhausted { cost: u32, budget: u32 },
}

/// Errors from supervisor routing.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The model produced a value outside the closed router enumeration.
    #[error("router returned a value outside the enumeration: {0}")]
    InvalidTarget(String),

    /// The model produced no parseable decision at all.
    #[error("router returned no decision: {0}")]
    EmptyDecision(String),
}

/// Errors from conversation store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("record not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from capability tool invocations.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: '{0}'")]
    UnknownTool(String),

    #[error("invalid tool input: {0}")]
    InvalidInput(String),

    #[error("search failed: {0}")]
    Search(String),

    #[error("publish failed: {0}")]
    Publish(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_error_display() {
        let err = ContextError::BudgetExhausted {
            cost: 5000,
            budget: 4000,
        };
        assert!(err.to_string().contains("5000"));
        assert!(err.to_string().contains("4000"));
    }

    #[test]
    fn test_route_error_display() {
        let err = RouteError::InvalidTarget("janitor".to_string());
        assert!(err.to_string().contains("janitor"));
    }

    #[test]
    fn test_tool_error_wraps_store_error() {
        let err = ToolError::from(StoreError::NotFound);
        assert_eq!(err.to_string(), "record not found");
    }
}
