//! Runtime configuration for a Quillcast team.
//!
//! Every knob has a serde default so a partial (or absent) `quillcast.toml`
//! still yields a working configuration.

use serde::{Deserialize, Serialize};

/// Tunables for one agent team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Model identifier sent to the provider.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature for all node calls.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Max output tokens per completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Context-window token budget enforced before each model call.
    #[serde(default = "default_max_context_tokens")]
    pub max_context_tokens: u32,

    /// Maximum node executions per run. The sole guaranteed terminator.
    #[serde(default = "default_step_budget")]
    pub step_budget: u32,

    /// When fewer steps than this remain at editor entry, the editor
    /// publishes immediately.
    #[serde(default = "default_publish_deadline_steps")]
    pub publish_deadline_steps: u32,

    /// Cap on tool-invocation rounds inside a single node.
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: u32,

    /// Bound on idle pooled connections per host in the shared HTTP client.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f64 {
    0.0
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_max_context_tokens() -> u32 {
    4000
}

fn default_step_budget() -> u32 {
    10
}

fn default_publish_deadline_steps() -> u32 {
    2
}

fn default_max_tool_rounds() -> u32 {
    4
}

fn default_max_connections() -> u32 {
    10
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_context_tokens: default_max_context_tokens(),
            step_budget: default_step_budget(),
            publish_deadline_steps: default_publish_deadline_steps(),
            max_tool_rounds: default_max_tool_rounds(),
            max_connections: default_max_connections(),
        }
    }
}
