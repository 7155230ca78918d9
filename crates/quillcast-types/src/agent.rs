//! Agent team routing types.
//!
//! The supervisor's routing decision is a closed enumeration validated at
//! the boundary: the model is constrained to it via a JSON schema, and any
//! value outside it is rejected when the response is parsed.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// A worker node in the team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Worker {
    Researcher,
    Writer,
    Editor,
}

/// All worker nodes, in supervisor-prompt order.
pub const WORKERS: [Worker; 3] = [Worker::Researcher, Worker::Writer, Worker::Editor];

impl Worker {
    /// The author name this worker tags its messages with.
    pub fn author_name(&self) -> &'static str {
        match self {
            Worker::Researcher => "researcher",
            Worker::Writer => "writer",
            Worker::Editor => "editor",
        }
    }
}

impl fmt::Display for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.author_name())
    }
}

impl FromStr for Worker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "researcher" => Ok(Worker::Researcher),
            "writer" => Ok(Worker::Writer),
            "editor" => Ok(Worker::Editor),
            other => Err(format!("invalid worker: '{other}'")),
        }
    }
}

/// Where the supervisor sends control next: a worker, or the terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum RouteTarget {
    #[serde(rename = "researcher")]
    Researcher,
    #[serde(rename = "writer")]
    Writer,
    #[serde(rename = "editor")]
    Editor,
    #[serde(rename = "FINISH")]
    Finish,
}

impl RouteTarget {
    /// The worker this target names, or `None` for the terminal state.
    pub fn as_worker(&self) -> Option<Worker> {
        match self {
            RouteTarget::Researcher => Some(Worker::Researcher),
            RouteTarget::Writer => Some(Worker::Writer),
            RouteTarget::Editor => Some(Worker::Editor),
            RouteTarget::Finish => None,
        }
    }
}

impl fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteTarget::Researcher => write!(f, "researcher"),
            RouteTarget::Writer => write!(f, "writer"),
            RouteTarget::Editor => write!(f, "editor"),
            RouteTarget::Finish => write!(f, "FINISH"),
        }
    }
}

/// The supervisor's structured routing decision.
///
/// The model produces this as JSON constrained by the derived schema.
/// Parsing rejects any `next` value outside the closed enumeration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RouterDecision {
    /// Worker to route to next. `FINISH` when no more work is needed.
    pub next: RouteTarget,
}

/// How a team run ended.
///
/// The two modes are always distinguishable: a clean supervisor `FINISH`
/// versus the hard step budget running out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The supervisor routed to the terminal state.
    Finish,
    /// The step budget was exhausted before a FINISH decision.
    StepBudgetExhausted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_roundtrip() {
        for w in WORKERS {
            let parsed: Worker = w.to_string().parse().unwrap();
            assert_eq!(w, parsed);
        }
    }

    #[test]
    fn test_route_target_serde() {
        assert_eq!(
            serde_json::to_string(&RouteTarget::Finish).unwrap(),
            "\"FINISH\""
        );
        assert_eq!(
            serde_json::to_string(&RouteTarget::Researcher).unwrap(),
            "\"researcher\""
        );
        let parsed: RouteTarget = serde_json::from_str("\"editor\"").unwrap();
        assert_eq!(parsed, RouteTarget::Editor);
    }

    #[test]
    fn test_router_decision_rejects_unknown_target() {
        let err = serde_json::from_str::<RouterDecision>(r#"{"next": "janitor"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_router_decision_rejects_extra_fields() {
        let err = serde_json::from_str::<RouterDecision>(r#"{"next": "writer", "why": "x"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_route_target_as_worker() {
        assert_eq!(RouteTarget::Writer.as_worker(), Some(Worker::Writer));
        assert_eq!(RouteTarget::Finish.as_worker(), None);
    }

    #[test]
    fn test_router_schema_is_closed() {
        let schema = schemars::schema_for!(RouterDecision);
        let json = serde_json::to_value(&schema).unwrap();
        let rendered = json.to_string();
        assert!(rendered.contains("researcher"));
        assert!(rendered.contains("FINISH"));
    }

    #[test]
    fn test_termination_serde() {
        assert_eq!(
            serde_json::to_string(&Termination::StepBudgetExhausted).unwrap(),
            "\"step_budget_exhausted\""
        );
    }
}
