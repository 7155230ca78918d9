//! Orchestration graph: shared run state and the team runner.

pub mod runner;
pub mod state;

pub use runner::{OrchestratorError, RunReport, TeamRunner};
pub use state::TeamState;
