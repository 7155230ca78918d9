//! Team runner: the supervisor-routed state machine.
//!
//! States: supervisor, researcher, writer, editor, terminal. The initial
//! state is the supervisor; only the supervisor reaches terminal. Worker
//! edges are fixed (researcher and editor return to the supervisor, the
//! writer hands to the editor); the supervisor's edge is model-decided.
//!
//! Every executed node costs one step. A supervisor call that decides
//! FINISH terminates without spending a step. The step budget is the sole
//! guaranteed loop-breaker: nothing in here trusts the model to stop.

use std::sync::Arc;

use thiserror::Error;
use tracing::{Instrument, info, info_span};

use quillcast_types::agent::{Termination, Worker};
use quillcast_types::character::CharacterConfig;
use quillcast_types::config::RuntimeConfig;
use quillcast_types::error::ContextError;
use quillcast_types::llm::Message;

use crate::agent::{Directive, EditorNode, NodeError, ResearcherNode, SupervisorNode, WriterNode};
use crate::context::ContextWindowManager;
use crate::llm::BoxLlmProvider;
use crate::tools::BoxTool;

use super::state::TeamState;

/// Errors that abort a team run.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// A node failed; the run cannot continue.
    #[error(transparent)]
    Node(#[from] NodeError),

    /// The runner is misconfigured; nothing was executed.
    #[error(transparent)]
    Context(#[from] ContextError),
}

/// The outcome of a completed run.
///
/// Both termination modes carry the final state; callers inspect
/// `termination` to tell a clean FINISH from a budget cutoff.
#[derive(Debug)]
pub struct RunReport {
    pub state: TeamState,
    pub termination: Termination,
}

pub struct TeamRunner {
    supervisor: SupervisorNode,
    researcher: ResearcherNode,
    writer: WriterNode,
    editor: EditorNode,
    window: Arc<ContextWindowManager>,
    config: Arc<RuntimeConfig>,
}

impl TeamRunner {
    pub fn new(
        provider: Arc<BoxLlmProvider>,
        window: Arc<ContextWindowManager>,
        config: Arc<RuntimeConfig>,
        search: BoxTool,
        publish: BoxTool,
    ) -> Self {
        Self {
            supervisor: SupervisorNode::new(provider.clone(), window.clone(), config.clone()),
            researcher: ResearcherNode::new(
                provider.clone(),
                window.clone(),
                config.clone(),
                search,
            ),
            writer: WriterNode::new(provider.clone(), window.clone(), config.clone()),
            editor: EditorNode::new(provider, window.clone(), config.clone(), publish),
            window,
            config,
        }
    }

    /// Run the machine from fresh state until FINISH or budget cutoff.
    pub async fn run(
        &self,
        initial_messages: Vec<Message>,
        character: &CharacterConfig,
        step_budget: u32,
    ) -> Result<RunReport, OrchestratorError> {
        self.run_state(TeamState::new(initial_messages, step_budget), character)
            .await
    }

    /// Run the machine from pre-built state (e.g. with seeded past tweets).
    pub async fn run_state(
        &self,
        state: TeamState,
        character: &CharacterConfig,
    ) -> Result<RunReport, OrchestratorError> {
        // Configuration problems abort before any node executes.
        self.window.ensure_counter()?;

        let span = info_span!(
            "team.run",
            character = %character.character_name,
            step_budget = state.remaining_steps,
        );
        self.drive(state, character).instrument(span).await
    }

    async fn drive(
        &self,
        mut state: TeamState,
        character: &CharacterConfig,
    ) -> Result<RunReport, OrchestratorError> {
        loop {
            if state.remaining_steps == 0 {
                info!("Step budget exhausted at supervisor entry");
                return Ok(RunReport {
                    state,
                    termination: Termination::StepBudgetExhausted,
                });
            }

            let target = self.supervisor.route(&state).await?;
            state.next = Some(target);
            let Some(mut worker) = target.as_worker() else {
                // FINISH spends no step.
                info!(
                    remaining_steps = state.remaining_steps,
                    "Supervisor decided FINISH"
                );
                return Ok(RunReport {
                    state,
                    termination: Termination::Finish,
                });
            };
            state.remaining_steps -= 1;

            // Follow fixed worker edges until control returns to the
            // supervisor.
            loop {
                if state.remaining_steps == 0 {
                    info!(next_worker = %worker, "Step budget exhausted before worker");
                    return Ok(RunReport {
                        state,
                        termination: Termination::StepBudgetExhausted,
                    });
                }

                let (message, directive) = match worker {
                    Worker::Researcher => self.researcher.run(&state, character).await?,
                    Worker::Writer => self.writer.run(&state, character).await?,
                    Worker::Editor => self.editor.run(&state, character).await?,
                };
                state.append_message(message);
                state.remaining_steps -= 1;

                match directive {
                    Directive::ToSupervisor => break,
                    Directive::ToEditor => worker = Worker::Editor,
                }
            }
        }
    }

    /// The configured default step budget.
    pub fn default_step_budget(&self) -> u32 {
        self.config.step_budget
    }
}
