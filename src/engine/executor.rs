use super::classify::{Classification, classify};
use super::propagation::propagate_flight_date;
use super::state::ExecutionState;
use crate::planner::{Plan, Task};
use crate::tools::{FlightRecord, ToolOutput, ToolRegistry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How the engine walks the plan.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SchedulingMode {
    /// Repeat declared-order passes until one makes no progress.
    #[default]
    Worklist,
    /// One declared-order pass. A task whose dependency is declared after it
    /// never becomes ready.
    SinglePass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExecutionStatus {
    AllCompleted,
    Partial,
}

/// Why execution stopped before the plan was exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ExecutionHalt {
    NotFound { task_id: String, message: String },
    ToolFailure { task_id: String, message: String },
}

impl ExecutionHalt {
    pub fn task_id(&self) -> &str {
        match self {
            Self::NotFound { task_id, .. } | Self::ToolFailure { task_id, .. } => task_id,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message, .. } | Self::ToolFailure { message, .. } => message,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub state: ExecutionState,
    pub status: ExecutionStatus,
    pub halt: Option<ExecutionHalt>,
    /// Tasks left unexecuted, excluding the one that halted the run.
    pub skipped_tasks: Vec<String>,
    pub invocations: usize,
}

impl ExecutionReport {
    pub fn is_complete(&self) -> bool {
        self.status == ExecutionStatus::AllCompleted
    }

    pub fn summary(&self) -> String {
        match (&self.halt, self.status) {
            (Some(halt), _) => halt.message().to_string(),
            (None, ExecutionStatus::AllCompleted) => "All tasks completed".to_string(),
            (None, ExecutionStatus::Partial) => format!(
                "Some tasks completed; not run: {}",
                self.skipped_tasks.join(", ")
            ),
        }
    }
}

/// Runs plan tasks one at a time in dependency order.
pub struct PlanExecutor {
    registry: Arc<ToolRegistry>,
    mode: SchedulingMode,
}

impl PlanExecutor {
    pub fn new(registry: Arc<ToolRegistry>, mode: SchedulingMode) -> Self {
        Self { registry, mode }
    }

    pub fn mode(&self) -> SchedulingMode {
        self.mode
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute every ready task, starting from `state`.
    ///
    /// Tasks already in `state` are never invoked again, so feeding a report's
    /// state back in is a no-op for finished work. The first NotFound or tool
    /// failure stops the run.
    pub async fn execute(&self, plan: &mut Plan, mut state: ExecutionState) -> ExecutionReport {
        self.replay_propagation(plan, &state);
        let mut invocations = 0;
        let mut pass = 0;

        let halt = 'passes: loop {
            pass += 1;
            let mut progressed = false;

            for index in 0..plan.len() {
                let task = plan.tasks()[index].clone();
                if state.is_executed(&task.id) {
                    continue;
                }
                if let Some(missing) = task.dependencies.iter().find(|dep| !state.is_executed(dep))
                {
                    debug!(task_id = %task.id, waiting_on = %missing, pass, "task not ready");
                    continue;
                }

                invocations += 1;
                match classify(&task, self.invoke(&task).await) {
                    Classification::Success(output) => {
                        info!(task_id = %task.id, tool = %task.tool_needed, "task completed");
                        let flight = output.as_found_flight().cloned();
                        state.record(&task.id, output);
                        progressed = true;
                        if let Some(flight) = flight {
                            let rewritten =
                                propagate_flight_date(plan, &flight, &state, &self.registry);
                            if !rewritten.is_empty() {
                                info!(task_id = %task.id, updated = ?rewritten, "flight date propagated");
                            }
                        }
                    }
                    Classification::NotFound(message) => {
                        warn!(task_id = %task.id, tool = %task.tool_needed, "lookup found nothing, aborting");
                        break 'passes Some(ExecutionHalt::NotFound {
                            task_id: task.id,
                            message,
                        });
                    }
                    Classification::ToolFailure(message) => {
                        warn!(task_id = %task.id, tool = %task.tool_needed, error = %message, "tool failed, aborting");
                        break 'passes Some(ExecutionHalt::ToolFailure {
                            task_id: task.id,
                            message,
                        });
                    }
                }
            }

            if self.mode == SchedulingMode::SinglePass || !progressed {
                break None;
            }
        };

        self.finish(plan, state, halt, invocations)
    }

    /// Re-apply date propagation for flights already in a resumed state, in
    /// completion order, so a reloaded plan sees the same rewrites.
    fn replay_propagation(&self, plan: &mut Plan, state: &ExecutionState) {
        let flights: Vec<(String, FlightRecord)> = state
            .executed_tasks()
            .iter()
            .filter_map(|id| {
                let flight = state.result(id)?.as_found_flight()?;
                Some((id.clone(), flight.clone()))
            })
            .collect();

        for (task_id, flight) in flights {
            let rewritten = propagate_flight_date(plan, &flight, state, &self.registry);
            if !rewritten.is_empty() {
                info!(task_id = %task_id, updated = ?rewritten, "flight date re-applied from saved state");
            }
        }
    }

    async fn invoke(&self, task: &Task) -> anyhow::Result<ToolOutput> {
        let tool = self.registry.resolve(&task.tool_needed)?;
        debug!(task_id = %task.id, tool = %tool.name(), "invoking tool");
        tool.execute(&task.parameters).await
    }

    fn finish(
        &self,
        plan: &Plan,
        state: ExecutionState,
        halt: Option<ExecutionHalt>,
        invocations: usize,
    ) -> ExecutionReport {
        let halted_id = halt.as_ref().map(ExecutionHalt::task_id);
        let skipped_tasks: Vec<String> = plan
            .task_ids()
            .filter(|id| !state.is_executed(id) && Some(*id) != halted_id)
            .map(ToString::to_string)
            .collect();

        if halt.is_none() {
            for id in &skipped_tasks {
                warn!(task_id = %id, mode = %self.mode, "dependencies never satisfied, task skipped");
            }
        }

        let status = if plan.task_ids().all(|id| state.is_executed(id)) {
            ExecutionStatus::AllCompleted
        } else {
            ExecutionStatus::Partial
        };
        info!(
            status = %status,
            executed = state.len(),
            total = plan.len(),
            invocations,
            "plan execution finished"
        );

        ExecutionReport {
            state,
            status,
            halt,
            skipped_tasks,
            invocations,
        }
    }
}
