//! Request → plan → execution → confirmation.
//!
//! Every stage's failure is folded into a [`WorkflowOutcome`]; `run` itself
//! never errors, so callers always get either a confirmation or one message.

use crate::booking::{BookingConfirmation, BookingSynthesizer};
use crate::engine::{ExecutionReport, ExecutionState, ExecutionStatus, PlanExecutor};
use crate::error::PlanError;
use crate::planner::{Plan, Planner};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WorkflowOutcome {
    Confirmed(BookingConfirmation),
    PlanningFailed {
        message: String,
    },
    Halted {
        task_id: String,
        message: String,
    },
    Incomplete {
        status: ExecutionStatus,
        message: String,
    },
}

impl WorkflowOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        match self {
            Self::Confirmed(confirmation) => Some(confirmation),
            _ => None,
        }
    }

    /// User-facing text for failures; `None` for a confirmation.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Confirmed(_) => None,
            Self::PlanningFailed { message }
            | Self::Halted { message, .. }
            | Self::Incomplete { message, .. } => Some(message),
        }
    }

    /// Pretty JSON: the confirmation record itself, or a status/message object.
    pub fn render(&self) -> String {
        let value = match self {
            Self::Confirmed(confirmation) => serde_json::to_value(confirmation),
            Self::PlanningFailed { message } => Ok(json!({
                "status": "planning_failed",
                "message": message,
            })),
            Self::Halted { task_id, message } => Ok(json!({
                "status": "halted",
                "task_id": task_id,
                "message": message,
            })),
            Self::Incomplete { status, message } => Ok(json!({
                "status": "incomplete",
                "execution": status,
                "message": message,
            })),
        };
        value
            .and_then(|value| serde_json::to_string_pretty(&value))
            .unwrap_or_else(|err| format!("{{\"status\": \"render_failed\", \"message\": \"{err}\"}}"))
    }
}

/// The orchestrator. Collaborators are injected; nothing here is global.
pub struct TravelWorkflow {
    planner: Arc<dyn Planner>,
    executor: PlanExecutor,
    synthesizer: BookingSynthesizer,
}

impl TravelWorkflow {
    pub fn new(
        planner: Arc<dyn Planner>,
        executor: PlanExecutor,
        synthesizer: BookingSynthesizer,
    ) -> Self {
        Self {
            planner,
            executor,
            synthesizer,
        }
    }

    pub async fn plan(&self, request: &str) -> Result<Plan, PlanError> {
        let specs = self.executor.registry().specs();
        self.planner.plan(request, &specs).await
    }

    pub async fn execute(&self, plan: &mut Plan, state: ExecutionState) -> ExecutionReport {
        self.executor.execute(plan, state).await
    }

    pub fn conclude(&self, report: &ExecutionReport) -> WorkflowOutcome {
        if let Some(halt) = &report.halt {
            return WorkflowOutcome::Halted {
                task_id: halt.task_id().to_string(),
                message: halt.message().to_string(),
            };
        }

        match self.synthesizer.synthesize(&report.state) {
            Ok(confirmation) => WorkflowOutcome::Confirmed(confirmation),
            Err(err) => {
                warn!(status = %report.status, error = %err, "booking not possible");
                WorkflowOutcome::Incomplete {
                    status: report.status,
                    message: format!("Booking could not be completed: {err}"),
                }
            }
        }
    }

    pub async fn run(&self, request: &str) -> WorkflowOutcome {
        info!(request = %request, "workflow started");

        let mut plan = match self.plan(request).await {
            Ok(plan) => plan,
            Err(err) => {
                warn!(error = %err, "planning failed");
                return WorkflowOutcome::PlanningFailed {
                    message: format!("Planning failed: {err}"),
                };
            }
        };

        let report = self.execute(&mut plan, ExecutionState::new()).await;
        let outcome = self.conclude(&report);
        info!(confirmed = outcome.is_confirmed(), "workflow finished");
        outcome
    }
}
