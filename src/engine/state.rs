use crate::tools::ToolOutput;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What has run so far and what it produced.
///
/// Grows monotonically: the engine only appends. Serializable so a caller can
/// persist it and resume a plan without repeating finished tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionState {
    #[serde(default)]
    executed_tasks: Vec<String>,
    #[serde(default)]
    task_results: BTreeMap<String, ToolOutput>,
}

impl ExecutionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_executed(&self, task_id: &str) -> bool {
        self.task_results.contains_key(task_id)
    }

    /// Ids in completion order.
    pub fn executed_tasks(&self) -> &[String] {
        &self.executed_tasks
    }

    pub fn task_results(&self) -> &BTreeMap<String, ToolOutput> {
        &self.task_results
    }

    pub fn result(&self, task_id: &str) -> Option<&ToolOutput> {
        self.task_results.get(task_id)
    }

    /// Record a completed task. A second record for the same id is ignored.
    pub(crate) fn record(&mut self, task_id: &str, output: ToolOutput) -> bool {
        if self.is_executed(task_id) {
            return false;
        }
        self.executed_tasks.push(task_id.to_string());
        self.task_results.insert(task_id.to_string(), output);
        true
    }

    pub fn len(&self) -> usize {
        self.executed_tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.executed_tasks.is_empty()
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a saved state, repairing an `executed_tasks` list that disagrees
    /// with `task_results`.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let raw: Self = serde_json::from_str(json)?;
        let mut state = Self::new();
        for id in &raw.executed_tasks {
            if let Some(output) = raw.task_results.get(id) {
                state.record(id, output.clone());
            }
        }
        for (id, output) in &raw.task_results {
            state.record(id, output.clone());
        }
        Ok(state)
    }
}
