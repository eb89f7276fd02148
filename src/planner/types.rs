use super::dependency_graph::validate_tasks;
use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One unit of work: a tool invocation with its prerequisites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub tool_needed: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl Task {
    pub fn new(id: impl Into<String>, tool_needed: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            tool_needed: tool_needed.into(),
            dependencies: Vec::new(),
            parameters: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependencies.push(dependency.into());
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// String parameter, if present and a JSON string.
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).and_then(Value::as_str)
    }

    pub fn set_parameter(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.parameters.insert(key.into(), value.into());
    }
}

/// Unvalidated wire shape of a plan.
#[derive(Deserialize)]
pub(super) struct RawPlan {
    pub(super) tasks: Vec<Task>,
}

/// A validated task graph.
///
/// Construction fails on an empty task list, duplicate or blank ids, dependencies
/// on unknown tasks, and dependency cycles. After construction only task
/// parameters may change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPlan")]
pub struct Plan {
    tasks: Vec<Task>,
}

impl TryFrom<RawPlan> for Plan {
    type Error = PlanError;

    fn try_from(raw: RawPlan) -> Result<Self, Self::Error> {
        Self::new(raw.tasks)
    }
}

impl Plan {
    pub fn new(tasks: Vec<Task>) -> Result<Self, PlanError> {
        if tasks.is_empty() {
            return Err(PlanError::Empty);
        }
        validate_tasks(&tasks).map_err(|err| PlanError::InvalidPlan(err.to_string()))?;
        Ok(Self { tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Mutable access for parameter rewrites. Ids and edges are not to be touched.
    pub(crate) fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|task| task.id.as_str())
    }
}
