use super::types::Task;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Structural defects a planner can produce in a task graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("task id cannot be empty")]
    EmptyTaskId,

    #[error("duplicate task id: {0}")]
    DuplicateTaskId(String),

    #[error("task {task} depends on unknown task {dependency} (known tasks: [{known}])")]
    UnknownDependency {
        task: String,
        dependency: String,
        known: String,
    },

    #[error("cycle detected: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}

/// Check ids, dependency references and acyclicity of a task list.
///
/// Declaration order is not checked: a task may depend on one declared after it.
pub fn validate_tasks(tasks: &[Task]) -> Result<(), GraphError> {
    let task_ids = collect_task_ids(tasks)?;
    let adjacency = dependency_edges(tasks, &task_ids)?;
    validate_cycle_free(tasks, &adjacency)
}

fn collect_task_ids(tasks: &[Task]) -> Result<BTreeSet<&str>, GraphError> {
    let mut ids = BTreeSet::new();
    for task in tasks {
        if task.id.trim().is_empty() {
            return Err(GraphError::EmptyTaskId);
        }
        if !ids.insert(task.id.as_str()) {
            return Err(GraphError::DuplicateTaskId(task.id.clone()));
        }
    }
    Ok(ids)
}

/// Edges point from a task to each task it waits on.
fn dependency_edges<'a>(
    tasks: &'a [Task],
    task_ids: &BTreeSet<&str>,
) -> Result<BTreeMap<&'a str, Vec<&'a str>>, GraphError> {
    let mut adjacency = BTreeMap::new();
    for task in tasks {
        let mut deps = Vec::with_capacity(task.dependencies.len());
        for dep in &task.dependencies {
            if !task_ids.contains(dep.as_str()) {
                return Err(GraphError::UnknownDependency {
                    task: task.id.clone(),
                    dependency: dep.clone(),
                    known: task_ids.iter().copied().collect::<Vec<_>>().join(", "),
                });
            }
            deps.push(dep.as_str());
        }
        deps.dedup();
        adjacency.insert(task.id.as_str(), deps);
    }
    Ok(adjacency)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Visiting,
    Visited,
}

fn validate_cycle_free(
    tasks: &[Task],
    adjacency: &BTreeMap<&str, Vec<&str>>,
) -> Result<(), GraphError> {
    let mut states = BTreeMap::new();
    let mut stack = Vec::new();

    for task in tasks {
        if states.contains_key(task.id.as_str()) {
            continue;
        }
        if let Some(path) = detect_cycle(task.id.as_str(), adjacency, &mut states, &mut stack) {
            return Err(GraphError::Cycle(path));
        }
    }
    Ok(())
}

fn detect_cycle<'a>(
    task_id: &'a str,
    adjacency: &BTreeMap<&'a str, Vec<&'a str>>,
    states: &mut BTreeMap<&'a str, VisitState>,
    stack: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    states.insert(task_id, VisitState::Visiting);
    stack.push(task_id);

    for &dep in adjacency.get(task_id).into_iter().flatten() {
        match states.get(dep) {
            Some(VisitState::Visiting) => {
                let start = stack.iter().position(|entry| *entry == dep).unwrap_or(0);
                let mut cycle: Vec<String> =
                    stack[start..].iter().map(|id| (*id).to_string()).collect();
                cycle.push(dep.to_string());
                return Some(cycle);
            }
            Some(VisitState::Visited) => {}
            None => {
                if let Some(path) = detect_cycle(dep, adjacency, states, stack) {
                    return Some(path);
                }
            }
        }
    }

    stack.pop();
    states.insert(task_id, VisitState::Visited);
    None
}
