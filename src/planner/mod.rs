mod dependency_graph;
mod llm_planner;
pub mod parser;
mod prompts;
mod types;

pub use dependency_graph::{GraphError, validate_tasks};
pub use llm_planner::{LlmPlanner, Planner};
pub use parser::PlanParser;
pub use prompts::{planning_system_prompt, planning_user_message};
pub use types::{Plan, Task};
