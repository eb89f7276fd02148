use super::parser::PlanParser;
use super::prompts::{planning_system_prompt, planning_user_message};
use super::types::Plan;
use crate::error::PlanError;
use crate::llm::ModelClient;
use crate::tools::ToolSpec;
use chrono::{Local, NaiveDate};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, info};

/// Turns a free-text request into a validated plan over the given tools.
pub trait Planner: Send + Sync {
    fn plan<'a>(
        &'a self,
        request: &'a str,
        tools: &'a [ToolSpec],
    ) -> Pin<Box<dyn Future<Output = Result<Plan, PlanError>> + Send + 'a>>;
}

/// Single-attempt planner backed by a chat model.
#[derive(Debug, Clone)]
pub struct LlmPlanner {
    client: ModelClient,
    today: Option<NaiveDate>,
}

impl LlmPlanner {
    pub fn new(client: ModelClient) -> Self {
        Self {
            client,
            today: None,
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }
}

impl Planner for LlmPlanner {
    fn plan<'a>(
        &'a self,
        request: &'a str,
        tools: &'a [ToolSpec],
    ) -> Pin<Box<dyn Future<Output = Result<Plan, PlanError>> + Send + 'a>> {
        Box::pin(async move {
            let today = self
                .today
                .unwrap_or_else(|| Local::now().date_naive())
                .format("%Y-%m-%d")
                .to_string();
            let system_prompt = planning_system_prompt(tools);
            let message = planning_user_message(request, &today);

            let reply = self
                .client
                .ask(Some(&system_prompt), &message)
                .await
                .map_err(|err| PlanError::Planner(format!("{err:#}")))?;
            debug!(chars = reply.len(), "planner replied");

            let plan = PlanParser::parse_response(&reply)?;
            info!(
                tasks = plan.len(),
                model = %self.client.model(),
                "plan created"
            );
            Ok(plan)
        })
    }
}
