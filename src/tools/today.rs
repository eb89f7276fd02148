use super::traits::Tool;
use super::types::{ToolKind, ToolOutput};
use chrono::{Local, NaiveDate};
use serde_json::{Map, Value, json};
use std::future::Future;
use std::pin::Pin;

/// Reports the local calendar date as `YYYY-MM-DD`.
#[derive(Debug, Default)]
pub struct TodayTool {
    fixed: Option<NaiveDate>,
}

impl TodayTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always report `date`. For deterministic runs.
    pub fn fixed(date: NaiveDate) -> Self {
        Self { fixed: Some(date) }
    }

    fn today(&self) -> NaiveDate {
        self.fixed.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Tool for TodayTool {
    fn name(&self) -> &str {
        "get_today"
    }

    fn description(&self) -> &str {
        "Get today's date in YYYY-MM-DD form."
    }

    fn parameters_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Clock
    }

    fn execute<'a>(
        &'a self,
        _args: &'a Map<String, Value>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolOutput>> + Send + 'a>> {
        Box::pin(async move { Ok(ToolOutput::Text(self.today().format("%Y-%m-%d").to_string())) })
    }
}
