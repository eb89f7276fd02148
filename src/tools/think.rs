use super::traits::{Tool, required_str};
use super::types::{ToolKind, ToolOutput};
use serde_json::{Map, Value, json};
use std::future::Future;
use std::pin::Pin;

/// Planning pause: records a reflection and echoes a confirmation.
#[derive(Debug, Default)]
pub struct ThinkTool;

impl ThinkTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for ThinkTool {
    fn name(&self) -> &str {
        "think"
    }

    fn description(&self) -> &str {
        "Record a reflection on progress so far. Use when: pausing between searches to assess what is known and what is still missing."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "reflection": {
                    "type": "string",
                    "description": "Findings so far, remaining gaps and the next step"
                }
            },
            "required": ["reflection"]
        })
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Reflection
    }

    fn execute<'a>(
        &'a self,
        args: &'a Map<String, Value>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolOutput>> + Send + 'a>> {
        Box::pin(async move {
            let reflection = required_str(self.name(), args, "reflection")?;
            Ok(ToolOutput::Text(format!("Reflection recorded: {reflection}")))
        })
    }
}
