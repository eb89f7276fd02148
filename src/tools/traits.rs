use super::types::{ToolKind, ToolOutput, ToolSpec};
use serde_json::{Map, Value};
use std::future::Future;
use std::pin::Pin;

/// Core tool trait: one request/response capability the engine can invoke.
pub trait Tool: Send + Sync {
    /// Registry key, matched against `Task::tool_needed`.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema for parameters
    fn parameters_schema(&self) -> Value;

    fn kind(&self) -> ToolKind;

    /// Run once with the task's parameters. Faults are `Err`; "nothing matched"
    /// is a typed `Ok` value.
    fn execute<'a>(
        &'a self,
        args: &'a Map<String, Value>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolOutput>> + Send + 'a>>;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// Required string argument, trimmed.
pub(crate) fn required_str<'a>(
    tool: &str,
    args: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a str, crate::error::ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| crate::error::ToolError::InvalidArguments {
            name: tool.to_string(),
            message: format!("missing '{key}' parameter"),
        })
}
