use crate::tools::ToolSpec;
use std::fmt::Write;

const PLANNING_PROMPT: &str = "\
You are a professional travel task planner. Break the user's travel request into \
concrete tool invocations and declare the dependencies between them.

<Output Format>
Return a JSON object with exactly this structure:
{
  \"tasks\": [
    {
      \"id\": \"<unique task id>\",
      \"description\": \"<what this task does>\",
      \"tool_needed\": \"<one of the available tool names>\",
      \"dependencies\": [\"<ids of tasks that must finish first>\"],
      \"parameters\": { <tool parameters> }
    }
  ]
}
</Output Format>

<Rules>
1. Return ONLY the JSON object, with no explanatory text.
2. Use only the tools listed below, with their parameter names.
3. Search flights before hotels: a hotel search depends on the flight search \
that establishes the travel date.
4. Task ids are unique; dependencies reference ids from the same plan and never form a cycle.
5. Extract dates, cities and the number of nights from the request. Prefer \
YYYY-MM-DD dates, resolved relative to today's date.
</Rules>";

/// System prompt for the planner: fixed rules plus the available tool catalogue.
pub fn planning_system_prompt(tools: &[ToolSpec]) -> String {
    let mut prompt = String::from(PLANNING_PROMPT);
    prompt.push_str("\n\n<Available Tools>\n");
    for (index, tool) in tools.iter().enumerate() {
        let params = tool
            .parameters
            .get("properties")
            .and_then(serde_json::Value::as_object)
            .map(|props| props.keys().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        let _ = writeln!(
            prompt,
            "{}. **{}**: {} (parameters: {})",
            index + 1,
            tool.name,
            tool.description,
            if params.is_empty() { "none" } else { params.as_str() }
        );
    }
    prompt.push_str("</Available Tools>");
    prompt
}

pub fn planning_user_message(request: &str, today: &str) -> String {
    format!("Today's date: {today}\n\nUser request: {request}")
}
