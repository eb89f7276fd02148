use super::types::{Plan, RawPlan};
use crate::error::PlanError;

pub struct PlanParser;

impl PlanParser {
    /// Parse a bare `{"tasks": [...]}` document into a validated plan.
    pub fn parse(json_str: &str) -> Result<Plan, PlanError> {
        let raw: RawPlan =
            serde_json::from_str(json_str).map_err(|err| PlanError::Parse(err.to_string()))?;
        Plan::new(raw.tasks)
    }

    /// Parse free-form model output that may wrap the plan in prose or fences.
    pub fn parse_response(text: &str) -> Result<Plan, PlanError> {
        let json = Self::extract_json(text)
            .ok_or_else(|| PlanError::Parse("no JSON object found in planner output".into()))?;
        Self::parse(json)
    }

    pub fn extract_json(text: &str) -> Option<&str> {
        extract_fenced(text, '{').or_else(|| extract_delimited(text, '{', '}'))
    }
}

/// Body of the first ```json (or bare ```) fence whose content starts with `open`.
pub(crate) fn extract_fenced(text: &str, open: char) -> Option<&str> {
    if let Some(start) = text.find("```json") {
        let rest = &text[start + "```json".len()..];
        if let Some(end) = rest.find("```") {
            let candidate = rest[..end].trim();
            if candidate.starts_with(open) {
                return Some(candidate);
            }
        }
    }

    let start = text.find("```")?;
    let rest = &text[start + "```".len()..];
    let end = rest.find("```")?;
    let candidate = rest[..end].trim();
    candidate.starts_with(open).then_some(candidate)
}

/// Outermost `open ... close` span of the text.
pub(crate) fn extract_delimited(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}
