use crate::planner::Task;
use crate::tools::{FlightLookup, HotelLookup, ToolOutput};

/// How the engine proceeds after one invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Success(ToolOutput),
    /// The lookup ran but matched nothing. The message is for the traveller.
    NotFound(String),
    /// The invocation itself failed.
    ToolFailure(String),
}

pub fn classify(task: &Task, outcome: anyhow::Result<ToolOutput>) -> Classification {
    match outcome {
        Err(err) => Classification::ToolFailure(format!(
            "task {} failed: {err:#}",
            task.id
        )),
        Ok(ToolOutput::Flight(FlightLookup::NotFound { .. })) => {
            let date = task.param_str("date").unwrap_or("the requested date");
            Classification::NotFound(format!(
                "Sorry, no flights to {} on {date} were found. Please try a different date.",
                requested_place(task)
            ))
        }
        Ok(ToolOutput::Hotels(HotelLookup::Empty)) => Classification::NotFound(format!(
            "Sorry, no available hotels were found in {}. Please try different dates or another destination.",
            requested_place(task)
        )),
        Ok(output) => Classification::Success(output),
    }
}

fn requested_place(task: &Task) -> &str {
    task.param_str("destination")
        .or_else(|| task.param_str("location"))
        .unwrap_or("the destination")
}
