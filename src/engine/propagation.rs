use super::state::ExecutionState;
use crate::planner::Plan;
use crate::tools::{FlightRecord, ToolKind, ToolRegistry};
use tracing::debug;

/// Point pending hotel searches at the date the found flight travels.
///
/// Returns the ids of the rewritten tasks. Tasks already executed keep their
/// parameters, and nothing changes when the flight carries no usable date.
pub fn propagate_flight_date(
    plan: &mut Plan,
    flight: &FlightRecord,
    state: &ExecutionState,
    registry: &ToolRegistry,
) -> Vec<String> {
    let Some(date) = flight.travel_date() else {
        return Vec::new();
    };

    let mut rewritten = Vec::new();
    for task in plan.tasks_mut() {
        if state.is_executed(&task.id)
            || registry.kind_of(&task.tool_needed) != Some(ToolKind::HotelSearch)
        {
            continue;
        }
        debug!(
            task_id = %task.id,
            from = task.param_str("check_in_date").unwrap_or(""),
            to = %date,
            "check-in date propagated"
        );
        task.set_parameter("check_in_date", date);
        rewritten.push(task.id.clone());
    }
    rewritten
}
