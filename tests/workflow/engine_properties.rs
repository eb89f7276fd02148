use std::sync::Arc;

use itinera::booking::BookingSynthesizer;
use itinera::engine::{
    ExecutionHalt, ExecutionState, ExecutionStatus, PlanExecutor, SchedulingMode,
};
use itinera::planner::{Plan, PlanParser, Task};
use itinera::tools::{ThinkTool, Tool, ToolKind, ToolRegistry};

use super::travel_harness::{
    CallLog, RecordingTool, flight_task, found_flight, hotel_list, hotel_task,
};

fn executor(tools: Vec<Box<dyn Tool>>, mode: SchedulingMode) -> PlanExecutor {
    PlanExecutor::new(Arc::new(ToolRegistry::from_tools(tools)), mode)
}

fn stubs(
    hotel_outcome: Result<itinera::tools::ToolOutput, String>,
) -> (Vec<Box<dyn Tool>>, CallLog, CallLog) {
    let (flights, flight_calls) = RecordingTool::new(
        "search_flights",
        ToolKind::FlightSearch,
        Ok(found_flight("2025-10-20", 1200.0)),
    );
    let (hotels, hotel_calls) =
        RecordingTool::new("search_hotels", ToolKind::HotelSearch, hotel_outcome);
    (vec![flights, hotels], flight_calls, hotel_calls)
}

#[tokio::test]
async fn saved_state_resumes_without_repeating_work() {
    let mut plan = Plan::new(vec![flight_task("flight"), hotel_task("hotel", "flight")]).unwrap();

    let (tools, flight_calls, hotel_calls) = stubs(Err("upstream timeout".into()));
    let first = executor(tools, SchedulingMode::Worklist)
        .execute(&mut plan, ExecutionState::new())
        .await;
    assert!(matches!(
        first.halt,
        Some(ExecutionHalt::ToolFailure { ref task_id, .. }) if task_id == "hotel"
    ));
    assert_eq!(flight_calls.lock().unwrap().len(), 1);
    assert_eq!(hotel_calls.lock().unwrap().len(), 1);

    let saved = first.state.to_json().unwrap();
    let restored = ExecutionState::from_json(&saved).unwrap();
    assert_eq!(restored.executed_tasks(), ["flight"]);

    let (tools, flight_calls, hotel_calls) = stubs(Ok(hotel_list(450.0)));
    let second = executor(tools, SchedulingMode::Worklist)
        .execute(&mut plan, restored)
        .await;

    assert_eq!(second.status, ExecutionStatus::AllCompleted);
    assert_eq!(second.invocations, 1);
    assert!(flight_calls.lock().unwrap().is_empty());
    let hotel_args = hotel_calls.lock().unwrap();
    assert_eq!(hotel_args[0]["check_in_date"], "2025-10-20");
    assert_eq!(second.state.executed_tasks(), ["flight", "hotel"]);

    let confirmation = BookingSynthesizer::new(3, "Wang Wei")
        .synthesize(&second.state)
        .unwrap();
    assert!((confirmation.total_price - 2550.0).abs() < f64::EPSILON);

    // Running a finished plan again is a no-op.
    let (tools, flight_calls, hotel_calls) = stubs(Ok(hotel_list(450.0)));
    let third = executor(tools, SchedulingMode::Worklist)
        .execute(&mut plan, second.state.clone())
        .await;
    assert_eq!(third.invocations, 0);
    assert_eq!(third.state, second.state);
    assert!(flight_calls.lock().unwrap().is_empty());
    assert!(hotel_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn dependency_declared_late_still_runs_first() {
    let mut plan = Plan::new(vec![hotel_task("hotel", "flight"), flight_task("flight")]).unwrap();
    let (tools, _, hotel_calls) = stubs(Ok(hotel_list(300.0)));

    let report = executor(tools, SchedulingMode::Worklist)
        .execute(&mut plan, ExecutionState::new())
        .await;

    assert!(report.is_complete());
    assert_eq!(report.state.executed_tasks(), ["flight", "hotel"]);
    assert_eq!(hotel_calls.lock().unwrap()[0]["check_in_date"], "2025-10-20");
    assert_eq!(
        plan.task("hotel").unwrap().param_str("check_in_date"),
        Some("2025-10-20")
    );
}

#[tokio::test]
async fn single_pass_leaves_late_dependencies_unrun() {
    let mut plan = Plan::new(vec![hotel_task("hotel", "flight"), flight_task("flight")]).unwrap();
    let (tools, _, hotel_calls) = stubs(Ok(hotel_list(300.0)));

    let report = executor(tools, SchedulingMode::SinglePass)
        .execute(&mut plan, ExecutionState::new())
        .await;

    assert_eq!(report.status, ExecutionStatus::Partial);
    assert!(report.halt.is_none());
    assert_eq!(report.skipped_tasks, ["hotel"]);
    assert!(report.summary().contains("hotel"));
    assert!(hotel_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn reflection_tasks_do_not_disturb_booking() {
    let plan_json = r#"{"tasks": [
        {"id": "think", "tool_needed": "think",
         "parameters": {"reflection": "flight first, then a hotel near the river"}},
        {"id": "flight", "tool_needed": "search_flights", "dependencies": ["think"],
         "parameters": {"home": "Beijing", "destination": "Wuhan", "date": "2025-10-20"}},
        {"id": "hotel", "tool_needed": "search_hotels", "dependencies": ["flight"],
         "parameters": {"destination": "Wuhan", "check_in_date": "TBD"}}
    ]}"#;
    let mut plan = PlanParser::parse(plan_json).unwrap();
    let (mut tools, _, _) = stubs(Ok(hotel_list(300.0)));
    tools.push(Box::new(ThinkTool::new()));

    let report = executor(tools, SchedulingMode::Worklist)
        .execute(&mut plan, ExecutionState::new())
        .await;

    assert!(report.is_complete());
    assert_eq!(report.state.executed_tasks(), ["think", "flight", "hotel"]);
    let confirmation = BookingSynthesizer::new(2, "Wang Wei")
        .synthesize(&report.state)
        .unwrap();
    assert_eq!(confirmation.flight.departure.date, "2025-10-20");
    assert!((confirmation.total_price - 1800.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn unknown_tool_halts_the_run() {
    let mut plan = Plan::new(vec![
        Task::new("weather", "get_weather").with_parameter("city", "Wuhan"),
        flight_task("flight").with_dependency("weather"),
    ])
    .unwrap();
    let (tools, flight_calls, _) = stubs(Ok(hotel_list(300.0)));

    let report = executor(tools, SchedulingMode::Worklist)
        .execute(&mut plan, ExecutionState::new())
        .await;

    let halt = report.halt.as_ref().unwrap();
    assert_eq!(halt.task_id(), "weather");
    assert!(halt.message().contains("get_weather"));
    assert_eq!(report.skipped_tasks, ["flight"]);
    assert!(flight_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn reloaded_plan_and_state_keep_the_flight_date() {
    let plan = Plan::new(vec![flight_task("flight"), hotel_task("hotel", "flight")]).unwrap();
    let plan_file = serde_json::to_string(&plan).unwrap();

    let mut first_plan: Plan = serde_json::from_str(&plan_file).unwrap();
    let (tools, _, _) = stubs(Err("upstream timeout".into()));
    let first = executor(tools, SchedulingMode::Worklist)
        .execute(&mut first_plan, ExecutionState::new())
        .await;
    assert!(first.halt.is_some());
    let state_file = first.state.to_json().unwrap();

    // Resume from the files alone, as `execute --plan --state` does.
    let mut reloaded_plan: Plan = serde_json::from_str(&plan_file).unwrap();
    assert_eq!(
        reloaded_plan.task("hotel").unwrap().param_str("check_in_date"),
        Some("Oct 20")
    );
    let restored = ExecutionState::from_json(&state_file).unwrap();
    let (tools, flight_calls, hotel_calls) = stubs(Ok(hotel_list(450.0)));
    let resumed = executor(tools, SchedulingMode::Worklist)
        .execute(&mut reloaded_plan, restored)
        .await;

    assert!(resumed.is_complete());
    assert!(flight_calls.lock().unwrap().is_empty());
    assert_eq!(hotel_calls.lock().unwrap()[0]["check_in_date"], "2025-10-20");
}
