use itinera::error::PlanError;
use itinera::planner::{Plan, PlanParser, Task};

#[test]
fn planner_reply_with_prose_and_fence_parses() {
    let reply = "Sure! Here's your itinerary plan.\n\n```json\n{\"tasks\": [\
        {\"id\": \"task1\", \"tool_needed\": \"search_flights\", \
         \"parameters\": {\"home\": \"Beijing\", \"destination\": \"Wuhan\", \"date\": \"2025-10-20\"}},\
        {\"id\": \"task2\", \"tool_needed\": \"search_hotels\", \"dependencies\": [\"task1\"], \
         \"parameters\": {\"destination\": \"Wuhan\", \"check_in_date\": \"2025-10-20\"}}\
    ]}\n```\nLet me know if you need anything else.";

    let plan = PlanParser::parse_response(reply).unwrap();
    assert_eq!(plan.task_ids().collect::<Vec<_>>(), ["task1", "task2"]);
    assert_eq!(plan.task("task2").unwrap().dependencies, ["task1"]);
    assert_eq!(plan.task("task1").unwrap().description, "");
}

#[test]
fn saved_plan_reloads_identically() {
    let plan = Plan::new(vec![
        Task::new("flight", "search_flights").with_parameter("destination", "Wuhan"),
        Task::new("hotel", "search_hotels").with_dependency("flight"),
    ])
    .unwrap();

    let saved = serde_json::to_string(&plan).unwrap();
    let reloaded: Plan = serde_json::from_str(&saved).unwrap();
    assert_eq!(reloaded, plan);
}

#[test]
fn invalid_graphs_never_become_plans() {
    let cases = [
        (r#"{"tasks": []}"#, "at least one task"),
        (
            r#"{"tasks": [{"id": "a", "tool_needed": "think"}, {"id": "a", "tool_needed": "think"}]}"#,
            "duplicate task id: a",
        ),
        (
            r#"{"tasks": [{"id": "a", "tool_needed": "think", "dependencies": ["ghost"]}]}"#,
            "unknown task ghost",
        ),
        (
            r#"{"tasks": [{"id": "a", "tool_needed": "think", "dependencies": ["a"]}]}"#,
            "cycle detected",
        ),
    ];

    for (json, expected) in cases {
        let err = PlanParser::parse(json).unwrap_err().to_string();
        assert!(err.contains(expected), "{json}: {err}");
    }
}

#[test]
fn prose_without_json_is_a_parse_error() {
    let err = PlanParser::parse_response("I'd suggest flying on Monday.").unwrap_err();
    assert!(matches!(err, PlanError::Parse(_)));
}

#[test]
fn task_without_tool_is_rejected() {
    let err = PlanParser::parse(r#"{"tasks": [{"id": "a"}]}"#).unwrap_err();
    assert!(matches!(err, PlanError::Parse(_)));
}
