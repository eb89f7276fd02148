use std::sync::Arc;

use chrono::NaiveDate;
use itinera::booking::BookingSynthesizer;
use itinera::config::FlightApiConfig;
use itinera::engine::{PlanExecutor, SchedulingMode};
use itinera::planner::LlmPlanner;
use itinera::tools::{
    CityCodeResolver, DateResolver, FlightSearchTool, HotelSearchTool, ThinkTool, TodayTool, Tool,
    ToolRegistry,
};
use itinera::{TravelWorkflow, WorkflowOutcome};
use serde_json::json;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::travel_harness::{ScriptedProvider, client_for};

const REQUEST: &str =
    "Book a flight from Beijing to Wuhan on Oct 20 and a hotel for 2 nights, passenger Wang Wei";

const PLAN_REPLY: &str = r#"Here is the plan:
```json
{
  "tasks": [
    {
      "id": "flight",
      "description": "Find a Beijing to Wuhan flight",
      "tool_needed": "search_flights",
      "dependencies": [],
      "parameters": {"home": "Beijing", "destination": "Wuhan", "date": "Oct 20"}
    },
    {
      "id": "hotel",
      "description": "Find a Wuhan hotel",
      "tool_needed": "search_hotels",
      "dependencies": ["flight"],
      "parameters": {"destination": "Wuhan", "check_in_date": "arrival day", "check_out_date": "Oct 22"}
    }
  ]
}
```"#;

fn oct_14() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 14).unwrap()
}

fn scripted(plan_reply: &str) -> Arc<ScriptedProvider> {
    ScriptedProvider::new(&[
        ("User request:", plan_reply),
        ("City: Beijing", "PEK"),
        ("City: Wuhan", "wuh"),
        ("Date description: Oct 20", "2025-10-20"),
        ("Date description: Oct 22", "2025-10-22"),
        (
            "List hotels in Wuhan",
            r#"[{"name": "Atour Wuhan Jianghan", "price_per_night": 450}, {"name": "Ji Hotel", "price_per_night": 300}]"#,
        ),
    ])
}

fn workflow(provider: &Arc<ScriptedProvider>, flight_url: String) -> TravelWorkflow {
    let client = client_for(provider);
    let dates = DateResolver::new(client.clone()).with_today(oct_14());
    let flight_api = FlightApiConfig {
        url: Some(flight_url),
        api_key: Some("flight-key".into()),
        ..FlightApiConfig::default()
    };
    let tools: Vec<Box<dyn Tool>> = vec![
        Box::new(FlightSearchTool::new(
            &flight_api,
            dates.clone(),
            CityCodeResolver::new(client.clone()),
        )),
        Box::new(HotelSearchTool::new(client.clone(), dates)),
        Box::new(ThinkTool::new()),
        Box::new(TodayTool::fixed(oct_14())),
    ];

    TravelWorkflow::new(
        Arc::new(LlmPlanner::new(client).with_today(oct_14())),
        PlanExecutor::new(
            Arc::new(ToolRegistry::from_tools(tools)),
            SchedulingMode::Worklist,
        ),
        BookingSynthesizer::new(2, "Wang Wei"),
    )
}

async fn flight_api_with(body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("departure", "PEK"))
        .and(query_param("arrival", "WUH"))
        .and(query_param("departureDate", "2025-10-20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn request_to_confirmation() {
    let server = flight_api_with(json!({
        "result": {"flightInfo": [{
            "flightNo": "CA8213",
            "airlineName": "Air China",
            "departureName": "Beijing Capital",
            "departureDate": "2025-10-20",
            "departureTime": "08:30",
            "arrivalName": "Wuhan Tianhe",
            "arrivalDate": "2025-10-20",
            "duration": "2h10m",
            "price": "1200"
        }]}
    }))
    .await;
    let provider = scripted(PLAN_REPLY);

    let outcome = workflow(&provider, server.uri()).run(REQUEST).await;

    let confirmation = outcome.confirmation().expect("booking confirmed");
    assert_eq!(confirmation.passenger_name, "Wang Wei");
    assert_eq!(confirmation.flight.flight_number, "CA8213");
    assert_eq!(confirmation.flight.departure.date, "2025-10-20");
    assert_eq!(confirmation.flight.arrival.airport, "Wuhan Tianhe");
    assert_eq!(confirmation.hotel.name, "Atour Wuhan Jianghan");
    assert_eq!(confirmation.hotel.total_nights, 2);
    assert!((confirmation.total_price - 2100.0).abs() < f64::EPSILON);
    assert!(!confirmation.booking_reference.is_empty());

    // The hotel prompt must carry the flight's date, not the planner's phrase.
    let prompts = provider.prompts();
    let hotel_prompt = prompts
        .iter()
        .find(|p| p.contains("List hotels in Wuhan"))
        .expect("hotel listing requested");
    assert!(hotel_prompt.contains("from 2025-10-20 to 2025-10-22"));
    assert!(!prompts.iter().any(|p| p.contains("arrival day")));
}

#[tokio::test]
async fn no_flight_halts_before_hotel_search() {
    let server = flight_api_with(json!({"result": {"flightInfo": []}})).await;
    let provider = scripted(PLAN_REPLY);

    let outcome = workflow(&provider, server.uri()).run(REQUEST).await;

    match &outcome {
        WorkflowOutcome::Halted { task_id, message } => {
            assert_eq!(task_id, "flight");
            assert!(message.starts_with("Sorry, no flights to Wuhan on Oct 20"));
        }
        other => panic!("expected halt, got {other:?}"),
    }
    assert!(
        !provider
            .prompts()
            .iter()
            .any(|p| p.contains("List hotels in"))
    );
    let rendered: serde_json::Value = serde_json::from_str(&outcome.render()).unwrap();
    assert!(rendered["message"].as_str().unwrap().contains("Sorry"));
}

#[tokio::test]
async fn unparseable_plan_fails_without_tool_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    let provider = scripted("I cannot help with that.");

    let outcome = workflow(&provider, server.uri()).run(REQUEST).await;

    assert!(matches!(outcome, WorkflowOutcome::PlanningFailed { .. }));
    assert!(
        outcome
            .failure_message()
            .unwrap()
            .starts_with("Planning failed:")
    );
    assert_eq!(provider.prompts().len(), 1);
}

#[tokio::test]
async fn cyclic_plan_is_rejected() {
    let cyclic = r#"{"tasks": [
        {"id": "a", "tool_needed": "search_flights", "dependencies": ["b"]},
        {"id": "b", "tool_needed": "search_hotels", "dependencies": ["a"]}
    ]}"#;
    let provider = scripted(cyclic);

    let outcome = workflow(&provider, "http://127.0.0.1:9".into())
        .run(REQUEST)
        .await;

    let message = outcome.failure_message().unwrap();
    assert!(message.contains("cycle"), "{message}");
}
