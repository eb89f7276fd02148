#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use itinera::llm::{ModelClient, Provider};
use itinera::planner::Task;
use itinera::tools::{
    FlightLookup, FlightRecord, HotelLookup, HotelRecord, Tool, ToolKind, ToolOutput,
};
use serde_json::{Map, Value, json};

/// Chat provider answering by substring match on the prompt.
pub struct ScriptedProvider {
    rules: Vec<(String, String)>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(rules: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            rules: rules
                .iter()
                .map(|(needle, reply)| ((*needle).to_string(), (*reply).to_string()))
                .collect(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn chat_with_system<'a>(
        &'a self,
        system_prompt: Option<&'a str>,
        message: &'a str,
        _model: &'a str,
        _temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let prompt = format!("{}\n{message}", system_prompt.unwrap_or_default());
            self.prompts.lock().unwrap().push(prompt.clone());
            self.rules
                .iter()
                .find(|(needle, _)| prompt.contains(needle.as_str()))
                .map(|(_, reply)| reply.clone())
                .ok_or_else(|| anyhow::anyhow!("no scripted reply"))
        })
    }
}

pub fn client_for(provider: &Arc<ScriptedProvider>) -> ModelClient {
    ModelClient::new(provider.clone(), "scripted-model", 0.0)
}

pub type CallLog = Arc<Mutex<Vec<Map<String, Value>>>>;

/// Tool returning a fixed outcome and logging the arguments of each call.
pub struct RecordingTool {
    name: &'static str,
    kind: ToolKind,
    outcome: Result<ToolOutput, String>,
    calls: CallLog,
}

impl RecordingTool {
    pub fn new(
        name: &'static str,
        kind: ToolKind,
        outcome: Result<ToolOutput, String>,
    ) -> (Box<dyn Tool>, CallLog) {
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
        let tool = Self {
            name,
            kind,
            outcome,
            calls: calls.clone(),
        };
        (Box::new(tool), calls)
    }
}

impl Tool for RecordingTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "recording stub"
    }

    fn parameters_schema(&self) -> Value {
        json!({"type": "object"})
    }

    fn kind(&self) -> ToolKind {
        self.kind
    }

    fn execute<'a>(
        &'a self,
        args: &'a Map<String, Value>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolOutput>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(args.clone());
            self.outcome.clone().map_err(|message| anyhow::anyhow!(message))
        })
    }
}

pub fn found_flight(departure_date: &str, price: f64) -> ToolOutput {
    ToolOutput::Flight(FlightLookup::Found(FlightRecord {
        flight_no: "CA8213".into(),
        airline_name: "Air China".into(),
        departure_name: "Beijing Capital".into(),
        departure_date: departure_date.into(),
        departure_time: "08:30".into(),
        arrival_name: "Wuhan Tianhe".into(),
        arrival_date: departure_date.into(),
        duration: "2h10m".into(),
        price,
    }))
}

pub fn hotel_list(price_per_night: f64) -> ToolOutput {
    ToolOutput::Hotels(HotelLookup::Listed(vec![HotelRecord {
        name: "Atour Wuhan Jianghan".into(),
        price_per_night,
    }]))
}

pub fn flight_task(id: &str) -> Task {
    Task::new(id, "search_flights")
        .with_description("Search Beijing to Wuhan flights")
        .with_parameter("home", "Beijing")
        .with_parameter("destination", "Wuhan")
        .with_parameter("date", "2025-10-20")
}

pub fn hotel_task(id: &str, depends_on: &str) -> Task {
    Task::new(id, "search_hotels")
        .with_description("Search Wuhan hotels")
        .with_dependency(depends_on)
        .with_parameter("destination", "Wuhan")
        .with_parameter("check_in_date", "Oct 20")
        .with_parameter("check_out_date", "2025-10-22")
}
