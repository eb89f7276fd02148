use super::resolve::DateResolver;
use super::traits::{Tool, required_str};
use super::types::{HotelLookup, HotelRecord, ToolKind, ToolOutput};
use crate::llm::ModelClient;
use crate::planner::parser::extract_fenced;
use anyhow::Context;
use serde_json::{Map, Value, json};
use std::future::Future;
use std::pin::Pin;
use tracing::{info, warn};

/// Hotel availability synthesised by the model as a JSON array.
pub struct HotelSearchTool {
    client: ModelClient,
    dates: DateResolver,
}

impl HotelSearchTool {
    pub fn new(client: ModelClient, dates: DateResolver) -> Self {
        Self { client, dates }
    }
}

fn listing_prompt(destination: &str, check_in: &str, check_out: &str) -> String {
    format!(
        "List hotels in {destination} available from {check_in} to {check_out}, \
         favouring mid-range options.\n\
         Each entry must contain:\n\
         - hotel name (name)\n\
         - price per night (price_per_night), a number\n\n\
         Rules:\n\
         1. Reply with a valid JSON array only, no explanation.\n\
         2. Do not wrap the array in Markdown code fences.\n\
         3. If no hotel information is available, reply with \
         [{{\"name\": \"Ji Hotel\", \"price_per_night\": 300}}].\n\n\
         Format:\n\
         [{{\"name\": \"Hotel A\", \"price_per_night\": 300}}, \
         {{\"name\": \"Hotel B\", \"price_per_night\": 420}}]"
    )
}

/// First JSON array in the reply: a fenced block, else the first `[` from
/// which a complete array parses. Trailing text after the array is ignored.
fn first_json_array(reply: &str) -> Option<Vec<Value>> {
    let fenced = extract_fenced(reply, '[').and_then(|body| serde_json::from_str(body).ok());
    if let Some(Value::Array(entries)) = fenced {
        return Some(entries);
    }

    reply.match_indices('[').find_map(|(start, _)| {
        let mut values = serde_json::Deserializer::from_str(&reply[start..]).into_iter::<Value>();
        match values.next() {
            Some(Ok(Value::Array(entries))) => Some(entries),
            _ => None,
        }
    })
}

/// Hotels from a model reply. Anything unparseable yields an empty list.
fn parse_hotels(reply: &str) -> Vec<HotelRecord> {
    let Some(entries) = first_json_array(reply) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let name = entry.get("name")?.as_str()?.trim();
            if name.is_empty() {
                return None;
            }
            let price_per_night = match entry.get("price_per_night")? {
                Value::Number(n) => n.as_f64()?,
                Value::String(s) => s.trim().parse::<f64>().ok()?,
                _ => return None,
            };
            if !price_per_night.is_finite() || price_per_night <= 0.0 {
                return None;
            }
            Some(HotelRecord {
                name: name.to_string(),
                price_per_night,
            })
        })
        .collect()
}

impl Tool for HotelSearchTool {
    fn name(&self) -> &str {
        "search_hotels"
    }

    fn description(&self) -> &str {
        "Search hotels in a destination for a stay. Use when: flight dates are known. Depend on the flight search task."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "destination": {
                    "type": "string",
                    "description": "Destination city"
                },
                "check_in_date": {
                    "type": "string",
                    "description": "Check-in date, YYYY-MM-DD preferred"
                },
                "check_out_date": {
                    "type": "string",
                    "description": "Check-out date, YYYY-MM-DD preferred"
                }
            },
            "required": ["destination", "check_in_date", "check_out_date"]
        })
    }

    fn kind(&self) -> ToolKind {
        ToolKind::HotelSearch
    }

    fn execute<'a>(
        &'a self,
        args: &'a Map<String, Value>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolOutput>> + Send + 'a>> {
        Box::pin(async move {
            let destination = required_str(self.name(), args, "destination")?;
            let check_in = self
                .dates
                .resolve(required_str(self.name(), args, "check_in_date")?)
                .await;
            let check_out = match args.get("check_out_date").and_then(Value::as_str) {
                Some(date) if !date.trim().is_empty() => self.dates.resolve(date).await,
                _ => "an open-ended check-out date".to_string(),
            };
            info!(destination = %destination, check_in = %check_in, "searching hotels");

            let reply = self
                .client
                .ask(None, &listing_prompt(destination, &check_in, &check_out))
                .await
                .context("hotel listing request failed")?;

            let hotels = parse_hotels(&reply);
            if hotels.is_empty() {
                warn!(destination = %destination, "hotel listing reply had no usable entries");
            }
            Ok(ToolOutput::Hotels(HotelLookup::from_records(hotels)))
        })
    }
}
