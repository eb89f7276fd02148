use super::resolve::{CityCodeResolver, DateResolver};
use super::traits::{Tool, required_str};
use super::types::{FlightLookup, FlightRecord, ToolKind, ToolOutput};
use crate::config::FlightApiConfig;
use crate::llm::{build_provider_client_with_timeout, sanitize_api_error};
use anyhow::Context;
use reqwest::Client;
use serde_json::{Map, Value, json};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, info};

/// Looks up the first flight itinerary for a route and date via the flight API.
///
/// City names and relative dates are normalised through the model first; the
/// API itself only accepts IATA codes and `YYYY-MM-DD`.
pub struct FlightSearchTool {
    url: Option<String>,
    api_key: Option<String>,
    client: Client,
    dates: DateResolver,
    cities: CityCodeResolver,
}

impl FlightSearchTool {
    pub fn new(config: &FlightApiConfig, dates: DateResolver, cities: CityCodeResolver) -> Self {
        Self {
            url: config.url.clone(),
            api_key: config.api_key.clone(),
            client: build_provider_client_with_timeout(config.timeout_secs),
            dates,
            cities,
        }
    }

    async fn query(&self, departure: &str, arrival: &str, date: &str) -> anyhow::Result<Value> {
        let url = self
            .url
            .as_deref()
            .context("flight API URL not set. Set [flight_api].url or ITINERA_FLIGHT_API_URL")?;

        let response = self
            .client
            .get(url)
            .query(&[
                ("key", self.api_key.as_deref().unwrap_or_default()),
                ("departure", departure),
                ("arrival", arrival),
                ("departureDate", date),
            ])
            .send()
            .await
            .context("flight API request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "flight API error ({status}): {}",
                sanitize_api_error(&body)
            );
        }

        response
            .json::<Value>()
            .await
            .context("flight API returned invalid JSON")
    }
}

/// Map the first entry of `result.flightInfo`, if any.
fn first_itinerary(body: &Value) -> Option<FlightRecord> {
    let info = body.get("result")?.get("flightInfo")?.as_array()?.first()?;

    let text = |key: &str| match info.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    let flight_no = match text("flightNo") {
        no if !no.is_empty() => no,
        _ => format!("{}{}", text("airline"), text("flightNumber")),
    };

    let price = [info.get("price"), info.get("ticketPrice")]
        .into_iter()
        .flatten()
        .filter_map(price_value)
        .find(|price| *price > 0.0)
        .unwrap_or(0.0);

    Some(FlightRecord {
        flight_no,
        airline_name: text("airlineName"),
        departure_name: text("departureName"),
        departure_date: text("departureDate"),
        departure_time: text("departureTime"),
        arrival_name: text("arrivalName"),
        arrival_date: text("arrivalDate"),
        duration: text("duration"),
        price,
    })
}

fn price_value(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    price.is_finite().then_some(price)
}

impl Tool for FlightSearchTool {
    fn name(&self) -> &str {
        "search_flights"
    }

    fn description(&self) -> &str {
        "Search flights from home to a destination on a date. Use when: travel dates must be established. Always run before hotel searches."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "home": {
                    "type": "string",
                    "description": "Departure city"
                },
                "destination": {
                    "type": "string",
                    "description": "Arrival city"
                },
                "date": {
                    "type": "string",
                    "description": "Departure date, YYYY-MM-DD preferred"
                }
            },
            "required": ["home", "destination", "date"]
        })
    }

    fn kind(&self) -> ToolKind {
        ToolKind::FlightSearch
    }

    fn execute<'a>(
        &'a self,
        args: &'a Map<String, Value>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolOutput>> + Send + 'a>> {
        Box::pin(async move {
            let home = required_str(self.name(), args, "home")?;
            let destination = required_str(self.name(), args, "destination")?;
            let date = self.dates.resolve(required_str(self.name(), args, "date")?).await;

            let departure = self.cities.resolve(home).await;
            let arrival = self.cities.resolve(destination).await;
            info!(departure = %departure, arrival = %arrival, date = %date, "searching flights");

            let body = self.query(&departure, &arrival, &date).await?;
            let lookup = match first_itinerary(&body) {
                Some(record) => {
                    debug!(flight_no = %record.flight_no, price = record.price, "flight found");
                    FlightLookup::Found(record)
                }
                None => FlightLookup::NotFound {
                    message: format!("no flights to {destination} on {date}"),
                },
            };
            Ok(ToolOutput::Flight(lookup))
        })
    }
}
