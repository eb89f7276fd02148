use serde::{Deserialize, Serialize};

/// Description of a tool for the planner prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// The capability a registered tool provides.
///
/// Classification and propagation key off this, never off the tool name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ToolKind {
    FlightSearch,
    HotelSearch,
    Reflection,
    Clock,
}

/// First itinerary returned by the flight API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub flight_no: String,
    pub airline_name: String,
    pub departure_name: String,
    pub departure_date: String,
    pub departure_time: String,
    pub arrival_name: String,
    pub arrival_date: String,
    pub duration: String,
    pub price: f64,
}

impl FlightRecord {
    /// Date a stay at the destination starts: departure date, else arrival date.
    pub fn travel_date(&self) -> Option<&str> {
        [self.departure_date.as_str(), self.arrival_date.as_str()]
            .into_iter()
            .map(str::trim)
            .find(|date| !date.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelRecord {
    pub name: String,
    pub price_per_night: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FlightLookup {
    Found(FlightRecord),
    NotFound { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "hotels", rename_all = "snake_case")]
pub enum HotelLookup {
    Listed(Vec<HotelRecord>),
    Empty,
}

impl HotelLookup {
    /// `Listed` is only produced for a non-empty list.
    pub fn from_records(hotels: Vec<HotelRecord>) -> Self {
        if hotels.is_empty() {
            Self::Empty
        } else {
            Self::Listed(hotels)
        }
    }
}

/// Typed result of a successful tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ToolOutput {
    Flight(FlightLookup),
    Hotels(HotelLookup),
    Text(String),
}

impl ToolOutput {
    pub fn as_found_flight(&self) -> Option<&FlightRecord> {
        match self {
            Self::Flight(FlightLookup::Found(record)) => Some(record),
            _ => None,
        }
    }

    pub fn as_hotels(&self) -> Option<&[HotelRecord]> {
        match self {
            Self::Hotels(HotelLookup::Listed(hotels)) => Some(hotels),
            _ => None,
        }
    }
}
