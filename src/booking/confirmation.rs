use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub booking_reference: String,
    /// RFC 3339 timestamp
    pub booked_at: String,
    pub passenger_name: String,
    pub flight: FlightBooking,
    pub hotel: HotelBooking,
    pub total_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightBooking {
    pub flight_number: String,
    pub airline: String,
    pub departure: DepartureLeg,
    pub arrival: ArrivalLeg,
    pub duration: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartureLeg {
    pub airport: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalLeg {
    pub airport: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelBooking {
    pub name: String,
    pub price_per_night: f64,
    pub total_nights: u32,
}
