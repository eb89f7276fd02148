use super::confirmation::{
    ArrivalLeg, BookingConfirmation, DepartureLeg, FlightBooking, HotelBooking,
};
use crate::config::BookingConfig;
use crate::engine::ExecutionState;
use crate::error::BookingError;
use crate::tools::{FlightRecord, HotelRecord};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

/// Builds the final confirmation from accumulated task results.
#[derive(Debug, Clone)]
pub struct BookingSynthesizer {
    nights: u32,
    passenger_name: String,
}

impl BookingSynthesizer {
    pub fn new(nights: u32, passenger_name: impl Into<String>) -> Self {
        Self {
            nights,
            passenger_name: passenger_name.into(),
        }
    }

    pub fn from_config(config: &BookingConfig) -> Self {
        Self::new(config.nights, config.passenger_name.clone())
    }

    pub fn nights(&self) -> u32 {
        self.nights
    }

    /// Needs one found flight and one non-empty hotel list; the first of each,
    /// in completion order, is booked. The first hotel candidate is taken.
    pub fn synthesize(&self, state: &ExecutionState) -> Result<BookingConfirmation, BookingError> {
        let outputs = || {
            state
                .executed_tasks()
                .iter()
                .filter_map(move |id| state.result(id))
        };
        let flight = outputs().find_map(|output| output.as_found_flight());
        let hotel = outputs()
            .find_map(|output| output.as_hotels().and_then(<[HotelRecord]>::first));

        let (flight, hotel) = match (flight, hotel) {
            (Some(flight), Some(hotel)) => (flight, hotel),
            (None, Some(_)) => return Err(incomplete("flight")),
            (Some(_), None) => return Err(incomplete("hotel")),
            (None, None) => return Err(incomplete("flight and hotel")),
        };

        let confirmation = self.confirm(flight, hotel);
        info!(
            booking_reference = %confirmation.booking_reference,
            flight_no = %confirmation.flight.flight_number,
            hotel = %confirmation.hotel.name,
            total_price = confirmation.total_price,
            "booking confirmed"
        );
        Ok(confirmation)
    }

    fn confirm(&self, flight: &FlightRecord, hotel: &HotelRecord) -> BookingConfirmation {
        let total_price = flight.price + hotel.price_per_night * f64::from(self.nights);

        BookingConfirmation {
            booking_reference: Uuid::new_v4().to_string(),
            booked_at: Utc::now().to_rfc3339(),
            passenger_name: self.passenger_name.clone(),
            flight: FlightBooking {
                flight_number: flight.flight_no.clone(),
                airline: flight.airline_name.clone(),
                departure: DepartureLeg {
                    airport: flight.departure_name.clone(),
                    date: flight.departure_date.clone(),
                    time: flight.departure_time.clone(),
                },
                arrival: ArrivalLeg {
                    airport: flight.arrival_name.clone(),
                    date: flight.arrival_date.clone(),
                },
                duration: flight.duration.clone(),
                price: flight.price,
            },
            hotel: HotelBooking {
                name: hotel.name.clone(),
                price_per_night: hotel.price_per_night,
                total_nights: self.nights,
            },
            total_price,
        }
    }
}

fn incomplete(missing: &str) -> BookingError {
    BookingError::Incomplete {
        missing: format!("no {missing} result to book"),
    }
}
