mod confirmation;
mod synthesizer;

pub use confirmation::{ArrivalLeg, BookingConfirmation, DepartureLeg, FlightBooking, HotelBooking};
pub use synthesizer::BookingSynthesizer;
