pub mod factory;
pub mod flight_search;
pub mod hotel_search;
pub mod registry;
pub mod resolve;
pub mod think;
pub mod today;
pub mod traits;
pub mod types;

pub use factory::{default_registry, default_tools};
pub use flight_search::FlightSearchTool;
pub use hotel_search::HotelSearchTool;
pub use registry::ToolRegistry;
pub use resolve::{CityCodeResolver, DateResolver};
pub use think::ThinkTool;
pub use today::TodayTool;
pub use traits::Tool;
pub use types::{
    FlightLookup, FlightRecord, HotelLookup, HotelRecord, ToolKind, ToolOutput, ToolSpec,
};
