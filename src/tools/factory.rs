use super::{
    CityCodeResolver, DateResolver, FlightSearchTool, HotelSearchTool, ThinkTool, TodayTool, Tool,
    ToolRegistry,
};
use crate::config::Config;
use crate::llm::ModelClient;

/// Create the default tool set: flight search, hotel search, reflection, clock.
pub fn default_tools(client: &ModelClient, config: &Config) -> Vec<Box<dyn Tool>> {
    let dates = DateResolver::new(client.clone());
    let cities = CityCodeResolver::new(client.clone());

    vec![
        Box::new(FlightSearchTool::new(
            &config.flight_api,
            dates.clone(),
            cities,
        )),
        Box::new(HotelSearchTool::new(client.clone(), dates)),
        Box::new(ThinkTool::new()),
        Box::new(TodayTool::new()),
    ]
}

pub fn default_registry(client: &ModelClient, config: &Config) -> ToolRegistry {
    ToolRegistry::from_tools(default_tools(client, config))
}
