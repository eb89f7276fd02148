use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("ITINERA_API_KEY")
            .or_else(|_| std::env::var("SILICON_API_KEY"))
            && !key.is_empty()
        {
            self.api_key = Some(key);
        }

        if let Ok(base_url) = std::env::var("ITINERA_BASE_URL")
            .or_else(|_| std::env::var("SILICON_BASE_URL"))
            && !base_url.is_empty()
        {
            self.llm.base_url = base_url;
        }

        if let Ok(model) = std::env::var("ITINERA_MODEL")
            && !model.is_empty()
        {
            self.llm.model = model;
        }

        if let Ok(temp_str) = std::env::var("ITINERA_TEMPERATURE")
            && let Ok(temp) = temp_str.parse::<f64>()
            && (0.0..=2.0).contains(&temp)
        {
            self.llm.temperature = temp;
        }

        if let Ok(key) = std::env::var("ITINERA_FLIGHT_API_KEY")
            .or_else(|_| std::env::var("FLIGHT_API_KEY"))
            && !key.is_empty()
        {
            self.flight_api.api_key = Some(key);
        }

        if let Ok(url) = std::env::var("ITINERA_FLIGHT_API_URL")
            .or_else(|_| std::env::var("FLIGHT_API_URL"))
            && !url.is_empty()
        {
            self.flight_api.url = Some(url);
        }

        if let Ok(name) = std::env::var("ITINERA_PASSENGER_NAME")
            && !name.trim().is_empty()
        {
            self.booking.passenger_name = name;
        }

        if let Ok(nights_str) = std::env::var("ITINERA_NIGHTS")
            && let Ok(nights) = nights_str.parse::<u32>()
            && nights > 0
        {
            self.booking.nights = nights;
        }

        if let Ok(level) = std::env::var("ITINERA_LOG_LEVEL")
            && !level.is_empty()
        {
            self.observability.log_level = level;
        }
    }
}
