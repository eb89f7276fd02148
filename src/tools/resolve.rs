use crate::llm::ModelClient;
use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Turns relative date phrases ("next Monday", "Oct 20") into `YYYY-MM-DD`.
///
/// Anything the model returns that does not parse as a calendar date is
/// discarded and the original phrase is passed through unchanged.
#[derive(Debug, Clone)]
pub struct DateResolver {
    client: ModelClient,
    today: Option<NaiveDate>,
}

impl DateResolver {
    pub fn new(client: ModelClient) -> Self {
        Self {
            client,
            today: None,
        }
    }

    /// Pin the reference date used in the prompt.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub async fn resolve(&self, description: &str) -> String {
        let description = description.trim();
        if is_iso_date(description) {
            return description.to_string();
        }

        let prompt = format!(
            "Convert the following date description to a YYYY-MM-DD date.\n\n\
             Today's date: {today}\n\
             Date description: {description}\n\n\
             Rules:\n\
             1. Reply with the date only, formatted as YYYY-MM-DD.\n\
             2. No explanation.\n\
             3. Resolve the year relative to today's date.\n\n\
             Examples:\n\
             next Monday -> 2025-10-20\n\
             October 20th -> 2025-10-20\n\
             tomorrow -> 2025-10-15",
            today = self.today().format(DATE_FORMAT),
        );

        match self.client.ask(None, &prompt).await {
            Ok(reply) if is_iso_date(reply.trim()) => {
                debug!(input = %description, resolved = %reply.trim(), "date resolved");
                reply.trim().to_string()
            }
            Ok(reply) => {
                warn!(input = %description, reply = %reply.trim(), "date resolution returned no date");
                description.to_string()
            }
            Err(err) => {
                warn!(input = %description, error = %err, "date resolution failed");
                description.to_string()
            }
        }
    }
}

fn is_iso_date(text: &str) -> bool {
    text.len() == 10 && NaiveDate::parse_from_str(text, DATE_FORMAT).is_ok()
}

/// Maps city names to 3-letter IATA airport codes through the model.
#[derive(Debug, Clone)]
pub struct CityCodeResolver {
    client: ModelClient,
}

impl CityCodeResolver {
    pub fn new(client: ModelClient) -> Self {
        Self { client }
    }

    pub async fn resolve(&self, city: &str) -> String {
        let city = city.trim();
        if is_iata_code(city) {
            return city.to_string();
        }

        let prompt = format!(
            "Convert the following city name to the IATA code of its main airport.\n\n\
             City: {city}\n\n\
             Rules:\n\
             1. Reply with the 3-letter IATA code only.\n\
             2. No explanation.\n\
             3. If unsure, use the main international airport of the country or region.\n\n\
             Examples:\n\
             Beijing -> PEK\n\
             Shanghai -> PVG\n\
             Changsha -> CSX"
        );

        match self.client.ask(None, &prompt).await {
            Ok(reply) => {
                let code = reply.trim().to_ascii_uppercase();
                if is_iata_code(&code) {
                    debug!(city = %city, code = %code, "city code resolved");
                    code
                } else {
                    warn!(city = %city, reply = %reply.trim(), "city code resolution returned no code");
                    city.to_string()
                }
            }
            Err(err) => {
                warn!(city = %city, error = %err, "city code resolution failed");
                city.to_string()
            }
        }
    }
}

fn is_iata_code(text: &str) -> bool {
    text.len() == 3 && text.chars().all(|c| c.is_ascii_uppercase())
}
