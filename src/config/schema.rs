use crate::engine::SchedulingMode;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    /// API key for the generative model endpoint.
    pub api_key: Option<String>,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub flight_api: FlightApiConfig,

    #[serde(default)]
    pub booking: BookingConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            api_key: None,
            llm: LlmConfig::default(),
            flight_api: FlightApiConfig::default(),
            booking: BookingConfig::default(),
            engine: EngineConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::Validation(format!(
                "llm.temperature must be within 0.0..=2.0 (got {})",
                self.llm.temperature
            )));
        }

        if self.booking.nights == 0 {
            return Err(ConfigError::Validation(
                "booking.nights must be at least 1".into(),
            ));
        }

        if self.booking.passenger_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "booking.passenger_name cannot be empty".into(),
            ));
        }

        validate_url("llm.base_url", &self.llm.base_url)?;
        if let Some(flight_url) = self.flight_api.url.as_deref() {
            validate_url("flight_api.url", flight_url)?;
        }

        Ok(())
    }
}

fn validate_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value)
        .map_err(|e| ConfigError::Validation(format!("{field} is not a valid URL: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "{field} must use http or https (got {})",
            parsed.scheme()
        )));
    }
    Ok(())
}

// ── Generative model ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// OpenAI-compatible endpoint; `/chat/completions` is appended when absent.
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_llm_temperature")]
    pub temperature: f64,
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_llm_base_url() -> String {
    "https://api.siliconflow.cn/v1".into()
}

fn default_llm_model() -> String {
    "deepseek-ai/DeepSeek-V3".into()
}

fn default_llm_temperature() -> f64 {
    0.7
}

fn default_llm_timeout_secs() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            temperature: default_llm_temperature(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

// ── Flight lookup API ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightApiConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_flight_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_flight_timeout_secs() -> u64 {
    30
}

impl Default for FlightApiConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout_secs: default_flight_timeout_secs(),
        }
    }
}

// ── Booking ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Lodging duration applied to every confirmation.
    #[serde(default = "default_nights")]
    pub nights: u32,
    /// Passenger name printed on confirmations.
    #[serde(default = "default_passenger_name")]
    pub passenger_name: String,
}

fn default_nights() -> u32 {
    2
}

fn default_passenger_name() -> String {
    "Wang Wei".into()
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            nights: default_nights(),
            passenger_name: default_passenger_name(),
        }
    }
}

// ── Engine ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub scheduling: SchedulingMode,
}

// ── Observability ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// "error" | "warn" | "info" | "debug" | "trace"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}
