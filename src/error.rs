use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `itinera`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal plumbing continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum ItineraError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── LLM / Provider ──────────────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Planning ────────────────────────────────────────────────────────
    #[error("plan: {0}")]
    Plan(#[from] PlanError),

    // ── Tools ───────────────────────────────────────────────────────────
    #[error("tool: {0}")]
    Tool(#[from] ToolError),

    // ── Booking ─────────────────────────────────────────────────────────
    #[error("booking: {0}")]
    Booking(#[from] BookingError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── LLM / Provider errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider {provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error(
        "{provider} API key not set. Add `api_key` to ~/.itinera/config.toml or set ITINERA_API_KEY."
    )]
    MissingApiKey { provider: String },

    #[error("provider {provider} returned no content")]
    EmptyResponse { provider: String },
}

// ─── Planning errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("planner request failed: {0}")]
    Planner(String),

    #[error("planner output is not valid plan JSON: {0}")]
    Parse(String),

    #[error("plan must contain at least one task")]
    Empty,

    #[error("invalid plan: {0}")]
    InvalidPlan(String),
}

// ─── Tool errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("tool {name} received invalid arguments: {message}")]
    InvalidArguments { name: String, message: String },
}

// ─── Booking errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("booking information is incomplete: {missing}")]
    Incomplete { missing: String },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ItineraError>;
