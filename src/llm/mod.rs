// ── Infrastructure ───────────────────────────────────────────────────────────
pub mod http_client;
pub mod scrub;
pub mod traits;
pub mod types;

// ── Client + provider implementations ───────────────────────────────────────
pub mod client;
pub mod compatible;


pub use client::ModelClient;
pub use compatible::OpenAiCompatibleProvider;
pub use http_client::build_provider_client_with_timeout;
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
pub use traits::Provider;
pub use types::ProviderResponse;
