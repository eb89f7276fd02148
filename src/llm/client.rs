use super::compatible::OpenAiCompatibleProvider;
use super::traits::Provider;
use crate::config::Config;
use std::sync::Arc;
use tracing::debug;

/// A provider bound to one model and temperature.
///
/// This is the handle that gets injected into the planner and into the tools
/// that need generative help; nothing in the crate reaches for a global client.
#[derive(Clone)]
pub struct ModelClient {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f64,
}

impl ModelClient {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f64) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
        }
    }

    /// Build the OpenAI-compatible client described by `[llm]` and `api_key`.
    pub fn from_config(config: &Config) -> Self {
        let provider = OpenAiCompatibleProvider::with_timeout(
            "llm",
            &config.llm.base_url,
            config.api_key.as_deref(),
            config.llm.timeout_secs,
        );
        Self::new(
            Arc::new(provider),
            config.llm.model.clone(),
            config.llm.temperature,
        )
    }

    /// Same provider, different model. Used by the CLI `--model` override.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn ask(&self, system_prompt: Option<&str>, message: &str) -> anyhow::Result<String> {
        let response = self
            .provider
            .chat_with_system_full(system_prompt, message, &self.model, self.temperature)
            .await?;
        debug!(
            provider = %self.provider.name(),
            model = response.model.as_deref().unwrap_or(&self.model),
            input_tokens = ?response.input_tokens,
            output_tokens = ?response.output_tokens,
            total_tokens = ?response.total_tokens(),
            "model call finished"
        );
        Ok(response.text)
    }
}

impl std::fmt::Debug for ModelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelClient")
            .field("provider", &self.provider.name())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}
