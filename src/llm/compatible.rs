//! Generic OpenAI-compatible provider.
//! SiliconFlow, DeepSeek, Moonshot, OpenAI and most hosted gateways accept the
//! same `/chat/completions` request, so one implementation serves all of them.

use super::scrub::sanitize_api_error;
use super::traits::Provider;
use super::types::ProviderResponse;
use super::http_client::build_provider_client_with_timeout;
use crate::error::LlmError;
use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

pub struct OpenAiCompatibleProvider {
    pub(crate) name: String,
    pub(crate) base_url: String,
    pub(crate) api_key: Option<String>,
    /// Pre-computed chat completions URL (avoids `format!` per request).
    cached_chat_url: String,
    client: Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(name: &str, base_url: &str, api_key: Option<&str>) -> Self {
        Self::with_timeout(name, base_url, api_key, 120)
    }

    pub fn with_timeout(
        name: &str,
        base_url: &str,
        api_key: Option<&str>,
        timeout_secs: u64,
    ) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let cached_chat_url = if base_url.contains("chat/completions") {
            base_url.clone()
        } else {
            format!("{base_url}/chat/completions")
        };

        Self {
            name: name.to_string(),
            base_url,
            api_key: api_key.map(ToString::to_string),
            cached_chat_url,
            client: build_provider_client_with_timeout(timeout_secs),
        }
    }

    fn chat_completions_url(&self) -> &str {
        &self.cached_chat_url
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<ChatUsage>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

fn extract_chat_text(response: &ChatResponse, provider_name: &str) -> anyhow::Result<String> {
    response
        .choices
        .first()
        .and_then(|choice| choice.message.content.clone())
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| {
            LlmError::EmptyResponse {
                provider: provider_name.to_string(),
            }
            .into()
        })
}

impl OpenAiCompatibleProvider {
    async fn call_chat_completions(&self, request: &ChatRequest) -> anyhow::Result<ChatResponse> {
        let mut builder = self.client.post(self.chat_completions_url()).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| anyhow::anyhow!(sanitize_api_error(&e.to_string())))
            .with_context(|| format!("{} chat completions request failed", self.name))?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(LlmError::Request {
                provider: self.name.clone(),
                message: format!("API error ({status}): {}", sanitize_api_error(&error)),
            }
            .into());
        }

        response
            .json()
            .await
            .with_context(|| format!("{} chat completions JSON decode failed", self.name))
    }

    async fn chat_with_system_internal(
        &self,
        system_prompt: Option<&str>,
        message: &str,
        model: &str,
        temperature: f64,
    ) -> anyhow::Result<ProviderResponse> {
        if self.api_key.is_none() {
            return Err(LlmError::MissingApiKey {
                provider: self.name.clone(),
            }
            .into());
        }

        let mut messages = Vec::with_capacity(2);
        if let Some(sys) = system_prompt {
            messages.push(Message {
                role: "system",
                content: sys.to_string(),
            });
        }
        messages.push(Message {
            role: "user",
            content: message.to_string(),
        });

        let request = ChatRequest {
            model: model.to_string(),
            messages,
            temperature,
        };

        let chat_response = self.call_chat_completions(&request).await?;
        let text = extract_chat_text(&chat_response, &self.name)?;
        let mut provider_response = if let Some(usage) = &chat_response.usage {
            ProviderResponse::with_usage(text, usage.prompt_tokens, usage.completion_tokens)
        } else {
            ProviderResponse::text_only(text)
        };
        if let Some(api_model) = chat_response.model {
            provider_response = provider_response.with_model(api_model);
        }

        tracing::debug!(
            provider = %self.name,
            model = %model,
            tokens = ?provider_response.total_tokens(),
            "llm.chat"
        );
        Ok(provider_response)
    }
}

impl Provider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn chat_with_system<'a>(
        &'a self,
        system_prompt: Option<&'a str>,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            self.chat_with_system_internal(system_prompt, message, model, temperature)
                .await
                .map(|response| response.text)
        })
    }

    fn chat_with_system_full<'a>(
        &'a self,
        system_prompt: Option<&'a str>,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ProviderResponse>> + Send + 'a>> {
        Box::pin(self.chat_with_system_internal(system_prompt, message, model, temperature))
    }
}
