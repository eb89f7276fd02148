use super::types::ProviderResponse;
use std::future::Future;
use std::pin::Pin;

/// A chat-completion backend. Every generative collaborator in the crate
/// (planner, date and city resolution, hotel listings) talks through this.
pub trait Provider: Send + Sync {
    /// Provider identifier (e.g. "siliconflow", "openai").
    fn name(&self) -> &str;

    fn chat_with_system<'a>(
        &'a self,
        system_prompt: Option<&'a str>,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;

    /// Text plus token usage when the backend reports it.
    fn chat_with_system_full<'a>(
        &'a self,
        system_prompt: Option<&'a str>,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ProviderResponse>> + Send + 'a>> {
        Box::pin(async move {
            let text = self
                .chat_with_system(system_prompt, message, model, temperature)
                .await?;
            Ok(ProviderResponse::text_only(text))
        })
    }
}
