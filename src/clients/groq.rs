//! Generation provider client.
//!
//! Talks to an OpenAI-compatible chat endpoint (Groq by default) through the
//! `async-openai` crate. Requests constrain the output to a single JSON
//! object via `response_format`.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use tracing::{debug, warn};

use crate::clients::GenerationApi;
use crate::config::Config;
use crate::error::GenerationError;
use crate::utils::logging::truncate_text;

/// Client for the chat-completion endpoint.
///
/// Stateless; safe to retry at the caller's discretion (callers currently
/// make a single attempt and fall back on any failure).
pub struct GroqClient {
    client: Client<OpenAIConfig>,
    model: String,
    /// Log prompt/response previews at debug level.
    verbose: bool,
}

impl GroqClient {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.groq_api_key)
            .with_api_base(&config.groq_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model: config.groq_model.clone(),
            verbose: config.verbose_logging,
        }
    }
}

#[async_trait::async_trait]
impl GenerationApi for GroqClient {
    async fn chat(
        &self,
        system_message: &str,
        user_message: &str,
        max_tokens: u32,
    ) -> Result<String, GenerationError> {
        debug!(model = %self.model, prompt_chars = user_message.len(), "calling generation API");
        if self.verbose {
            debug!(prompt = %truncate_text(user_message, 500), "prompt preview");
        }

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_message)
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .temperature(0.7)
            .max_tokens(max_tokens)
            .response_format(ResponseFormat::JsonObject)
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!(model = %self.model, "generation API call failed: {e}");
            GenerationError::Transport(e.to_string())
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| GenerationError::Transport("empty completion".to_string()))?;

        debug!(model = %self.model, response_chars = content.len(), "generation API call succeeded");
        if self.verbose {
            debug!(response = %truncate_text(&content, 500), "response preview");
        }

        Ok(content.trim().to_string())
    }
}
