use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    config::CompletionConfig,
    infer::{ChatCompletionRequest, ChatMessage, ChatProvider, MessageRole, extract::extract_text},
    service,
};

/// What the collector sends to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub prompt: Box<str>,
}

/// Forwards a prompt to the chat-completion provider behind a fixed system
/// instruction and hands back the generated text.
///
/// Holds no per-request state, share it behind an `Arc`.
#[derive(Debug)]
pub struct Relay<P> {
    provider: P,
    completion: CompletionConfig,
}

impl<P: ChatProvider> Relay<P> {
    pub fn new(provider: P, completion: CompletionConfig) -> Self {
        Self {
            provider,
            completion,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Validates a decoded request body and relays its `prompt`.
    pub async fn handle_recipe_request(&self, body: &Value) -> service::Result<Box<str>> {
        let prompt = prompt_from_body(body).inspect_err(|_| {
            tracing::info!("Rejected request without a usable prompt");
        })?;
        self.handle_prompt(prompt).await
    }

    pub async fn handle_prompt(&self, prompt: &str) -> service::Result<Box<str>> {
        if prompt.is_empty() {
            tracing::info!("Rejected empty prompt");
            return Err(service::Error::InvalidInput);
        }

        let request_id = Uuid::new_v4();
        tracing::info!(%request_id, "Received prompt: {prompt:?}");

        let messages = self.compose(prompt);
        let request = ChatCompletionRequest {
            model: &self.completion.model,
            messages: &messages,
            max_tokens: self.completion.max_tokens,
        };
        tracing::info!(%request_id, model = %self.completion.model, "Sending prompt to provider");

        match self.provider.chat_completion(&request).await {
            Ok(response) => {
                tracing::info!(%request_id, "Response received successfully");
                Ok(extract_text(&response))
            }
            Err(error) => {
                tracing::error!(%request_id, "Provider call failed: {error}");
                Err(error.into())
            }
        }
    }

    /// System instruction first, then the caller's prompt untouched.
    pub fn compose(&self, prompt: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage {
                role: MessageRole::System.into_role_str(),
                content: self.completion.system_prompt.clone(),
            },
            ChatMessage {
                role: MessageRole::User.into_role_str(),
                content: prompt.into(),
            },
        ]
    }
}

/// Only a present, non-empty JSON string passes.
pub fn prompt_from_body(body: &Value) -> service::Result<&str> {
    match body.get("prompt") {
        Some(Value::String(prompt)) if !prompt.is_empty() => Ok(prompt),
        _ => Err(service::Error::InvalidInput),
    }
}

/// Decodes a raw request body. Anything that is not JSON decodes to `null`,
/// which then fails validation like a missing prompt.
pub fn parse_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes).unwrap_or_else(|error| {
        tracing::info!("Request body is not JSON: {error}");
        Value::Null
    })
}
