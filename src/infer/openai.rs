use serde::Serialize;
use serde_json::Value;

use super::{ChatProvider, InferError};
use crate::config::ProviderConfig;

pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_USER: &str = "user";

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: Box<str>,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// OpenAI-compatible chat completions over HTTPS, as served by the Hugging Face
/// inference router.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl HttpProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.config.infer_url)
    }
}

impl ChatProvider for HttpProvider {
    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest<'_>,
    ) -> Result<Value, InferError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let response_text = response.text().await?;

        let body = match serde_json::from_str::<Value>(&response_text) {
            Ok(body) => body,
            Err(error) if status.is_success() => return Err(error.into()),
            Err(_) => {
                return Err(InferError::ErrorResponse(format!(
                    "Provider returned {status}: {}",
                    response_text.trim()
                )));
            }
        };

        // Error bodies win over the status code, some providers send them with 200
        if let Some(message) = error_message(&body) {
            return Err(InferError::ErrorResponse(message));
        }
        if !status.is_success() {
            return Err(InferError::ErrorResponse(format!("Provider returned {status}")));
        }
        Ok(body)
    }
}

/// `{"error": "..."}` and `{"error": {"message": "..."}}` are both in use.
fn error_message(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        Value::Object(error) => Some(
            error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| Value::Object(error.clone()).to_string()),
        ),
        other => Some(other.to_string()),
    }
}
