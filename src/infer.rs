use serde_json::Value;

mod error;
pub use error::InferError;
pub mod extract;
mod openai;
pub use openai::{ChatCompletionRequest, ChatMessage, HttpProvider, ROLE_SYSTEM, ROLE_USER};

#[cfg(test)]
pub(crate) mod fake;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
}

impl MessageRole {
    pub fn into_role_str(self) -> &'static str {
        match self {
            Self::System => openai::ROLE_SYSTEM,
            Self::User => openai::ROLE_USER,
        }
    }
}

/// A hosted chat-completion endpoint.
///
/// The raw response object is handed back untouched; picking the generated text
/// out of it is [`extract::extract_text`]'s job, because providers disagree on
/// the response shape.
pub trait ChatProvider: Send + Sync {
    fn chat_completion(
        &self,
        request: &ChatCompletionRequest<'_>,
    ) -> impl Future<Output = Result<Value, InferError>> + Send;
}
