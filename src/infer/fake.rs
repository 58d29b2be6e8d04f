use std::sync::Mutex;

use serde_json::Value;

use super::{ChatCompletionRequest, ChatProvider, InferError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub model: String,
    pub messages: Vec<(&'static str, String)>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug)]
enum Script {
    Reply(Value),
    Fail(String),
}

#[derive(Debug)]
pub struct FakeProvider {
    script: Script,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeProvider {
    pub fn replying(response: Value) -> Self {
        Self {
            script: Script::Reply(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            script: Script::Fail(message.to_owned()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ChatProvider for FakeProvider {
    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest<'_>,
    ) -> Result<Value, InferError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            model: request.model.to_owned(),
            messages: request
                .messages
                .iter()
                .map(|message| (message.role, message.content.to_string()))
                .collect(),
            max_tokens: request.max_tokens,
        });
        match &self.script {
            Script::Reply(response) => Ok(response.clone()),
            Script::Fail(message) => Err(InferError::ErrorResponse(message.clone())),
        }
    }
}
