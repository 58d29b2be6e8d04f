use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::infer::InferError;

pub const INVALID_PROMPT_MESSAGE: &str = "prompt (string) is required";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}", INVALID_PROMPT_MESSAGE)]
    InvalidInput,
    #[error("{}", METHOD_NOT_ALLOWED_MESSAGE)]
    MethodNotAllowed,
    #[error(transparent)]
    ProviderFailure(#[from] InferError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::InvalidInput => StatusCode::BAD_REQUEST,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::ProviderFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message for the `error` field of the response body; never empty.
    pub fn message(&self) -> Box<str> {
        let message = self.to_string();
        if message.trim().is_empty() {
            INTERNAL_ERROR_MESSAGE.into()
        } else {
            message.into()
        }
    }
}

/// Body of every relay answer: `{"text": ...}` or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeResponse {
    Text { text: Box<str> },
    Error { error: Box<str> },
}

impl From<&Error> for RecipeResponse {
    fn from(error: &Error) -> Self {
        RecipeResponse::Error {
            error: error.message(),
        }
    }
}

#[cfg(feature = "server-http2")]
impl axum::response::IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        (self.status(), axum::Json(RecipeResponse::from(&self))).into_response()
    }
}
