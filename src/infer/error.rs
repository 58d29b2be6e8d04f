use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Response parsing failed: {0}")]
    ParseFailed(#[from] serde_json::Error),

    /// The provider answered with an error; carries its message verbatim.
    #[error("{0}")]
    ErrorResponse(String),
}
