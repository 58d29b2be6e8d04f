use http::{Method, StatusCode};
use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    infer::ChatProvider,
    relay::Relay,
    service::{self, RecipeResponse},
};

pub mod event;
pub mod function;
#[cfg(feature = "server-http2")]
pub mod server;

pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

/// Transport-neutral answer: a status plus an optional JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Option<RecipeResponse>,
}

impl Reply {
    pub fn preflight() -> Self {
        Self {
            status: StatusCode::OK,
            body: None,
        }
    }

    pub fn from_result(result: service::Result<Box<str>>) -> Self {
        match result {
            Ok(text) => Self {
                status: StatusCode::OK,
                body: Some(RecipeResponse::Text { text }),
            },
            Err(error) => Self {
                status: error.status(),
                body: Some(RecipeResponse::from(&error)),
            },
        }
    }
}

pub fn log_entry(method: &str, path: &str) {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    tracing::info!("[{timestamp}] {method} {path}");
}

/// Method routing shared by the function-style handlers.
pub async fn dispatch<P: ChatProvider>(relay: &Relay<P>, method: &Method, body: &Value) -> Reply {
    if *method == Method::OPTIONS {
        return Reply::preflight();
    }
    if *method != Method::POST {
        return Reply::from_result(Err(service::Error::MethodNotAllowed));
    }
    Reply::from_result(relay.handle_recipe_request(body).await)
}
