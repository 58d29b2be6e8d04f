use std::collections::BTreeMap;

use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::{CORS_HEADERS, Reply, dispatch, log_entry};
use crate::{
    infer::ChatProvider,
    relay::{Relay, parse_body},
    service::{self, RecipeResponse},
};

/// Request as delivered by the function host; `body` is the raw request text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerEvent {
    pub http_method: Box<str>,
    #[serde(default)]
    pub path: Option<Box<str>>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub headers: BTreeMap<&'static str, &'static str>,
    pub body: String,
}

impl From<Reply> for HandlerResponse {
    fn from(reply: Reply) -> Self {
        Self {
            status_code: reply.status.as_u16(),
            headers: CORS_HEADERS.into_iter().collect(),
            body: reply
                .body
                .and_then(|body| serde_json::to_string(&body).ok())
                .unwrap_or_default(),
        }
    }
}

pub async fn handle<P: ChatProvider>(relay: &Relay<P>, event: HandlerEvent) -> HandlerResponse {
    let path = event.path.as_deref().unwrap_or("/");
    log_entry(event.http_method.trim(), path);

    match parse_method(&event.http_method) {
        Some(method) => {
            let body = parse_body(event.body.as_deref().unwrap_or_default().as_bytes());
            dispatch(relay, &method, &body).await.into()
        }
        None => Reply::from_result(Err(service::Error::MethodNotAllowed)).into(),
    }
}

/// Method names are case-insensitive; `None` when the name is not a valid token.
fn parse_method(raw: &str) -> Option<Method> {
    Method::from_bytes(raw.trim().to_ascii_uppercase().as_bytes()).ok()
}

/// Decodes a raw event, handles it and encodes the response. A broken envelope
/// is the host's fault, not the caller's, so it answers 500.
pub async fn handle_json<P: ChatProvider>(relay: &Relay<P>, event: &str) -> String {
    let response = match serde_json::from_str::<HandlerEvent>(event) {
        Ok(event) => handle(relay, event).await,
        Err(error) => {
            tracing::error!("Malformed handler event: {error}");
            HandlerResponse::from(Reply {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: Some(RecipeResponse::Error {
                    error: error.to_string().into(),
                }),
            })
        }
    };
    serde_json::json!(response).to_string()
}
