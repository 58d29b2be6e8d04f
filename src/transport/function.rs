use http::{Method, StatusCode};
use serde_json::Value;

use super::{CORS_HEADERS, dispatch, log_entry};
use crate::{infer::ChatProvider, relay::Relay};

/// Request handed over by the host with the JSON body already decoded.
#[derive(Debug, Clone)]
pub struct FunctionRequest {
    pub method: Method,
    pub path: Box<str>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionResponse {
    pub status: StatusCode,
    pub headers: Vec<(&'static str, &'static str)>,
    /// `None` means an empty body.
    pub body: Option<Value>,
}

pub async fn handle<P: ChatProvider>(relay: &Relay<P>, request: FunctionRequest) -> FunctionResponse {
    log_entry(request.method.as_str(), &request.path);
    let body = request.body.unwrap_or(Value::Null);
    let reply = dispatch(relay, &request.method, &body).await;

    FunctionResponse {
        status: reply.status,
        headers: CORS_HEADERS.to_vec(),
        body: reply.body.and_then(|body| serde_json::to_value(body).ok()),
    }
}
