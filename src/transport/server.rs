use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Request, State},
    http::{Method, StatusCode, header},
    middleware::{self, Next},
    response::Response,
    routing::post,
};
use tower_http::cors::{Any, CorsLayer};

use super::log_entry;
use crate::{
    infer::ChatProvider,
    relay::{Relay, parse_body},
    service::{self, RecipeResponse},
};

pub fn build_router<P: ChatProvider + 'static>(relay: Arc<Relay<P>>) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // Build router
    Router::new()
        .route(
            "/api",
            post(recipe_handler::<P>)
                .options(preflight_handler)
                .fallback(method_not_allowed_handler),
        )
        .fallback(not_found_handler)
        .layer(middleware::from_fn(log_request))
        .layer(cors)
        .with_state(relay)
}

pub async fn serve<P: ChatProvider + 'static>(relay: Arc<Relay<P>>, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, build_router(relay).into_make_service()).await
}

async fn log_request(request: Request, next: Next) -> Response {
    log_entry(request.method().as_str(), request.uri().path());
    next.run(request).await
}

pub async fn recipe_handler<P: ChatProvider + 'static>(
    State(relay): State<Arc<Relay<P>>>,
    body: Bytes,
) -> service::Result<Json<RecipeResponse>> {
    let body = parse_body(&body);
    let text = relay.handle_recipe_request(&body).await?;
    Ok(Json(RecipeResponse::Text { text }))
}

async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed_handler() -> service::Error {
    service::Error::MethodNotAllowed
}

async fn not_found_handler() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::{config::CompletionConfig, infer::fake::FakeProvider};

    fn router(provider: FakeProvider) -> (Router, Arc<Relay<FakeProvider>>) {
        let relay = Arc::new(Relay::new(provider, CompletionConfig::default()));
        (build_router(relay.clone()), relay)
    }

    fn post_api(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/api")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn relays_prompt_and_returns_text() {
        let (router, relay) = router(FakeProvider::replying(
            json!({"choices": [{"message": {"content": "# Shakshuka"}}]}),
        ));

        let response = router
            .oneshot(post_api(r#"{"prompt":"eggs, tomatoes"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
        assert_eq!(json_body(response).await, json!({"text": "# Shakshuka"}));
        assert_eq!(relay.provider().requests()[0].messages[1].1, "eggs, tomatoes");
    }

    #[tokio::test]
    async fn bad_prompt_is_400() {
        for body in [r#"{}"#, r#"{"prompt":7}"#, r#"{"prompt":""}"#, "not json", ""] {
            let (router, relay) = router(FakeProvider::replying(json!({})));
            let response = router.oneshot(post_api(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(
                json_body(response).await,
                json!({"error": "prompt (string) is required"})
            );
            assert!(relay.provider().requests().is_empty());
        }
    }

    #[tokio::test]
    async fn provider_failure_is_500() {
        let (router, _) = router(FakeProvider::failing("Rate limit reached"));
        let response = router.oneshot(post_api(r#"{"prompt":"eggs"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await, json!({"error": "Rate limit reached"}));
    }

    #[tokio::test]
    async fn cors_preflight_is_answered() {
        let (router, relay) = router(FakeProvider::replying(json!({})));
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api")
            .header(header::ORIGIN, "https://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers().clone();
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        let methods = headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap()
            .to_owned();
        assert!(methods.contains("POST") && methods.contains("OPTIONS"));
        let allowed = headers
            .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
            .unwrap()
            .to_str()
            .unwrap()
            .to_ascii_lowercase();
        assert!(allowed.contains("content-type"));
        assert!(to_bytes(response.into_body(), usize::MAX).await.unwrap().is_empty());
        assert!(relay.provider().requests().is_empty());
    }

    #[tokio::test]
    async fn bare_options_is_empty_ok() {
        let (router, _) = router(FakeProvider::replying(json!({})));
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(to_bytes(response.into_body(), usize::MAX).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn other_methods_are_405() {
        let (router, _) = router(FakeProvider::replying(json!({})));
        let request = Request::builder()
            .method(Method::GET)
            .uri("/api")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json_body(response).await, json!({"error": "Method not allowed"}));
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let (router, _) = router(FakeProvider::replying(json!({})));
        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/recipes")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
