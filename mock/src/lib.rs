use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::{response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::info;

/// Stand-in for the OpenAI images endpoint that also receives job callbacks.
pub struct MockImageApi {
    pub delay: Duration,
    pub status: StatusCode,
    pub body: Value,
    pub requests: Mutex<Vec<ReceivedRequest>>,
    pub answered: Mutex<usize>,
    pub callbacks: Mutex<Vec<Value>>,
}

#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

impl MockImageApi {
    pub fn new(delay: Duration, status: StatusCode, body: Value) -> Arc<Self> {
        Arc::new(MockImageApi {
            delay,
            status,
            body,
            requests: Mutex::new(vec![]),
            answered: Mutex::new(0),
            callbacks: Mutex::new(vec![]),
        })
    }

    pub fn succeeding(delay: Duration) -> Arc<Self> {
        Self::new(delay, StatusCode::OK, sample_images_response())
    }
}

pub fn sample_images_response() -> Value {
    json!({
        "created": 1700000000,
        "data": [{
            "url": "https://images.example.com/generated/1.png",
            "revised_prompt": "a watercolor fox in the snow"
        }]
    })
}

pub fn create_route(api: Arc<MockImageApi>) -> Router {
    Router::new()
        .route("/v1/images/generations", post(generate_images))
        .route("/callback", post(callback))
        .with_state(api)
}

pub async fn spawn(api: Arc<MockImageApi>) -> SocketAddr {
    let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(create_route(api).into_make_service());
    let addr = server.local_addr();
    tokio::spawn(server);
    addr
}

async fn generate_images(State(api): State<Arc<MockImageApi>>, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    let authorization = headers.get("authorization").and_then(|value| value.to_str().ok()).map(str::to_string);
    api.requests.lock().await.push(ReceivedRequest { authorization, body });
    tokio::time::sleep(api.delay).await;
    *api.answered.lock().await += 1;
    info!("answering image request with {}", api.status);
    (api.status, Json(api.body.clone()))
}

async fn callback(State(api): State<Arc<MockImageApi>>, Json(content): Json<Value>) -> StatusCode {
    info!("callback {}", content);
    api.callbacks.lock().await.push(content);
    StatusCode::OK
}
