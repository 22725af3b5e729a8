//! Local stand-in for a chat-completion endpoint.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Json;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// One request as seen by the fake endpoint.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone)]
struct EndpointState {
    replies: Arc<Mutex<Vec<(StatusCode, String)>>>,
    delay: Option<Duration>,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

pub struct FakeEndpoint {
    pub url: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl FakeEndpoint {
    /// Serve `replies` in order; the last one repeats once the others are used.
    pub async fn start(replies: Vec<(StatusCode, String)>) -> Self {
        Self::start_with_delay(replies, None).await
    }

    pub async fn start_with_delay(
        mut replies: Vec<(StatusCode, String)>,
        delay: Option<Duration>,
    ) -> Self {
        replies.reverse();
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = EndpointState {
            replies: Arc::new(Mutex::new(replies)),
            delay,
            captured: captured.clone(),
        };

        let app = axum::Router::new()
            .route(COMPLETIONS_PATH, post(complete))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self {
            url: format!("http://{addr}{COMPLETIONS_PATH}"),
            captured,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().expect("lock").clone()
    }
}

async fn complete(
    State(state): State<EndpointState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    state
        .captured
        .lock()
        .expect("lock")
        .push(CapturedRequest { headers, body });

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    let mut replies = state.replies.lock().expect("lock");
    if replies.len() > 1 {
        replies.pop().expect("reply")
    } else {
        replies.last().cloned().expect("at least one reply")
    }
}

/// A successful completion body whose first choice says `content`.
pub fn completion(content: &str) -> (StatusCode, String) {
    let body = json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    });
    (StatusCode::OK, body.to_string())
}

pub fn error_body(status: StatusCode, error: Value) -> (StatusCode, String) {
    (status, json!({ "error": error }).to_string())
}

/// An address nothing listens on.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}{COMPLETIONS_PATH}")
}
