#![allow(dead_code)]

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{Method, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use fakestore_mcp::api::ClientConfig;
use fakestore_mcp::router::create_app_router;
use fakestore_mcp::state::AppState;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::util::ServiceExt; // for `oneshot`

/// How the mock upstream answers every request.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// 200 with a JSON description of the request.
    Echo,
    /// Fixed status with a short text body.
    Status(u16),
    /// Sleep before answering (timeout tests).
    Delay(Duration),
    /// 200 with a body that is not JSON.
    Garbage,
}

/// One request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
struct MockState {
    behavior: Behavior,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub struct MockUpstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockUpstream {
    pub async fn start(behavior: Behavior) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            behavior,
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn single_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one upstream request");
        requests.into_iter().next().unwrap()
    }
}

async fn record(State(state): State<MockState>, method: Method, uri: Uri, body: Bytes) -> Response {
    let body = (!body.is_empty())
        .then(|| serde_json::from_slice::<Value>(&body).ok())
        .flatten();
    let recorded = Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        body: body.clone(),
    };
    state.requests.lock().unwrap().push(recorded);

    match state.behavior {
        Behavior::Echo => axum::Json(json!({
            "id": 21,
            "method": method.to_string(),
            "path": uri.path(),
            "body": body,
        }))
        .into_response(),
        Behavior::Status(code) => (
            StatusCode::from_u16(code).unwrap(),
            "upstream exploded",
        )
            .into_response(),
        Behavior::Delay(delay) => {
            tokio::time::sleep(delay).await;
            axum::Json(json!({ "late": true })).into_response()
        }
        Behavior::Garbage => "<html>definitely not json</html>".into_response(),
    }
}

/// App wired to `base_url` with default client settings.
pub fn create_test_app(base_url: &str) -> Router {
    create_test_app_with(ClientConfig::with_base_url(base_url))
}

pub fn create_test_app_with(config: ClientConfig) -> Router {
    let state = Arc::new(AppState::from_config(config).unwrap());
    create_app_router(state)
}

/// Sends a JSON-RPC request to `/mcp` and returns status and body.
pub async fn send_jsonrpc_request(
    app: &Router,
    method: &str,
    params: Option<Value>,
    id: i32,
) -> (StatusCode, Value) {
    let request_body = json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": id
    });

    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&request_body).unwrap()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));

    (status, body)
}

/// Calls a tool and returns the `result` envelope.
pub async fn call_tool(app: &Router, name: &str, arguments: Value) -> Value {
    let params = json!({ "name": name, "arguments": arguments });
    let (status, body) = send_jsonrpc_request(app, "tools/call", Some(params), 1).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("error").is_none(), "unexpected rpc error: {body}");
    body["result"].clone()
}

/// Text payload of a tool envelope.
pub fn envelope_text(result: &Value) -> &str {
    result["content"][0]["text"].as_str().unwrap()
}

pub fn is_error(result: &Value) -> bool {
    result["isError"].as_bool().unwrap_or(false)
}
