//! Integration tests for the MCP (Model Context Protocol) endpoint
//!
//! These tests verify the protocol surface:
//! - Server initialization and handshake
//! - Tool discovery and listing
//! - Error handling for malformed requests and unknown methods/tools

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{call_tool, create_test_app, envelope_text, is_error, send_jsonrpc_request};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

/// Nothing listens here; protocol tests never reach upstream.
const OFFLINE_UPSTREAM: &str = "http://127.0.0.1:1";

#[tokio::test]
async fn test_mcp_sse_endpoint() {
    let app = create_test_app(OFFLINE_UPSTREAM);

    let request = Request::builder()
        .method("GET")
        .uri("/mcp")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(content_type, "text/event-stream");

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_str = String::from_utf8(body_bytes.to_vec()).unwrap();

    assert!(body_str.contains("event: endpoint"));
    assert!(body_str.contains("data: /mcp"));
}

#[tokio::test]
async fn test_health() {
    let app = create_test_app(OFFLINE_UPSTREAM);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_mcp_initialize() {
    let app = create_test_app(OFFLINE_UPSTREAM);

    let (status, body) = send_jsonrpc_request(&app, "initialize", None, 1).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], 1);

    let result = &body["result"];
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "fakestore-mcp");
    assert!(result["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn test_mcp_tools_list() {
    let app = create_test_app(OFFLINE_UPSTREAM);

    let (status, body) = send_jsonrpc_request(&app, "tools/list", None, 2).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);

    let tools = body["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 18);

    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    for expected in [
        "list_products",
        "get_product",
        "list_categories",
        "get_products_by_category",
        "add_product",
        "update_product",
        "delete_product",
        "list_carts",
        "get_cart",
        "get_user_carts",
        "add_cart",
        "update_cart",
        "delete_cart",
        "list_users",
        "get_user",
        "add_user",
        "update_user",
        "delete_user",
    ] {
        assert!(names.contains(&expected), "missing tool {expected}");
    }

    let add_product = tools.iter().find(|t| t["name"] == "add_product").unwrap();
    assert!(!add_product["description"].as_str().unwrap().is_empty());
    assert_eq!(
        add_product["inputSchema"]["required"],
        json!(["title", "price", "description", "image", "category"])
    );
    assert_eq!(
        add_product["inputSchema"]["properties"]["price"]["type"],
        "number"
    );

    let list_products = tools.iter().find(|t| t["name"] == "list_products").unwrap();
    assert_eq!(
        list_products["inputSchema"]["properties"]["sort"]["enum"],
        json!(["asc", "desc"])
    );
}

#[tokio::test]
async fn test_mcp_unknown_method() {
    let app = create_test_app(OFFLINE_UPSTREAM);

    let (status, body) = send_jsonrpc_request(&app, "unknown/method", None, 11).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 11);

    let error = &body["error"];
    assert_eq!(error["code"], -32601);
    assert_eq!(error["message"], "Method not found");
}

#[tokio::test]
async fn test_mcp_invalid_json() {
    let app = create_test_app(OFFLINE_UPSTREAM);

    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from("invalid json {{{"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();

    assert_eq!(body["error"]["code"], -32700);
    assert_eq!(body["error"]["message"], "Parse error");
}

#[tokio::test]
async fn test_mcp_tool_call_unknown_tool() {
    let app = create_test_app(OFFLINE_UPSTREAM);

    let result = call_tool(&app, "unknown_tool", json!({})).await;

    assert!(is_error(&result));
    assert_eq!(envelope_text(&result), "Unknown tool: unknown_tool");
}

#[tokio::test]
async fn test_mcp_tool_call_without_name() {
    let app = create_test_app(OFFLINE_UPSTREAM);

    let params = json!({ "arguments": {} });
    let (status, body) = send_jsonrpc_request(&app, "tools/call", Some(params), 12).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["code"], -32602);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid params"));
}

#[tokio::test]
async fn test_mcp_tool_call_validation_error() {
    let app = create_test_app(OFFLINE_UPSTREAM);

    let result = call_tool(&app, "get_product", json!({ "id": "seven" })).await;

    assert!(is_error(&result));
    assert_eq!(envelope_text(&result), "id must be a positive integer");
}

#[tokio::test]
async fn test_mcp_tool_call_without_arguments() {
    let app = create_test_app(OFFLINE_UPSTREAM);

    let params = json!({ "name": "delete_cart" });
    let (status, body) = send_jsonrpc_request(&app, "tools/call", Some(params), 13).await;

    assert_eq!(status, StatusCode::OK);
    let result = &body["result"];
    assert!(is_error(result));
    assert_eq!(envelope_text(result), "id is required");
}

#[tokio::test]
async fn test_mcp_ping() {
    let app = create_test_app(OFFLINE_UPSTREAM);

    let (status, body) = send_jsonrpc_request(&app, "ping", None, 14).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 14);
    assert_eq!(body["result"], json!({}));
}

#[tokio::test]
async fn test_mcp_notifications_initialized() {
    let app = create_test_app(OFFLINE_UPSTREAM);

    let (status, body) = send_jsonrpc_request(&app, "notifications/initialized", None, 15).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!({}));
}

#[tokio::test]
async fn test_mcp_invalid_method_type() {
    let app = create_test_app(OFFLINE_UPSTREAM);

    // method should be a string, let's pass a number
    let request_body = json!({
        "jsonrpc": "2.0",
        "method": 123,
        "id": 1
    });

    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&request_body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
