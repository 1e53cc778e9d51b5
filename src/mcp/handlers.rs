//! MCP (Model Context Protocol) route handlers
//!
//! JSON-RPC endpoint plus the tool dispatcher. `handle_tool_call` is public so
//! tests can drive tools without going through HTTP.

use super::{helpers::*, models::*};
use crate::api::FakeStoreClient;
use crate::error::{Result, StoreError};
use crate::state::{AppState, SharedState};
use crate::store::{self, carts, products, users};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// Creates routes for MCP-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(handle_mcp).get(handle_mcp_sse))
        .route("/mcp", post(handle_mcp).get(handle_mcp_sse)) // Standard endpoint
        .route("/mcp/", post(handle_mcp).get(handle_mcp_sse)) // Trailing slash safety
}

/// Handle SSE (Server-Sent Events) handshake for GET requests
async fn handle_mcp_sse() -> impl IntoResponse {
    (
        [("content-type", "text/event-stream")],
        "event: endpoint\ndata: /mcp\n\n",
    )
}

/// Endpoint: POST /mcp
/// Handles the Model Context Protocol communication for POST requests.
async fn handle_mcp(
    State(state): State<SharedState>,
    body: std::result::Result<Json<JsonRpcRequest>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    let req = match body {
        Ok(Json(r)) => r,
        Err(e) => {
            warn!(error = %e.body_text(), "failed to parse JSON-RPC request");
            return (
                StatusCode::BAD_REQUEST,
                Json(rpc_error(Value::Null, PARSE_ERROR, "Parse error")),
            )
                .into_response();
        }
    };

    let id = req.id.unwrap_or(Value::Null);
    let method_name = req.method.as_str();
    let params = req.params.unwrap_or(Value::Null);

    debug!(method = method_name, id = %id, "MCP call");

    let response_body = match method_name {
        "initialize" => rpc_success(id, handle_initialize()),
        "notifications/initialized" => rpc_success(id, json!({})),
        "tools/list" => rpc_success(id, handle_tools_list()),
        "tools/call" => match serde_json::from_value::<ToolCallParams>(params) {
            Ok(call) => rpc_success(
                id,
                handle_tool_call(&state, &call.name, call.arguments).await,
            ),
            Err(e) => rpc_error(id, INVALID_PARAMS, format!("Invalid params: {e}")),
        },
        "ping" => rpc_success(id, json!({})),
        _ => {
            warn!(method = method_name, "unknown MCP method");
            rpc_error(id, METHOD_NOT_FOUND, "Method not found")
        }
    };

    Json(response_body).into_response()
}

// =============================================================================
// MCP Method Handlers
// =============================================================================

/// Handles `initialize` request (Handshake).
fn handle_initialize() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION
        }
    })
}

/// Handles `tools/list` request.
fn handle_tools_list() -> Value {
    json!({ "tools": store::catalog() })
}

/// Handles `tools/call` request.
///
/// Always yields a tool result envelope: failures anywhere in the chain come
/// back with `isError` set rather than as a JSON-RPC error.
pub async fn handle_tool_call(state: &AppState, name: &str, args: Value) -> Value {
    match dispatch(&state.client, name, &args).await {
        Ok(payload) => {
            info!(tool = name, "tool call succeeded");
            tool_success(&payload)
        }
        Err(err) => {
            warn!(
                tool = name,
                error = %err,
                status = err.status(),
                code = err.code(),
                "tool call failed"
            );
            tool_error(&err)
        }
    }
}

/// Routes a tool name to its resource operation.
async fn dispatch(client: &FakeStoreClient, name: &str, args: &Value) -> Result<Value> {
    match name {
        products::LIST_PRODUCTS => products::list_products(client, args).await,
        products::GET_PRODUCT => products::get_product(client, args).await,
        products::LIST_CATEGORIES => products::list_categories(client, args).await,
        products::GET_PRODUCTS_BY_CATEGORY => {
            products::get_products_by_category(client, args).await
        }
        products::ADD_PRODUCT => products::add_product(client, args).await,
        products::UPDATE_PRODUCT => products::update_product(client, args).await,
        products::DELETE_PRODUCT => products::delete_product(client, args).await,

        carts::LIST_CARTS => carts::list_carts(client, args).await,
        carts::GET_CART => carts::get_cart(client, args).await,
        carts::GET_USER_CARTS => carts::get_user_carts(client, args).await,
        carts::ADD_CART => carts::add_cart(client, args).await,
        carts::UPDATE_CART => carts::update_cart(client, args).await,
        carts::DELETE_CART => carts::delete_cart(client, args).await,

        users::LIST_USERS => users::list_users(client, args).await,
        users::GET_USER => users::get_user(client, args).await,
        users::ADD_USER => users::add_user(client, args).await,
        users::UPDATE_USER => users::update_user(client, args).await,
        users::DELETE_USER => users::delete_user(client, args).await,

        _ => Err(StoreError::UnknownTool(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClientConfig;

    fn offline_state() -> AppState {
        // Nothing listens here; these tests never reach the network.
        AppState::from_config(ClientConfig::with_base_url("http://127.0.0.1:1")).unwrap()
    }

    #[tokio::test]
    async fn every_catalog_entry_is_dispatchable() {
        let state = offline_state();
        for tool in store::catalog() {
            // `[]` is rejected by argument parsing, so no request is sent.
            let envelope = handle_tool_call(&state, tool.name, json!([])).await;
            let text = envelope["content"][0]["text"].as_str().unwrap();
            assert_eq!(text, "Arguments must be a JSON object", "{}", tool.name);
        }
        assert_eq!(state.client.limiter().in_flight(), 0);
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error_envelope() {
        let state = offline_state();
        let envelope = handle_tool_call(&state, "teleport", json!({})).await;
        assert_eq!(envelope["isError"], true);
        assert_eq!(envelope["content"][0]["text"], "Unknown tool: teleport");
    }

    #[tokio::test]
    async fn validation_fails_before_any_request() {
        let state = offline_state();
        for (tool, args) in [
            (products::GET_PRODUCT, json!({ "id": 0 })),
            (products::GET_PRODUCT, json!({ "id": -4 })),
            (products::GET_PRODUCT, json!({ "id": 1.5 })),
            (products::LIST_PRODUCTS, json!({ "limit": 0 })),
            (products::LIST_PRODUCTS, json!({ "sort": "ASC" })),
            (
                carts::ADD_CART,
                json!({ "userId": 1, "products": [{ "productId": 1, "quantity": -1 }] }),
            ),
            (users::DELETE_USER, json!({})),
        ] {
            let envelope = handle_tool_call(&state, tool, args).await;
            assert_eq!(envelope["isError"], true, "{tool}");
        }
        assert_eq!(state.client.limiter().in_flight(), 0);
    }
}
