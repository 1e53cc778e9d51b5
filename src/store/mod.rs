//! Fake Store resource tools
//!
//! One module per upstream resource family:
//! - `products` - catalog listing, lookup and product writes
//! - `carts` - cart listing, per-user carts and cart writes
//! - `users` - user listing and user writes
//!
//! Each module validates its arguments, shapes the request body, calls the
//! [`FakeStoreClient`](crate::api::FakeStoreClient) and publishes a
//! [`ToolDescriptor`] per operation.

pub mod carts;
pub mod models;
pub mod products;
pub mod users;

use crate::error::{Result, StoreError};
use crate::validation;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Externally visible description of one tool (`tools/list` entry).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Every tool exposed by the server, in catalog order.
pub fn catalog() -> Vec<ToolDescriptor> {
    let mut tools = products::tools();
    tools.extend(carts::tools());
    tools.extend(users::tools());
    tools
}

/// Loosely typed argument bag of a tool call.
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> Arguments<'a> {
    /// Accepts a JSON object, or nothing at all (`null`).
    pub fn new(value: &'a Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self {
                fields: Some(fields),
            }),
            Value::Null => Ok(Self { fields: None }),
            _ => Err(StoreError::validation("Arguments must be a JSON object")),
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.and_then(|fields| fields.get(key))
    }
}

/// `limit` / `sort` query parameters shared by every list operation.
pub(crate) fn list_query(args: &Arguments<'_>) -> Result<Vec<(&'static str, String)>> {
    let mut query = Vec::new();
    if let Some(limit) = validation::limit(args.get("limit"))? {
        query.push(("limit", limit.to_string()));
    }
    if let Some(sort) = validation::sort_order(args.get("sort"))? {
        query.push(("sort", sort.to_string()));
    }
    Ok(query)
}

/// JSON schema properties for `limit` / `sort`.
pub(crate) fn list_properties() -> Map<String, Value> {
    let properties = json!({
        "limit": {
            "type": "integer",
            "minimum": 1,
            "description": "Maximum number of results to return"
        },
        "sort": {
            "type": "string",
            "enum": validation::SORT_ORDERS,
            "description": "Sort order by id"
        }
    });
    into_properties(properties)
}

/// Unwraps a `json!({...})` literal into its property map.
pub(crate) fn into_properties(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Object schema with the given properties and required keys.
pub(crate) fn object_schema(properties: Map<String, Value>, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

/// Schema for a tool whose only argument is a positive integer id.
pub(crate) fn id_schema(key: &str, description: &str) -> Value {
    let mut properties = Map::new();
    properties.insert(
        key.to_string(),
        json!({ "type": "integer", "minimum": 1, "description": description }),
    );
    object_schema(properties, &[key])
}
