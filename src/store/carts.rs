//! Cart tools
//!
//! Wraps `/carts`, `/carts/{id}` and `/carts/user/{userId}`.

use super::models::{CartLine, CartPatch, NewCart};
use super::{
    id_schema, into_properties, list_properties, list_query, object_schema, Arguments,
    ToolDescriptor,
};
use crate::api::FakeStoreClient;
use crate::error::{Result, StoreError};
use crate::validation;
use serde_json::{json, Map, Value};
use tracing::info;

pub const LIST_CARTS: &str = "list_carts";
pub const GET_CART: &str = "get_cart";
pub const GET_USER_CARTS: &str = "get_user_carts";
pub const ADD_CART: &str = "add_cart";
pub const UPDATE_CART: &str = "update_cart";
pub const DELETE_CART: &str = "delete_cart";

/// GET `/carts`, honoring `limit` and `sort`.
pub async fn list_carts(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    let args = Arguments::new(args)?;
    let query = list_query(&args)?;
    client.fetch("/carts", &query).await
}

/// GET `/carts/{id}`.
pub async fn get_cart(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    let args = Arguments::new(args)?;
    let id = validation::positive_integer(args.get("id"), "id")?;
    client.fetch(&format!("/carts/{id}"), &[]).await
}

/// GET `/carts/user/{userId}`.
pub async fn get_user_carts(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    let args = Arguments::new(args)?;
    let user_id = validation::positive_integer(args.get("userId"), "userId")?;
    let query = list_query(&args)?;
    client.fetch(&format!("/carts/user/{user_id}"), &query).await
}

/// POST a new cart; `date` defaults to today.
pub async fn add_cart(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    let cart = new_cart(&Arguments::new(args)?, &today())?;
    info!(user_id = cart.user_id, lines = cart.products.len(), "creating cart");
    client.create("/carts", &cart).await
}

/// PUT only the supplied cart fields to `/carts/{id}`.
pub async fn update_cart(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    let args = Arguments::new(args)?;
    let id = validation::positive_integer(args.get("id"), "id")?;
    let patch = cart_patch(&args)?;
    info!(id, "updating cart");
    client.replace(&format!("/carts/{id}"), &patch).await
}

/// DELETE `/carts/{id}`.
pub async fn delete_cart(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    let args = Arguments::new(args)?;
    let id = validation::positive_integer(args.get("id"), "id")?;
    info!(id, "deleting cart");
    client.remove(&format!("/carts/{id}")).await
}

/// Current UTC date in the upstream's `YYYY-MM-DD` form.
fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

fn new_cart(args: &Arguments<'_>, default_date: &str) -> Result<NewCart> {
    let user_id = validation::positive_integer(args.get("userId"), "userId")?;
    let products = validation::cart_lines(args.get("products"), "products")?;
    let date = validation::optional_non_empty_string(args.get("date"), "date")?
        .unwrap_or_else(|| default_date.to_string());

    Ok(NewCart {
        user_id,
        date,
        products: products.into_iter().map(CartLine::from).collect(),
    })
}

fn cart_patch(args: &Arguments<'_>) -> Result<CartPatch> {
    let patch = CartPatch {
        user_id: validation::optional_positive_integer(args.get("userId"), "userId")?,
        date: validation::optional_non_empty_string(args.get("date"), "date")?,
        products: validation::optional_cart_lines(args.get("products"), "products")?
            .map(|lines| lines.into_iter().map(CartLine::from).collect()),
    };
    if patch.is_empty() {
        return Err(StoreError::validation(
            "At least one cart field must be provided to update",
        ));
    }
    Ok(patch)
}

fn cart_properties() -> Map<String, Value> {
    let properties = json!({
        "userId": { "type": "integer", "minimum": 1, "description": "Owning user id" },
        "date": { "type": "string", "description": "Cart date (YYYY-MM-DD)" },
        "products": {
            "type": "array",
            "minItems": 1,
            "description": "Products in the cart",
            "items": {
                "type": "object",
                "properties": {
                    "productId": { "type": "integer", "minimum": 1 },
                    "quantity": { "type": "integer", "minimum": 1 }
                },
                "required": ["productId", "quantity"]
            }
        }
    });
    into_properties(properties)
}

/// Catalog entries for the cart tools.
pub fn tools() -> Vec<ToolDescriptor> {
    let mut user_carts_properties = list_properties();
    user_carts_properties.insert(
        "userId".into(),
        json!({ "type": "integer", "minimum": 1, "description": "User id" }),
    );

    let mut update_properties = cart_properties();
    update_properties.insert(
        "id".into(),
        json!({ "type": "integer", "minimum": 1, "description": "Cart id" }),
    );

    vec![
        ToolDescriptor {
            name: LIST_CARTS,
            title: "List carts",
            description: "Get all carts, optionally limited and sorted by id.",
            input_schema: object_schema(list_properties(), &[]),
        },
        ToolDescriptor {
            name: GET_CART,
            title: "Get cart",
            description: "Get a single cart by its id.",
            input_schema: id_schema("id", "Cart id"),
        },
        ToolDescriptor {
            name: GET_USER_CARTS,
            title: "User carts",
            description: "Get all carts belonging to a user.",
            input_schema: object_schema(user_carts_properties, &["userId"]),
        },
        ToolDescriptor {
            name: ADD_CART,
            title: "Add cart",
            description: "Create a new cart for a user. Date defaults to today. The write is simulated.",
            input_schema: object_schema(cart_properties(), &["userId", "products"]),
        },
        ToolDescriptor {
            name: UPDATE_CART,
            title: "Update cart",
            description: "Update an existing cart. Only supplied fields are sent; the write is simulated.",
            input_schema: object_schema(update_properties, &["id"]),
        },
        ToolDescriptor {
            name: DELETE_CART,
            title: "Delete cart",
            description: "Delete a cart by id. The write is simulated.",
            input_schema: id_schema("id", "Cart id"),
        },
    ]
}
