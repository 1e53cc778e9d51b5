//! Product tools
//!
//! Wraps `/products`, `/products/{id}`, `/products/categories` and
//! `/products/category/{category}`.

use super::models::{NewProduct, ProductPatch};
use super::{
    id_schema, into_properties, list_properties, list_query, object_schema, Arguments,
    ToolDescriptor,
};
use crate::api::FakeStoreClient;
use crate::error::{Result, StoreError};
use crate::validation;
use serde_json::{json, Map, Value};
use tracing::info;

pub const LIST_PRODUCTS: &str = "list_products";
pub const GET_PRODUCT: &str = "get_product";
pub const LIST_CATEGORIES: &str = "list_categories";
pub const GET_PRODUCTS_BY_CATEGORY: &str = "get_products_by_category";
pub const ADD_PRODUCT: &str = "add_product";
pub const UPDATE_PRODUCT: &str = "update_product";
pub const DELETE_PRODUCT: &str = "delete_product";

// =============================================================================
// Operations
// =============================================================================

/// GET `/products`, honoring `limit` and `sort`.
pub async fn list_products(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    let args = Arguments::new(args)?;
    let query = list_query(&args)?;
    client.fetch("/products", &query).await
}

/// GET `/products/{id}`.
pub async fn get_product(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    let args = Arguments::new(args)?;
    let id = validation::positive_integer(args.get("id"), "id")?;
    client.fetch(&format!("/products/{id}"), &[]).await
}

/// GET `/products/categories`.
pub async fn list_categories(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    Arguments::new(args)?;
    client.fetch("/products/categories", &[]).await
}

/// GET `/products/category/{category}` with the category percent-encoded.
pub async fn get_products_by_category(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    let args = Arguments::new(args)?;
    let category = validation::non_empty_string(args.get("category"), "category")?;
    let query = list_query(&args)?;
    let segment = validation::sanitize_path_segment(&category, "category")?;
    client
        .fetch(&format!("/products/category/{segment}"), &query)
        .await
}

/// POST a new product built from all five required fields.
pub async fn add_product(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    let product = new_product(&Arguments::new(args)?)?;
    info!(title = %product.title, "creating product");
    client.create("/products", &product).await
}

/// PUT only the supplied product fields to `/products/{id}`.
pub async fn update_product(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    let args = Arguments::new(args)?;
    let id = validation::positive_integer(args.get("id"), "id")?;
    let patch = product_patch(&args)?;
    info!(id, "updating product");
    client.replace(&format!("/products/{id}"), &patch).await
}

/// DELETE `/products/{id}`.
pub async fn delete_product(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    let args = Arguments::new(args)?;
    let id = validation::positive_integer(args.get("id"), "id")?;
    info!(id, "deleting product");
    client.remove(&format!("/products/{id}")).await
}

// =============================================================================
// Body shaping
// =============================================================================

fn new_product(args: &Arguments<'_>) -> Result<NewProduct> {
    Ok(NewProduct {
        title: validation::non_empty_string(args.get("title"), "title")?,
        price: validation::positive_number(args.get("price"), "price")?,
        description: validation::non_empty_string(args.get("description"), "description")?,
        image: validation::http_url(args.get("image"), "image")?,
        category: validation::non_empty_string(args.get("category"), "category")?,
    })
}

fn product_patch(args: &Arguments<'_>) -> Result<ProductPatch> {
    let patch = ProductPatch {
        title: validation::optional_non_empty_string(args.get("title"), "title")?,
        price: validation::optional_positive_number(args.get("price"), "price")?,
        description: validation::optional_non_empty_string(
            args.get("description"),
            "description",
        )?,
        image: validation::optional_http_url(args.get("image"), "image")?,
        category: validation::optional_non_empty_string(args.get("category"), "category")?,
    };
    if patch.is_empty() {
        return Err(StoreError::validation(
            "At least one product field must be provided to update",
        ));
    }
    Ok(patch)
}

// =============================================================================
// Catalog
// =============================================================================

fn product_properties() -> Map<String, Value> {
    let properties = json!({
        "title": { "type": "string", "description": "Product title" },
        "price": { "type": "number", "exclusiveMinimum": 0, "description": "Product price" },
        "description": { "type": "string", "description": "Product description" },
        "image": { "type": "string", "format": "uri", "description": "Product image URL" },
        "category": { "type": "string", "description": "Product category" }
    });
    into_properties(properties)
}

/// Catalog entries for the product tools.
pub fn tools() -> Vec<ToolDescriptor> {
    let mut category_properties = list_properties();
    category_properties.insert(
        "category".into(),
        json!({ "type": "string", "description": "Category name, e.g. \"electronics\"" }),
    );

    let mut update_properties = product_properties();
    update_properties.insert(
        "id".into(),
        json!({ "type": "integer", "minimum": 1, "description": "Product id" }),
    );

    vec![
        ToolDescriptor {
            name: LIST_PRODUCTS,
            title: "List products",
            description: "Get all products, optionally limited and sorted by id.",
            input_schema: object_schema(list_properties(), &[]),
        },
        ToolDescriptor {
            name: GET_PRODUCT,
            title: "Get product",
            description: "Get a single product by its id.",
            input_schema: id_schema("id", "Product id"),
        },
        ToolDescriptor {
            name: LIST_CATEGORIES,
            title: "List categories",
            description: "Get all product categories.",
            input_schema: object_schema(Map::new(), &[]),
        },
        ToolDescriptor {
            name: GET_PRODUCTS_BY_CATEGORY,
            title: "Products in category",
            description: "Get products in a specific category, optionally limited and sorted.",
            input_schema: object_schema(category_properties, &["category"]),
        },
        ToolDescriptor {
            name: ADD_PRODUCT,
            title: "Add product",
            description: "Create a new product. The API simulates the write and returns the new product with an id; nothing is persisted.",
            input_schema: object_schema(
                product_properties(),
                &["title", "price", "description", "image", "category"],
            ),
        },
        ToolDescriptor {
            name: UPDATE_PRODUCT,
            title: "Update product",
            description: "Update fields of an existing product. Only supplied fields are sent; the write is simulated.",
            input_schema: object_schema(update_properties, &["id"]),
        },
        ToolDescriptor {
            name: DELETE_PRODUCT,
            title: "Delete product",
            description: "Delete a product by id. The API returns the deleted product; the write is simulated.",
            input_schema: id_schema("id", "Product id"),
        },
    ]
}
