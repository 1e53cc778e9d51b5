//! User tools
//!
//! Wraps `/users` and `/users/{id}`. Callers pass flat fields
//! (`firstname`, `city`, `lat`, ...); they are nested into the upstream's
//! `name` / `address` / `address.geolocation` objects here.

use super::models::{Geolocation, NewUser, UserAddress, UserName, UserPatch};
use super::{
    id_schema, into_properties, list_properties, list_query, object_schema, Arguments,
    ToolDescriptor,
};
use crate::api::FakeStoreClient;
use crate::error::{Result, StoreError};
use crate::validation;
use serde_json::{json, Map, Value};
use tracing::info;

pub const LIST_USERS: &str = "list_users";
pub const GET_USER: &str = "get_user";
pub const ADD_USER: &str = "add_user";
pub const UPDATE_USER: &str = "update_user";
pub const DELETE_USER: &str = "delete_user";

/// GET `/users`, honoring `limit` and `sort`.
pub async fn list_users(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    let args = Arguments::new(args)?;
    let query = list_query(&args)?;
    client.fetch("/users", &query).await
}

/// GET `/users/{id}`.
pub async fn get_user(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    let args = Arguments::new(args)?;
    let id = validation::positive_integer(args.get("id"), "id")?;
    client.fetch(&format!("/users/{id}"), &[]).await
}

/// POST a new user with name and address nested as upstream expects.
pub async fn add_user(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    let user = new_user(&Arguments::new(args)?)?;
    info!(username = %user.username, "creating user");
    client.create("/users", &user).await
}

/// PUT only the supplied user fields to `/users/{id}`.
pub async fn update_user(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    let args = Arguments::new(args)?;
    let id = validation::positive_integer(args.get("id"), "id")?;
    let patch = user_patch(&args)?;
    info!(id, "updating user");
    client.replace(&format!("/users/{id}"), &patch).await
}

/// DELETE `/users/{id}`.
pub async fn delete_user(client: &FakeStoreClient, args: &Value) -> Result<Value> {
    let args = Arguments::new(args)?;
    let id = validation::positive_integer(args.get("id"), "id")?;
    info!(id, "deleting user");
    client.remove(&format!("/users/{id}")).await
}

fn name_from(args: &Arguments<'_>) -> Result<Option<UserName>> {
    Ok(UserName::from_parts(
        validation::optional_non_empty_string(args.get("firstname"), "firstname")?,
        validation::optional_non_empty_string(args.get("lastname"), "lastname")?,
    ))
}

fn address_from(args: &Arguments<'_>) -> Result<Option<UserAddress>> {
    let address = UserAddress {
        city: validation::optional_non_empty_string(args.get("city"), "city")?,
        street: validation::optional_non_empty_string(args.get("street"), "street")?,
        number: validation::optional_positive_integer(args.get("number"), "number")?,
        zipcode: validation::optional_non_empty_string(args.get("zipcode"), "zipcode")?,
        geolocation: Geolocation::from_parts(
            validation::optional_number(args.get("lat"), "lat")?,
            validation::optional_number(args.get("long"), "long")?,
        ),
    };
    Ok((!address.is_empty()).then_some(address))
}

fn new_user(args: &Arguments<'_>) -> Result<NewUser> {
    Ok(NewUser {
        email: validation::email(args.get("email"), "email")?,
        username: validation::non_empty_string(args.get("username"), "username")?,
        password: validation::non_empty_string(args.get("password"), "password")?,
        name: name_from(args)?,
        address: address_from(args)?,
        phone: validation::optional_non_empty_string(args.get("phone"), "phone")?,
    })
}

fn user_patch(args: &Arguments<'_>) -> Result<UserPatch> {
    let patch = UserPatch {
        email: validation::optional_email(args.get("email"), "email")?,
        username: validation::optional_non_empty_string(args.get("username"), "username")?,
        password: validation::optional_non_empty_string(args.get("password"), "password")?,
        name: name_from(args)?,
        address: address_from(args)?,
        phone: validation::optional_non_empty_string(args.get("phone"), "phone")?,
    };
    if patch.is_empty() {
        return Err(StoreError::validation(
            "At least one user field must be provided to update",
        ));
    }
    Ok(patch)
}

fn user_properties() -> Map<String, Value> {
    let properties = json!({
        "email": { "type": "string", "format": "email", "description": "Email address" },
        "username": { "type": "string", "description": "Login name" },
        "password": { "type": "string", "description": "Password" },
        "firstname": { "type": "string", "description": "First name" },
        "lastname": { "type": "string", "description": "Last name" },
        "phone": { "type": "string", "description": "Phone number" },
        "city": { "type": "string", "description": "Address city" },
        "street": { "type": "string", "description": "Address street" },
        "number": { "type": "integer", "minimum": 1, "description": "Address house number" },
        "zipcode": { "type": "string", "description": "Address zip code" },
        "lat": { "type": "number", "description": "Address latitude" },
        "long": { "type": "number", "description": "Address longitude" }
    });
    into_properties(properties)
}

/// Catalog entries for the user tools.
pub fn tools() -> Vec<ToolDescriptor> {
    let mut update_properties = user_properties();
    update_properties.insert(
        "id".into(),
        json!({ "type": "integer", "minimum": 1, "description": "User id" }),
    );

    vec![
        ToolDescriptor {
            name: LIST_USERS,
            title: "List users",
            description: "Get all users, optionally limited and sorted by id.",
            input_schema: object_schema(list_properties(), &[]),
        },
        ToolDescriptor {
            name: GET_USER,
            title: "Get user",
            description: "Get a single user by id.",
            input_schema: id_schema("id", "User id"),
        },
        ToolDescriptor {
            name: ADD_USER,
            title: "Add user",
            description: "Create a new user. Name and address fields are optional and nested automatically. The write is simulated.",
            input_schema: object_schema(user_properties(), &["email", "username", "password"]),
        },
        ToolDescriptor {
            name: UPDATE_USER,
            title: "Update user",
            description: "Update an existing user. Only supplied fields are sent; the write is simulated.",
            input_schema: object_schema(update_properties, &["id"]),
        },
        ToolDescriptor {
            name: DELETE_USER,
            title: "Delete user",
            description: "Delete a user by id. The write is simulated.",
            input_schema: id_schema("id", "User id"),
        },
    ]
}
