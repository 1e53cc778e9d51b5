//! Request bodies sent to the Fake Store API
//!
//! Responses are relayed to the host untouched, so only outgoing payloads are
//! typed. Optional fields are skipped when unset: update calls send exactly
//! what the caller supplied.

use crate::validation::CartLineInput;
use serde::Serialize;

// =============================================================================
// Products
// =============================================================================

/// Body of `POST /products`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub category: String,
}

/// Body of `PUT /products/{id}`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// =============================================================================
// Carts
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: u64,
    pub quantity: u64,
}

impl From<CartLineInput> for CartLine {
    fn from(line: CartLineInput) -> Self {
        Self {
            product_id: line.product_id,
            quantity: line.quantity,
        }
    }
}

/// Body of `POST /carts`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCart {
    pub user_id: u64,
    pub date: String,
    pub products: Vec<CartLine>,
}

/// Body of `PUT /carts/{id}`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<CartLine>>,
}

impl CartPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UserName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
}

impl UserName {
    /// `None` when neither part was supplied.
    pub fn from_parts(firstname: Option<String>, lastname: Option<String>) -> Option<Self> {
        if firstname.is_none() && lastname.is_none() {
            return None;
        }
        Some(Self {
            firstname,
            lastname,
        })
    }
}

/// Coordinates are strings upstream (`"-37.3159"`).
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Geolocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
}

impl Geolocation {
    pub fn from_parts(lat: Option<f64>, long: Option<f64>) -> Option<Self> {
        if lat.is_none() && long.is_none() {
            return None;
        }
        Some(Self {
            lat: lat.map(|v| v.to_string()),
            long: long.map(|v| v.to_string()),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UserAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geolocation: Option<Geolocation>,
}

impl UserAddress {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<UserName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<UserAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Body of `PUT /users/{id}`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<UserName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<UserAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
