//! Fake Store MCP Library
//!
//! Exposes the Fake Store e-commerce REST API (products, carts, users) as
//! Model Context Protocol tools.

// Domain modules
pub mod api;
pub mod store;
pub mod validation;

// Protocol
pub mod mcp;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod state;

pub use error::{Result, StoreError};
