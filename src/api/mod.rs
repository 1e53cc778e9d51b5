//! Upstream API access
//!
//! - `client` - HTTP wrapper around the Fake Store REST API
//! - `rate_limit` - soft cap on outgoing requests

pub mod client;
pub mod rate_limit;

pub use client::{ClientConfig, FakeStoreClient};
pub use rate_limit::RateLimiter;
