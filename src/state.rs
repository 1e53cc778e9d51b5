//! Application State
//!
//! The server holds no per-call state: the only thing shared between requests
//! is the upstream client (and the rate limiter it owns).

use crate::api::{ClientConfig, FakeStoreClient};
use crate::error::Result;
use std::sync::Arc;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// State handed to every handler: the upstream client.
pub struct AppState {
    pub client: FakeStoreClient,
}

impl AppState {
    /// Wraps an already built client.
    pub fn new(client: FakeStoreClient) -> Self {
        Self { client }
    }

    /// Builds the state with a fresh client for `config`.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::new(FakeStoreClient::new(config)?))
    }
}
