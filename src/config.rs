//! Command-line configuration
//!
//! Every flag has an environment fallback so the server can be configured
//! from a container spec without a wrapper script.

use crate::api::client::{DEFAULT_BASE_URL, DEFAULT_RATE_LIMIT};
use crate::api::ClientConfig;
use clap::{Parser, ValueEnum};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable output
    Pretty,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "fakestore-mcp", version, about = "Fake Store API exposed as MCP tools")]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long, env = "FAKESTORE_MCP_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "FAKESTORE_MCP_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Base URL of the upstream Fake Store API
    #[arg(long, env = "FAKESTORE_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request upstream timeout, in seconds
    #[arg(long, env = "FAKESTORE_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Maximum upstream requests per rate window
    #[arg(long, env = "FAKESTORE_RATE_LIMIT", default_value_t = DEFAULT_RATE_LIMIT)]
    pub rate_limit: usize,

    /// Length of the rate window, in seconds
    #[arg(long, env = "FAKESTORE_RATE_WINDOW_SECS", default_value_t = 60)]
    pub rate_window_secs: u64,

    /// Log output format
    #[arg(long, env = "FAKESTORE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Config {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            rate_limit: self.rate_limit,
            rate_window: Duration::from_secs(self.rate_window_secs),
        }
    }
}
