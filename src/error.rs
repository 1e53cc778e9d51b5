//! Error types for the Fake Store MCP server.

use thiserror::Error;

/// Every failure a tool call can produce.
///
/// Errors are converted into an MCP error envelope by the dispatcher; they never
/// surface to the host as JSON-RPC faults.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Invalid client configuration (base URL, HTTP client setup).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bad or missing argument, detected before any network call.
    #[error("{0}")]
    Validation(String),

    /// Upstream answered with a non-2xx status or an unreadable body.
    #[error("{message}")]
    Upstream {
        message: String,
        status: Option<u16>,
    },

    /// The request never completed (connect failure, timeout, ...).
    #[error("{message}")]
    Transport {
        message: String,
        code: Option<&'static str>,
    },

    /// Tool name not present in the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The in-process soft cap on outgoing requests was reached.
    #[error("Rate limit exceeded: at most {limit} requests per {window_secs}s, try again later")]
    RateLimited { limit: usize, window_secs: u64 },
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status reported by upstream, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => *status,
            _ => None,
        }
    }

    /// Short transport failure code (`timeout`, `connect`, ...).
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Transport { code, .. } => *code,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            Some("timeout")
        } else if err.is_connect() {
            Some("connect")
        } else if err.is_decode() {
            Some("decode")
        } else if err.is_body() {
            Some("body")
        } else if err.is_request() {
            Some("request")
        } else {
            None
        };

        if let Some(status) = err.status() {
            return Self::Upstream {
                message: format!("Upstream API error: {err}"),
                status: Some(status.as_u16()),
            };
        }

        Self::Transport {
            message: format!("Request to upstream API failed: {err}"),
            code,
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
