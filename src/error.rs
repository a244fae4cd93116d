//! Error types for cfdns
//!
//! Every record operation returns [`DnsError`]; the binary wraps these in
//! `anyhow` with command-level context.

use reqwest::StatusCode;
use thiserror::Error;

/// Result alias for record operations
pub type Result<T> = std::result::Result<T, DnsError>;

/// Failure modes of the Cloudflare DNS client
#[derive(Debug, Error)]
pub enum DnsError {
    /// A required setting is missing or invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// The request could not be sent or its body could not be read
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API rejected the credentials (401/403)
    #[error("authentication failed: {status} - {body}")]
    Authentication { status: StatusCode, body: String },

    /// Any other non-2xx response, or an envelope reporting `success: false`
    #[error("request error: {status} - {body}")]
    Api { status: StatusCode, body: String },

    /// A by-name lookup matched nothing
    #[error("no DNS record found for {0}")]
    NotFound(String),

    /// The response did not have the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The request body could not be serialized
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl DnsError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the HTTP status for errors that carry one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Authentication { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// True for a by-name lookup that matched nothing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
