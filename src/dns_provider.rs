//! DNS provider abstraction layer
//!
//! This module defines the record model and the trait command handlers use
//! to talk to a DNS provider. `CloudflareClient` is the production
//! implementation.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::constants::DNS_TTL_AUTO;
use crate::error::Result;

//==============================================================================
// Types
//==============================================================================

/// A single DNS record in the zone
///
/// Records built locally carry an empty `id`; the provider assigns one on
/// creation and it keys every later update or delete. An empty `id` is left
/// out of request bodies.
///
/// Every field is required when decoding, so a provider response missing one
/// or carrying the wrong JSON type fails to decode instead of producing a
/// partially filled record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Provider-assigned identifier
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Fully-qualified record name
    pub name: String,
    /// Record type (e.g. "A", "CNAME")
    #[serde(rename = "type")]
    pub record_type: String,
    /// Target value
    pub content: String,
    /// Time-to-live in seconds; `1` means automatic
    pub ttl: u32,
    /// Whether traffic is proxied through Cloudflare
    pub proxied: bool,
}

impl DnsRecord {
    /// Builds a not-yet-created record with automatic TTL and proxying off
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            record_type: record_type.into(),
            content: content.into(),
            ttl: DNS_TTL_AUTO,
            proxied: false,
        }
    }

    /// True when the TTL is Cloudflare's "automatic" sentinel
    pub fn is_auto_ttl(&self) -> bool {
        self.ttl == DNS_TTL_AUTO
    }
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DNS {} {} -> {} (TTL: ", self.record_type, self.name, self.content)?;
        if self.is_auto_ttl() {
            write!(f, "auto")?;
        } else {
            write!(f, "{}", self.ttl)?;
        }
        write!(f, ", Proxied: {})", self.proxied)
    }
}

//==============================================================================
// Trait
//==============================================================================

/// Record operations against a single zone
///
/// Implementations validate their configuration before every call and
/// perform exactly one request per operation, without retries.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Creates `record` in the zone
    ///
    /// The identifier the provider assigns is not written back into `record`;
    /// look the record up by name to obtain it.
    async fn create_record(&self, record: &DnsRecord) -> Result<()>;

    /// Replaces the record identified by `record_id` with `record`
    async fn update_record(&self, record_id: &str, record: &DnsRecord) -> Result<()>;

    /// Deletes the record identified by `record_id`
    async fn delete_record(&self, record_id: &str) -> Result<()>;

    /// Returns the first record whose name matches `name`
    ///
    /// `name` may be a bare label or a fully-qualified name.
    ///
    /// # Errors
    ///
    /// Returns `DnsError::NotFound` if no record matches.
    async fn get_record_by_name(&self, name: &str) -> Result<DnsRecord>;

    /// Returns every record in the zone, in provider order
    async fn list_records(&self) -> Result<Vec<DnsRecord>>;

    /// Base domain used to qualify bare labels
    fn domain_name(&self) -> &str;
}

//==============================================================================
// Tests
//==============================================================================
