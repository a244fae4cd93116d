//! Cloudflare API client for DNS operations
//!
//! Uses reqwest with rustls for HTTP requests. Every operation validates the
//! configuration, issues exactly one request and decodes the
//! `{success, errors, messages, result}` envelope into typed structs.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use tracing::{debug, info, warn};
use urlencoding::encode;

use crate::config::Config;
use crate::constants::{CLOUDFLARE_USER_AGENT, HTTP_STATUS_FORBIDDEN, HTTP_STATUS_UNAUTHORIZED};
use crate::dns_provider::{DnsProvider, DnsRecord};
use crate::error::{DnsError, Result};
use crate::naming::qualify;

//==============================================================================
// Types
//==============================================================================

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(default)]
    errors: Vec<ApiError>,
    #[serde(default)]
    #[allow(dead_code)]
    messages: Vec<serde_json::Value>,
    result: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiError {
    code: u64,
    message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// A 2xx response: status and raw body
struct ApiReply {
    status: StatusCode,
    body: Vec<u8>,
}

impl ApiReply {
    fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the envelope and returns its `result`
    fn decode<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        let envelope: ApiResponse<T> = serde_json::from_slice(&self.body)
            .map_err(|e| DnsError::MalformedResponse(format!("{}: {}", e, self.body_text())))?;
        if !envelope.success {
            debug!(
                "API reported failure: {}",
                envelope
                    .errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            return Err(DnsError::Api {
                status: self.status,
                body: self.body_text(),
            });
        }
        Ok(envelope.result)
    }

    /// Checks a mutation response
    ///
    /// The 2xx status is what counts. The body only matters when it is an
    /// envelope reporting `success: false`; anything else is ignored.
    fn ensure_success(&self) -> Result<()> {
        match self.decode::<IgnoredAny>() {
            Err(DnsError::MalformedResponse(reason)) => {
                debug!("Ignoring non-envelope {} body: {}", self.status, reason);
                Ok(())
            }
            other => other.map(|_| ()),
        }
    }
}

fn classify_failure(status: StatusCode, body: String) -> DnsError {
    match status.as_u16() {
        HTTP_STATUS_UNAUTHORIZED | HTTP_STATUS_FORBIDDEN => {
            warn!("Cloudflare rejected the API token ({})", status);
            DnsError::Authentication { status, body }
        }
        _ => DnsError::Api { status, body },
    }
}

//==============================================================================
// Client
//==============================================================================

/// Cloudflare implementation of [`DnsProvider`] for a single zone
pub struct CloudflareClient {
    config: Config,
    client: reqwest::Client,
}

impl CloudflareClient {
    /// Creates a client, validating `config` first
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .user_agent(CLOUDFLARE_USER_AGENT)
            .build()?;

        Ok(Self { config, client })
    }

    fn records_url(&self) -> String {
        format!(
            "{}/zones/{}/dns_records",
            self.config.base_url.trim_end_matches('/'),
            self.config.zone_id
        )
    }

    fn record_url(&self, record_id: &str) -> String {
        format!("{}/{}", self.records_url(), encode(record_id))
    }

    /// Performs one authenticated request
    ///
    /// Any status outside 200-299 fails with the status line and the body
    /// text; 401 and 403 are reported as authentication failures.
    async fn execute(&self, method: Method, url: &str, body: Option<Vec<u8>>) -> Result<ApiReply> {
        debug!("{} {}", method, url);
        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(self.config.api_token.as_str())
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.body(body);
        }

        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?.to_vec();
        debug!("-> {} ({} bytes)", status, body.len());

        if !status.is_success() {
            return Err(classify_failure(
                status,
                String::from_utf8_lossy(&body).into_owned(),
            ));
        }
        Ok(ApiReply { status, body })
    }

    fn encode_record(record: &DnsRecord) -> Result<Vec<u8>> {
        serde_json::to_vec(record).map_err(DnsError::Encode)
    }
}

#[async_trait]
impl DnsProvider for CloudflareClient {
    async fn create_record(&self, record: &DnsRecord) -> Result<()> {
        self.config.validate()?;
        let url = self.records_url();
        let payload = Self::encode_record(record)?;

        self.execute(Method::POST, &url, Some(payload))
            .await?
            .ensure_success()?;
        info!("Created {} record {}", record.record_type, record.name);
        Ok(())
    }

    async fn update_record(&self, record_id: &str, record: &DnsRecord) -> Result<()> {
        self.config.validate()?;
        let url = self.record_url(record_id);
        let payload = Self::encode_record(record)?;

        self.execute(Method::PATCH, &url, Some(payload))
            .await?
            .ensure_success()?;
        info!("Updated record {} ({})", record.name, record_id);
        Ok(())
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        self.config.validate()?;
        let url = self.record_url(record_id);

        self.execute(Method::DELETE, &url, None)
            .await?
            .ensure_success()?;
        info!("Deleted record {}", record_id);
        Ok(())
    }

    async fn get_record_by_name(&self, name: &str) -> Result<DnsRecord> {
        self.config.validate()?;
        let fqdn = qualify(name, &self.config.domain_name);
        let url = format!("{}?name={}", self.records_url(), encode(&fqdn));

        let records: Option<Vec<DnsRecord>> =
            self.execute(Method::GET, &url, None).await?.decode()?;
        records
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(DnsError::NotFound(fqdn))
    }

    async fn list_records(&self) -> Result<Vec<DnsRecord>> {
        self.config.validate()?;
        let url = self.records_url();

        let records: Option<Vec<DnsRecord>> =
            self.execute(Method::GET, &url, None).await?.decode()?;
        Ok(records.unwrap_or_default())
    }

    fn domain_name(&self) -> &str {
        &self.config.domain_name
    }
}

//==============================================================================
// Tests
//==============================================================================
