//! Configuration module for cfdns
//!
//! This module handles loading and validating configuration from an optional
//! TOML file and environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::constants::{
    CLOUDFLARE_API_BASE, ENV_API_BASE_URL, ENV_API_TOKEN, ENV_DOMAIN_NAME, ENV_ZONE_ID,
};
use crate::error::DnsError;
use crate::validation::validate_record_name;

//==============================================================================
// Config
//==============================================================================

/// Configuration for a cfdns invocation
///
/// Holds the Cloudflare credentials, the zone the records live in and the
/// base domain used to qualify bare labels. The API token is wrapped in
/// `Zeroizing` so it is cleared from memory on drop, and is redacted from
/// `Debug` output.
///
/// # Configuration Loading Priority
///
/// 1. Environment variables (highest priority)
/// 2. Config file (`--config <path>`)
/// 3. Defaults (lowest priority)
#[derive(Clone, ZeroizeOnDrop)]
pub struct Config {
    /// Cloudflare API token with `Zone:DNS:Edit` permission
    ///
    /// Set via `CLOUDFLARE_API_TOKEN`.
    #[zeroize(skip)]
    pub api_token: Zeroizing<String>,
    /// Cloudflare zone ID
    ///
    /// Set via `CLOUDFLARE_ZONE_ID`.
    #[zeroize(skip)]
    pub zone_id: String,
    /// Base domain of the zone (e.g. "example.com")
    ///
    /// Set via `CLOUDFLARE_DOMAIN_NAME`.
    #[zeroize(skip)]
    pub domain_name: String,
    /// Cloudflare API base URL
    ///
    /// Default: `https://api.cloudflare.com/client/v4`
    #[zeroize(skip)]
    pub base_url: String,
    /// Enable verbose logging
    #[zeroize(skip)]
    pub verbose: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &"<redacted>")
            .field("zone_id", &self.zone_id)
            .field("domain_name", &self.domain_name)
            .field("base_url", &self.base_url)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl Config {
    /// Builds a configuration against the public Cloudflare API
    pub fn new(
        api_token: impl Into<String>,
        zone_id: impl Into<String>,
        domain_name: impl Into<String>,
    ) -> Self {
        Self {
            api_token: Zeroizing::new(api_token.into()),
            zone_id: zone_id.into(),
            domain_name: domain_name.into(),
            base_url: CLOUDFLARE_API_BASE.to_string(),
            verbose: false,
        }
    }

    /// Points the client at a different API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Loads configuration from file and environment variables
    ///
    /// 1. Loads from the specified config file (if provided and exists)
    /// 2. Overrides with environment variables (if set and non-empty)
    /// 3. Validates the final configuration
    ///
    /// # Environment Variables
    ///
    /// - `CLOUDFLARE_API_TOKEN` - Cloudflare API token
    /// - `CLOUDFLARE_ZONE_ID` - Cloudflare zone ID
    /// - `CLOUDFLARE_DOMAIN_NAME` - Base domain of the zone
    /// - `CLOUDFLARE_API_BASE_URL` - API base URL override
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::load_from_file(config_path)?;
        config.override_with_env();
        config.validate()?;
        Ok(config)
    }

    fn load_from_file(config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::new("", "", "");

        if let Some(path) = config_path {
            if path.exists() {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config: {}", path.display()))?;
                let toml_config: TomlConfig =
                    toml::from_str(&content).with_context(|| "Failed to parse config file")?;

                if let Some(v) = toml_config.api_token {
                    config.api_token = Zeroizing::new(v);
                }
                if let Some(v) = toml_config.zone_id {
                    config.zone_id = v;
                }
                if let Some(v) = toml_config.domain_name {
                    config.domain_name = v;
                }
                if let Some(v) = toml_config.base_url {
                    config.base_url = v;
                }
                config.verbose = toml_config.verbose.unwrap_or(false);
            }
        }

        Ok(config)
    }

    fn override_with_env(&mut self) {
        if let Some(v) = non_empty_env(ENV_API_TOKEN) {
            self.api_token = Zeroizing::new(v);
        }
        if let Some(v) = non_empty_env(ENV_ZONE_ID) {
            self.zone_id = v;
        }
        if let Some(v) = non_empty_env(ENV_DOMAIN_NAME) {
            self.domain_name = v;
        }
        if let Some(v) = non_empty_env(ENV_API_BASE_URL) {
            self.base_url = v;
        }
    }

    /// Validates the configuration
    ///
    /// Fails if the API token, zone ID or domain name is missing, if the
    /// domain name is not a valid DNS name, or if the base URL is empty.
    pub fn validate(&self) -> std::result::Result<(), DnsError> {
        if self.api_token.trim().is_empty() {
            return Err(DnsError::config(format!("{} is not set", ENV_API_TOKEN)));
        }
        if self.zone_id.trim().is_empty() {
            return Err(DnsError::config(format!("{} is not set", ENV_ZONE_ID)));
        }
        if self.domain_name.trim().is_empty() {
            return Err(DnsError::config(format!("{} is not set", ENV_DOMAIN_NAME)));
        }
        validate_record_name(&self.domain_name)
            .map_err(|e| DnsError::config(format!("{} is invalid: {}", ENV_DOMAIN_NAME, e)))?;
        if self.base_url.trim().is_empty() {
            return Err(DnsError::config(format!("{} is empty", ENV_API_BASE_URL)));
        }
        Ok(())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// TOML configuration file structure
#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    api_token: Option<String>,
    zone_id: Option<String>,
    domain_name: Option<String>,
    base_url: Option<String>,
    verbose: Option<bool>,
}

//==============================================================================
// Tests
//==============================================================================
