//! cfdns - DNS record management for a single Cloudflare zone
//!
//! The library holds everything except process setup: configuration,
//! record name normalization, the Cloudflare client and the command
//! handlers. `main.rs` parses arguments, initializes logging and wires these
//! together.

pub mod cloudflare;
pub mod commands;
pub mod config;
pub mod constants;
pub mod dns_provider;
pub mod error;
pub mod naming;
pub mod validation;

pub use cloudflare::CloudflareClient;
pub use config::Config;
pub use dns_provider::{DnsProvider, DnsRecord};
pub use error::DnsError;
