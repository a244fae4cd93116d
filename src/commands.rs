//! Command handlers
//!
//! Each handler turns command-line input into record operations on a
//! [`DnsProvider`] and writes a single result line (or the record table) to
//! `out`. Errors carry command-level context; the underlying [`DnsError`]
//! stays reachable with `downcast_ref`.
//!
//! [`DnsError`]: crate::error::DnsError

use std::io::Write;

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use tracing::debug;

use crate::constants::{DEFAULT_RECORD_TYPE, DNS_TTL_AUTO};
use crate::dns_provider::{DnsProvider, DnsRecord};
use crate::naming::{display_name, qualify};
use crate::validation::{normalize_record_type, validate_content, validate_record_name};

//==============================================================================
// Arguments
//==============================================================================

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new DNS record for a subdomain
    ///
    /// Example: cfdns add mypage --type A --content 192.168.1.1
    Add(AddArgs),
    /// Delete the DNS record for a subdomain
    Delete(DeleteArgs),
    /// Update the type and content of an existing DNS record
    ///
    /// Example: cfdns update mypage --type A --content 192.168.1.2
    Update(UpdateArgs),
    /// List every DNS record in the zone
    List,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Subdomain (e.g. "www"), "@" for the apex, or a fully-qualified name
    pub subdomain: String,
    /// DNS record type (A, AAAA, CNAME, ...)
    #[arg(short = 't', long = "type", default_value = DEFAULT_RECORD_TYPE)]
    pub record_type: String,
    /// Record content (IP address or target host name)
    #[arg(short, long)]
    pub content: String,
    /// Time-to-live in seconds; 1 means automatic
    #[arg(long, default_value_t = DNS_TTL_AUTO)]
    pub ttl: u32,
    /// Route traffic through Cloudflare's network
    #[arg(long)]
    pub proxied: bool,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Subdomain (e.g. "www"), "@" for the apex, or a fully-qualified name
    pub subdomain: String,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Subdomain (e.g. "www"), "@" for the apex, or a fully-qualified name
    pub subdomain: String,
    /// New DNS record type (A, AAAA, CNAME, ...)
    #[arg(short = 't', long = "type", default_value = DEFAULT_RECORD_TYPE)]
    pub record_type: String,
    /// New record content (IP address or target host name)
    #[arg(short, long)]
    pub content: String,
}

//==============================================================================
// Handlers
//==============================================================================

/// Dispatches `command` to its handler
pub async fn run<W: Write>(command: Command, provider: &dyn DnsProvider, out: &mut W) -> Result<()> {
    match command {
        Command::Add(args) => add(provider, args, out).await,
        Command::Delete(args) => delete(provider, args, out).await,
        Command::Update(args) => update(provider, args, out).await,
        Command::List => list(provider, out).await,
    }
}

pub async fn add<W: Write>(provider: &dyn DnsProvider, args: AddArgs, out: &mut W) -> Result<()> {
    let record_type = normalize_record_type(&args.record_type)?;
    validate_content(&record_type, &args.content)?;
    let name = qualified_name(provider, &args.subdomain)?;

    let mut record = DnsRecord::new(name, record_type, args.content);
    record.ttl = args.ttl;
    record.proxied = args.proxied;
    debug!("Adding {}", record);

    provider
        .create_record(&record)
        .await
        .context("failed to add DNS record")?;

    writeln!(out, "DNS record for {} added successfully", args.subdomain)?;
    Ok(())
}

pub async fn delete<W: Write>(
    provider: &dyn DnsProvider,
    args: DeleteArgs,
    out: &mut W,
) -> Result<()> {
    let name = qualified_name(provider, &args.subdomain)?;

    let record = provider
        .get_record_by_name(&name)
        .await
        .context("failed to look up DNS record")?;
    provider
        .delete_record(&record.id)
        .await
        .context("failed to delete DNS record")?;

    writeln!(out, "DNS record for {} deleted successfully", args.subdomain)?;
    Ok(())
}

/// Replaces type and content; TTL and proxied flag are kept
pub async fn update<W: Write>(
    provider: &dyn DnsProvider,
    args: UpdateArgs,
    out: &mut W,
) -> Result<()> {
    let record_type = normalize_record_type(&args.record_type)?;
    validate_content(&record_type, &args.content)?;
    let name = qualified_name(provider, &args.subdomain)?;

    let mut record = provider
        .get_record_by_name(&name)
        .await
        .context("failed to look up DNS record")?;
    record.record_type = record_type;
    record.content = args.content;
    debug!("Updating {} -> {}", record.id, record);

    provider
        .update_record(&record.id, &record)
        .await
        .context("failed to update DNS record")?;

    writeln!(out, "DNS record for {} updated successfully", args.subdomain)?;
    Ok(())
}

pub async fn list<W: Write>(provider: &dyn DnsProvider, out: &mut W) -> Result<()> {
    let records = provider
        .list_records()
        .await
        .context("failed to list DNS records")?;
    render_records(&records, provider.domain_name(), out)?;
    Ok(())
}

/// Writes the record table shown by `list`
pub fn render_records<W: Write>(records: &[DnsRecord], domain: &str, out: &mut W) -> std::io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No DNS records found.");
    }

    writeln!(out, "DNS records found ({}):", records.len())?;
    writeln!(out, "----------------------------------------")?;
    for record in records {
        writeln!(
            out,
            "{:<20} {:<6} {:<15}",
            display_name(&record.name, domain),
            record.record_type,
            record.content
        )?;
    }
    Ok(())
}

fn qualified_name(provider: &dyn DnsProvider, subdomain: &str) -> Result<String> {
    let name = qualify(subdomain, provider.domain_name());
    validate_record_name(&name).with_context(|| format!("invalid record name: {}", subdomain))?;
    Ok(name)
}

//==============================================================================
// Tests
//==============================================================================
