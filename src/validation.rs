//! Validation utilities for cfdns
//!
//! This module checks user-supplied record names, record types and record
//! content before anything is sent to Cloudflare.

use std::net::{Ipv4Addr, Ipv6Addr};

use anyhow::{anyhow, Result};

use crate::constants::{
    APEX_LABEL, MAX_LABEL_LENGTH, MAX_RECORD_NAME_LENGTH, SUPPORTED_RECORD_TYPES,
};

/// Validates that a string is a valid DNS record name
///
/// Names follow RFC 1035 with the usual DNS provider relaxations:
///
/// - at most 253 characters (excluding a trailing dot), labels at most 63
/// - labels are non-empty and cannot start or end with a hyphen
/// - letters, digits, `-` and `_` are allowed; `*` only as a whole label
/// - `@` on its own denotes the zone apex
/// - a single trailing dot (FQDN notation) is accepted
///
/// The name is checked exactly as given: surrounding whitespace is an error,
/// not something to trim, because the caller sends the string unchanged.
///
/// # Examples
///
/// ```
/// use cfdns::validation::validate_record_name;
///
/// assert!(validate_record_name("@").is_ok());
/// assert!(validate_record_name("www").is_ok());
/// assert!(validate_record_name("_acme-challenge.example.com").is_ok());
/// assert!(validate_record_name("*.example.com").is_ok());
///
/// assert!(validate_record_name("").is_err());
/// assert!(validate_record_name("\twww").is_err());
/// assert!(validate_record_name("example..com").is_err());
/// assert!(validate_record_name("ex@mple.com").is_err());
/// ```
pub fn validate_record_name(record_name: &str) -> Result<()> {
    if record_name.trim().is_empty() {
        return Err(anyhow!("Record name cannot be empty"));
    }
    if record_name.trim() != record_name {
        return Err(anyhow!(
            "Record name cannot start or end with whitespace: {:?}",
            record_name
        ));
    }
    if record_name == APEX_LABEL {
        return Ok(());
    }

    let name = record_name.strip_suffix('.').unwrap_or(record_name);
    if name.len() > MAX_RECORD_NAME_LENGTH {
        return Err(anyhow!(
            "Record name too long (max {} characters, got {})",
            MAX_RECORD_NAME_LENGTH,
            name.len()
        ));
    }

    name.split('.')
        .enumerate()
        .try_for_each(|(index, label)| {
            validate_label(label).map_err(|e| anyhow!("{} (label {} of {:?})", e, index + 1, name))
        })
}

fn validate_label(label: &str) -> Result<()> {
    match label {
        "" => Err(anyhow!("Record name contains an empty label")),
        "*" => Ok(()),
        _ if label.len() > MAX_LABEL_LENGTH => Err(anyhow!(
            "Record name label too long (max {} characters, got {})",
            MAX_LABEL_LENGTH,
            label.len()
        )),
        _ if label.starts_with('-') || label.ends_with('-') => {
            Err(anyhow!("Record name label cannot start or end with hyphen"))
        }
        _ => match label
            .chars()
            .find(|ch| !(ch.is_ascii_alphanumeric() || matches!(*ch, '-' | '_')))
        {
            Some(ch) => Err(anyhow!(
                "Record name contains invalid character {:?} (allowed: letters, digits, '-', '_', or a lone '*')",
                ch
            )),
            None => Ok(()),
        },
    }
}

/// Normalizes a record type to upper case and checks it is supported
///
/// Returns the canonical spelling (`"cname"` becomes `"CNAME"`).
pub fn normalize_record_type(record_type: &str) -> Result<String> {
    let normalized = record_type.trim().to_ascii_uppercase();
    if SUPPORTED_RECORD_TYPES.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(anyhow!(
            "Unsupported record type: '{}'. Use one of: {}",
            record_type,
            SUPPORTED_RECORD_TYPES.join(", ")
        ))
    }
}

/// Checks that `content` is plausible for a record of `record_type`
///
/// Only address and alias records are checked structurally; free-form types
/// (TXT, MX, SRV, CAA) just need to be non-empty.
pub fn validate_content(record_type: &str, content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(anyhow!("Record content cannot be empty"));
    }
    match record_type {
        "A" => content
            .parse::<Ipv4Addr>()
            .map(|_| ())
            .map_err(|_| anyhow!("A record content must be an IPv4 address, got: {}", content)),
        "AAAA" => content
            .parse::<Ipv6Addr>()
            .map(|_| ())
            .map_err(|_| anyhow!("AAAA record content must be an IPv6 address, got: {}", content)),
        "CNAME" | "NS" | "PTR" => validate_record_name(content)
            .map_err(|e| anyhow!("{} record content must be a host name: {}", record_type, e)),
        _ => Ok(()),
    }
}
