//! Common constants used throughout cfdns

//==============================================================================
// Cloudflare API Constants
//==============================================================================

/// Cloudflare API base URL
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// User agent string for Cloudflare API requests
pub const CLOUDFLARE_USER_AGENT: &str = concat!("cfdns/", env!("CARGO_PKG_VERSION"));

/// Record type used when `--type` is not given
pub const DEFAULT_RECORD_TYPE: &str = "A";

/// TTL value Cloudflare interprets as "automatic"
pub const DNS_TTL_AUTO: u32 = 1;

/// Record types accepted on the command line
pub const SUPPORTED_RECORD_TYPES: &[&str] = &[
    "A", "AAAA", "CAA", "CNAME", "MX", "NS", "PTR", "SRV", "TXT",
];

/// Zone apex shorthand
pub const APEX_LABEL: &str = "@";

//==============================================================================
// HTTP Status Codes
//==============================================================================

/// HTTP status code for unauthorized requests (401)
pub const HTTP_STATUS_UNAUTHORIZED: u16 = 401;

/// HTTP status code for forbidden requests (403)
pub const HTTP_STATUS_FORBIDDEN: u16 = 403;

//==============================================================================
// Validation Constants
//==============================================================================

/// Maximum DNS record name length in characters
pub const MAX_RECORD_NAME_LENGTH: usize = 253;

/// Maximum DNS label length in characters
pub const MAX_LABEL_LENGTH: usize = 63;

//==============================================================================
// Environment Variable Names
//==============================================================================

/// Environment variable name for Cloudflare API token
pub const ENV_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";

/// Environment variable name for Cloudflare zone ID
pub const ENV_ZONE_ID: &str = "CLOUDFLARE_ZONE_ID";

/// Environment variable name for the zone's base domain
pub const ENV_DOMAIN_NAME: &str = "CLOUDFLARE_DOMAIN_NAME";

/// Environment variable name overriding the API base URL
pub const ENV_API_BASE_URL: &str = "CLOUDFLARE_API_BASE_URL";
