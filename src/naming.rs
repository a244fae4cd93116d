//! Record name normalization
//!
//! Users type bare labels (`www`); Cloudflare stores fully-qualified names
//! (`www.example.com`). Both directions use the same rule: a name belongs to
//! the zone only if it equals the base domain or ends with `"." + domain`.
//! Matching is case-sensitive.

use crate::constants::APEX_LABEL;

/// Turns a user-supplied label into a fully-qualified name under `domain`
///
/// ```
/// use cfdns::naming::qualify;
///
/// assert_eq!(qualify("www", "example.com"), "www.example.com");
/// assert_eq!(qualify("www.example.com", "example.com"), "www.example.com");
/// assert_eq!(qualify("@", "example.com"), "example.com");
/// assert_eq!(qualify("www.example.com.", "example.com"), "www.example.com");
/// assert_eq!(qualify("notexample.com", "example.com"), "notexample.com.example.com");
/// ```
///
/// One trailing dot (FQDN notation) is dropped before the suffix test.
pub fn qualify(label: &str, domain: &str) -> String {
    let label = label.strip_suffix('.').unwrap_or(label);
    if label == APEX_LABEL {
        return domain.to_string();
    }
    if label == domain || is_under(label, domain) {
        return label.to_string();
    }
    format!("{}.{}", label, domain)
}

/// Recovers the label to show for a stored name
///
/// Names outside the zone, and the apex itself, are returned unmodified.
pub fn display_name<'a>(name: &'a str, domain: &str) -> &'a str {
    match name
        .strip_suffix(domain)
        .and_then(|rest| rest.strip_suffix('.'))
    {
        Some(label) if !label.is_empty() => label,
        _ => name,
    }
}

fn is_under(name: &str, domain: &str) -> bool {
    name.strip_suffix(domain)
        .is_some_and(|rest| rest.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = "example.com";

    #[test]
    fn qualify_appends_domain_to_bare_labels() {
        assert_eq!(qualify("www", DOMAIN), "www.example.com");
        assert_eq!(qualify("a.b", DOMAIN), "a.b.example.com");
        assert_eq!(qualify("_acme-challenge", DOMAIN), "_acme-challenge.example.com");
    }

    #[test]
    fn qualify_keeps_names_already_in_zone() {
        assert_eq!(qualify("www.example.com", DOMAIN), "www.example.com");
        assert_eq!(qualify("example.com", DOMAIN), "example.com");
        assert_eq!(qualify("@", DOMAIN), "example.com");
        assert_eq!(qualify(".example.com", DOMAIN), ".example.com");
    }

    #[test]
    fn qualify_drops_one_trailing_dot() {
        assert_eq!(qualify("www.example.com.", DOMAIN), "www.example.com");
        assert_eq!(qualify("example.com.", DOMAIN), "example.com");
        assert_eq!(qualify("www.", DOMAIN), "www.example.com");
    }

    #[test]
    fn qualify_requires_dot_before_domain() {
        assert_eq!(
            qualify("notexample.com", DOMAIN),
            "notexample.com.example.com"
        );
    }

    #[test]
    fn qualify_is_case_sensitive() {
        assert_eq!(qualify("www.EXAMPLE.com", DOMAIN), "www.EXAMPLE.com.example.com");
    }

    #[test]
    fn qualify_is_idempotent() {
        for label in [
            "www",
            "a.b",
            "@",
            "example.com",
            "notexample.com",
            "x.example.com",
            ".example.com",
            "www.example.com.",
        ] {
            let once = qualify(label, DOMAIN);
            assert_eq!(qualify(&once, DOMAIN), once, "label {label}");
        }
    }

    #[test]
    fn display_name_inverts_qualify() {
        for label in ["www", "a.b", "_dmarc", "notexample.com"] {
            assert_eq!(display_name(&qualify(label, DOMAIN), DOMAIN), label);
        }
    }

    #[test]
    fn display_name_leaves_foreign_and_apex_names() {
        assert_eq!(display_name("example.com", DOMAIN), "example.com");
        assert_eq!(display_name("www.other.org", DOMAIN), "www.other.org");
        assert_eq!(display_name("notexample.com", DOMAIN), "notexample.com");
        assert_eq!(display_name(".example.com", DOMAIN), ".example.com");
    }
}
