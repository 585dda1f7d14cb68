//! Cross-domain trust policy for plugin discovery.
//!
//! When a manifest or OpenAPI fetch is redirected, the effective URL must
//! stay within the plugin's root domain: a `www` alias may collapse to its
//! root, and a host may descend into a deeper subdomain of the same
//! lineage, but ascending to a parent domain or hopping to a sibling or
//! foreign domain is disallowed. The same relation also ties a manifest's
//! self-declared URLs back to its hosting origin.

use url::Url;

use crate::{Error, Result};

/// Enforce the root-domain trust policy between a requested URL and the
/// URL the response was actually served from.
///
/// # Errors
///
/// Returns [`Error::ManifestValidation`] when the target ascends to a
/// parent domain (unless the original is a `www` host), swaps to a sibling
/// subdomain, or lands on a different domain entirely.
pub fn validate_redirect(original: &Url, target: &Url) -> Result<()> {
    let original_host = host_of(original)?;
    let target_host = host_of(target)?;

    let original_labels: Vec<&str> = original_host.split('.').collect();
    let target_labels: Vec<&str> = target_host.split('.').collect();
    let is_www = original_host.starts_with("www");

    if original_labels.len() > target_labels.len() && !is_www {
        return Err(Error::validation(
            "redirect to parent level domain is disallowed",
        ));
    }

    if original_labels.len() == target_labels.len()
        && !contains_all(&original_labels, &target_labels)
    {
        if is_www {
            return Err(Error::validation("redirect to another domain is disallowed"));
        }
        return Err(Error::validation(
            "redirect to same level subdomain is disallowed",
        ));
    }

    Ok(())
}

/// Whether two URLs share their second-level domain label (the label
/// immediately left of the top-level domain, e.g. `example` in
/// `example.com`). Single-label hosts require exact host equality. URLs
/// without a host never match.
pub fn is_same_second_domain(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(a), Some(b)) => hosts_share_second_level(a, b),
        _ => false,
    }
}

/// Host-string form of [`is_same_second_domain`], used where only a bare
/// domain is available (e.g. the domain part of a contact email).
pub fn hosts_share_second_level(a: &str, b: &str) -> bool {
    let a_labels: Vec<&str> = a.split('.').collect();
    let b_labels: Vec<&str> = b.split('.').collect();

    if a_labels.len() < 2 || b_labels.len() < 2 {
        return a == b;
    }

    a_labels[a_labels.len() - 2] == b_labels[b_labels.len() - 2]
}

fn host_of(url: &Url) -> Result<&str> {
    url.host_str()
        .ok_or_else(|| Error::validation(format!("URL has no host: {url}")))
}

// Labels are compared by set membership rather than position. This
// tolerates label reordering but is NOT a strict suffix check; the
// looseness is inherited behavior and kept deliberately.
fn contains_all(needles: &[&str], haystack: &[&str]) -> bool {
    needles.iter().all(|label| haystack.contains(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    // ── validate_redirect ─────────────────────────────────────────────

    #[test]
    fn allows_redirect_to_same_domain() {
        let result = validate_redirect(
            &url("https://example.com/.well-known/ai-plugin.json"),
            &url("https://example.com/.well-known/ai-plugin.json"),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn allows_redirect_from_www_to_root_domain() {
        let result = validate_redirect(
            &url("https://www.example.com/.well-known/ai-plugin.json"),
            &url("https://example.com/.well-known/ai-plugin.json"),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn allows_redirect_to_a_deeper_subdomain() {
        let result = validate_redirect(
            &url("https://foo.example.com/.well-known/ai-plugin.json"),
            &url("https://bar.foo.example.com/.well-known/ai-plugin.json"),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn allows_redirect_to_a_deeper_subdomain_with_extended_path() {
        let result = validate_redirect(
            &url("https://foo.example.com/.well-known/ai-plugin.json"),
            &url("https://bar.foo.example.com/baz/.well-known/ai-plugin.json"),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn disallows_redirect_to_parent_level_domain() {
        let result = validate_redirect(
            &url("https://foo.example.com/.well-known/ai-plugin.json"),
            &url("https://example.com/baz/.well-known/ai-plugin.json"),
        );
        assert!(matches!(result, Err(Error::ManifestValidation { .. })));
    }

    #[test]
    fn disallows_redirect_to_same_level_subdomain() {
        let result = validate_redirect(
            &url("https://foo.example.com/.well-known/ai-plugin.json"),
            &url("https://bar.example.com/baz/.well-known/ai-plugin.json"),
        );
        assert!(matches!(result, Err(Error::ManifestValidation { .. })));
    }

    #[test]
    fn disallows_redirect_to_another_domain() {
        let result = validate_redirect(
            &url("https://example.com/.well-known/ai-plugin.json"),
            &url("https://example2.com/.well-known/ai-plugin.json"),
        );
        assert!(matches!(result, Err(Error::ManifestValidation { .. })));
    }

    #[test]
    fn disallows_www_redirect_to_another_domain() {
        // www exempts the parent-domain rule, not the different-domain rule
        let result = validate_redirect(
            &url("https://www.example.com/"),
            &url("https://www.example2.com/"),
        );
        assert!(matches!(result, Err(Error::ManifestValidation { .. })));
    }

    #[test]
    fn rejects_url_without_host() {
        let result = validate_redirect(&url("data:text/plain,hi"), &url("https://example.com/"));
        assert!(result.is_err());
    }

    // ── is_same_second_domain ─────────────────────────────────────────

    #[test]
    fn matches_same_second_level_domain_across_tlds() {
        assert!(is_same_second_domain(
            &url("https://example.com"),
            &url("https://example.org"),
        ));
    }

    #[test]
    fn rejects_different_second_level_domain() {
        assert!(!is_same_second_domain(
            &url("https://example.com"),
            &url("https://example2.org"),
        ));
    }

    #[test]
    fn matches_subdomains_sharing_second_level() {
        assert!(is_same_second_domain(
            &url("https://www.example.com/legal"),
            &url("https://api.example.io"),
        ));
    }

    #[test]
    fn single_label_hosts_require_exact_equality() {
        assert!(hosts_share_second_level("localhost", "localhost"));
        assert!(!hosts_share_second_level("localhost", "otherhost"));
    }

    #[test]
    fn url_without_host_never_matches() {
        assert!(!is_same_second_domain(
            &url("data:text/plain,hi"),
            &url("https://example.com"),
        ));
    }
}
