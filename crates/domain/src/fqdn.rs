//! Canonical domain-name form shared by block-set entries and lookups.
//!
//! Every name is ASCII lower-cased and carries exactly one trailing dot.
//! A stored entry and a query only match when both went through [`fqdn`].

/// Returns the canonical fully-qualified form of `name`.
///
/// `"Ads.Example.com"` and `"ads.example.com."` both become
/// `"ads.example.com."`. The empty name maps to the root, `"."`.
pub fn fqdn(name: &str) -> String {
    let mut canonical = String::with_capacity(name.len() + 1);
    canonical.push_str(name);
    canonical.make_ascii_lowercase();
    if !canonical.ends_with('.') {
        canonical.push('.');
    }
    canonical
}
