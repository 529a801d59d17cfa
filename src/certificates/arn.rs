//! Identifier derivation from store resource identifiers.
//!
//! Both derivations are string-splitting heuristics kept for compatibility
//! with the identifiers callers already hold. The `-`-split used for issued
//! certificates truncates any identifier whose meaningful portion itself
//! contains a `-`; a format-aware parser can replace these helpers without
//! touching call sites.

/// Tag prefixed to issued-certificate ids, distinguishing them from
/// uploaded-certificate ids in the unified listing.
pub const ISSUED_ID_PREFIX: &str = "acm-";

/// Derive an uploaded-certificate id: the trailing path segment of the
/// store's resource identifier.
pub fn uploaded_certificate_id(arn: &str) -> String {
    arn.rsplit('/').next().unwrap_or(arn).to_string()
}

/// Derive an issued-certificate id: the fixed tag plus the trailing
/// `-`-separated segment of the issuance-request identifier.
pub fn issued_certificate_id(arn: &str) -> String {
    let tail = arn.rsplit('-').next().unwrap_or(arn);
    format!("{}{}", ISSUED_ID_PREFIX, tail)
}
