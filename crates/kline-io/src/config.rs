//! Upload policy supplied by the host page.
//!
//! The server can override the default [`ValidationPolicy`] (for
//! example to match its own request size limit) by rendering a meta tag:
//!
//! ```html
//! <meta name="kline-upload-policy" content='{"max_size_bytes": 8388608}'>
//! ```
//!
//! Missing fields keep their defaults.

use kline_staging::ValidationPolicy;

use crate::dom::{self, DomError};

/// `name` of the meta tag carrying the policy JSON.
pub const POLICY_META_NAME: &str = "kline-upload-policy";

/// Errors that can occur when reading the page's upload policy.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// The page could not be queried.
    #[error(transparent)]
    Dom(#[from] DomError),

    /// The meta tag content is not a valid policy.
    #[error("invalid upload policy: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read the policy override from the page, if there is one.
///
/// # Errors
///
/// Returns [`PolicyError::Parse`] if the meta tag exists but its
/// content is not valid policy JSON.
pub fn page_policy() -> Result<Option<ValidationPolicy>, PolicyError> {
    let selector = format!("meta[name=\"{POLICY_META_NAME}\"]");
    let Some(meta) = dom::document()?
        .query_selector(&selector)
        .map_err(DomError::from)?
    else {
        return Ok(None);
    };
    let Some(content) = meta.get_attribute("content") else {
        return Ok(None);
    };
    Ok(Some(parse_policy(&content)?))
}

/// Parse policy JSON, filling missing fields from the defaults.
///
/// # Errors
///
/// Returns the JSON error if `json` is not a valid policy.
pub fn parse_policy(json: &str) -> Result<ValidationPolicy, serde_json::Error> {
    serde_json::from_str(json)
}

/// The policy to use on this page: the page's override, or the
/// defaults if there is none or it cannot be read.
#[must_use]
pub fn effective_policy() -> ValidationPolicy {
    match page_policy() {
        Ok(policy) => policy.unwrap_or_default(),
        Err(e) => {
            dom::warn("using default upload policy", &e);
            ValidationPolicy::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn partial_policy_keeps_default_types() {
        let policy = parse_policy(r#"{"max_size_bytes": 8388608}"#).unwrap();
        assert_eq!(policy.max_size_bytes, 8 * 1024 * 1024);
        assert!(policy.allows_mime("image/webp"));
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(parse_policy("{}").unwrap(), ValidationPolicy::default());
    }

    #[test]
    fn malformed_policy_is_rejected() {
        assert!(parse_policy(r#"{"max_size_bytes": "big"}"#).is_err());
        assert!(parse_policy("not json").is_err());
    }
}
