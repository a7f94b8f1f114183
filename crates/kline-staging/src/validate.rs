//! Candidate validation against a [`ValidationPolicy`].

use crate::list::StagingList;
use crate::types::{FileMeta, StagingError, ValidationPolicy};

/// Check a candidate file against `policy` and the current `list`.
///
/// Checks run in a fixed order and the first failure wins:
///
/// 1. size within `policy.max_size_bytes`
/// 2. MIME type in `policy.allowed_mime_types`
/// 3. no staged file with the same (name, size)
///
/// Pure: neither the list nor the policy is touched.
///
/// # Errors
///
/// Returns [`StagingError::OversizedFile`], [`StagingError::UnsupportedFormat`]
/// or [`StagingError::DuplicateFile`] for the first failing check.
pub fn validate<H>(
    meta: &FileMeta,
    list: &StagingList<H>,
    policy: &ValidationPolicy,
) -> Result<(), StagingError> {
    if !policy.allows_size(meta.size) {
        return Err(StagingError::OversizedFile {
            name: meta.name.clone(),
            size: meta.size,
            limit: policy.max_size_bytes,
        });
    }

    if !policy.allows_mime(&meta.mime_type) {
        return Err(StagingError::UnsupportedFormat {
            name: meta.name.clone(),
            mime_type: meta.mime_type.clone(),
        });
    }

    if list.contains(meta) {
        return Err(StagingError::DuplicateFile {
            name: meta.name.clone(),
        });
    }

    Ok(())
}
