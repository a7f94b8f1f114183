//! Shared types for the kline-reader file staging model.

use serde::{Deserialize, Serialize};

/// One mebibyte in bytes.
pub const MIB: u64 = 1024 * 1024;

/// Image MIME types accepted for upload.
///
/// `image/jpg` is not a registered type but some platforms report it
/// for `.jpg` files, so it is accepted alongside `image/jpeg`.
pub const DEFAULT_ALLOWED_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/gif",
    "image/bmp",
    "image/webp",
];

/// File extensions accepted for upload, paired with their MIME type.
const EXTENSION_MIME_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
];

/// Map a file extension (without the dot) to its image MIME type.
///
/// Matching is ASCII case-insensitive. Returns `None` for extensions
/// outside the accepted image set.
#[must_use]
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    EXTENSION_MIME_TYPES
        .iter()
        .find(|(e, _)| e.eq_ignore_ascii_case(ext))
        .map(|&(_, mime)| mime)
}

/// Map a file name to its image MIME type using its extension.
#[must_use]
pub fn mime_for_filename(name: &str) -> Option<&'static str> {
    name.rsplit_once('.')
        .and_then(|(_, ext)| mime_for_extension(ext))
}

/// Rules a candidate file must satisfy before it is staged.
///
/// The defaults mirror the server's upload limits. Hosts may load an
/// override from JSON; missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Largest accepted file size in bytes (inclusive).
    pub max_size_bytes: u64,

    /// Accepted MIME types, compared ASCII case-insensitively.
    pub allowed_mime_types: Vec<String>,
}

impl ValidationPolicy {
    /// Default size limit: 16 MiB.
    pub const DEFAULT_MAX_SIZE_BYTES: u64 = 16 * MIB;

    /// Whether `mime_type` is in the accepted set.
    #[must_use]
    pub fn allows_mime(&self, mime_type: &str) -> bool {
        self.allowed_mime_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(mime_type))
    }

    /// Whether `size` is within the size limit.
    #[must_use]
    pub const fn allows_size(&self, size: u64) -> bool {
        size <= self.max_size_bytes
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            max_size_bytes: Self::DEFAULT_MAX_SIZE_BYTES,
            allowed_mime_types: DEFAULT_ALLOWED_MIME_TYPES
                .iter()
                .map(|&m| m.to_owned())
                .collect(),
        }
    }
}

/// Platform-independent metadata of a candidate file.
///
/// Only metadata is ever inspected; file contents are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMeta {
    /// File name as reported by the platform.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type as reported by the platform (may be empty).
    pub mime_type: String,
}

impl FileMeta {
    /// Create metadata for a candidate file.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }

    /// The duplicate-detection key: two files with the same name and
    /// size are treated as the same file.
    #[must_use]
    pub fn key(&self) -> (&str, u64) {
        (&self.name, self.size)
    }
}

/// A file accepted by validation and held until submission.
///
/// `H` is the platform's raw file handle (`web_sys::File` in the
/// browser, a path on the command line). It is opaque to this crate
/// and only handed back at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile<H> {
    meta: FileMeta,
    handle: H,
}

impl<H> StagedFile<H> {
    pub(crate) const fn new(meta: FileMeta, handle: H) -> Self {
        Self { meta, handle }
    }

    /// File metadata.
    #[must_use]
    pub const fn meta(&self) -> &FileMeta {
        &self.meta
    }

    /// File name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.meta.name
    }

    /// Size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.meta.size
    }

    /// MIME type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.meta.mime_type
    }

    /// The raw platform handle.
    #[must_use]
    pub const fn handle(&self) -> &H {
        &self.handle
    }

    /// Consume the staged file and return its raw handle.
    #[must_use]
    pub fn into_handle(self) -> H {
        self.handle
    }
}

/// Errors reported while staging or submitting files.
///
/// All of these are user-input errors: they are shown to the user and
/// never leave the staging list partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StagingError {
    /// The file is larger than the policy's size limit.
    #[error("{name} exceeds the size limit of {}", limit_label(.limit))]
    OversizedFile {
        /// Offending file name.
        name: String,
        /// Actual size in bytes.
        size: u64,
        /// Size limit in bytes.
        limit: u64,
    },

    /// The file's MIME type is not in the accepted set.
    #[error("{name} has an unsupported format; choose a PNG, JPEG, GIF, BMP or WebP image")]
    UnsupportedFormat {
        /// Offending file name.
        name: String,
        /// MIME type reported for the file.
        mime_type: String,
    },

    /// A file with the same name and size is already staged.
    #[error("{name} is already selected")]
    DuplicateFile {
        /// Offending file name.
        name: String,
    },

    /// Submission was attempted with nothing staged.
    #[error("select at least one file")]
    EmptySubmission,

    /// A file was added, or a submission attempted, while a previous
    /// submission is in flight.
    #[error("an analysis is already in progress")]
    SubmissionInProgress,
}

// thiserror hands format arguments over by reference.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn limit_label(limit: &u64) -> String {
    crate::render::format_mib(*limit)
}

impl StagingError {
    /// Stable machine-readable identifier for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::OversizedFile { .. } => "oversized_file",
            Self::UnsupportedFormat { .. } => "unsupported_format",
            Self::DuplicateFile { .. } => "duplicate_file",
            Self::EmptySubmission => "empty_submission",
            Self::SubmissionInProgress => "submission_in_progress",
        }
    }

    /// Name of the offending file, for the per-file error kinds.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::OversizedFile { name, .. }
            | Self::UnsupportedFormat { name, .. }
            | Self::DuplicateFile { name } => Some(name),
            Self::EmptySubmission | Self::SubmissionInProgress => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_sixteen_mib() {
        let policy = ValidationPolicy::default();
        assert_eq!(policy.max_size_bytes, 16_777_216);
        assert!(policy.allows_size(16_777_216));
        assert!(!policy.allows_size(16_777_217));
    }

    #[test]
    fn mime_matching_ignores_case() {
        let policy = ValidationPolicy::default();
        assert!(policy.allows_mime("image/PNG"));
        assert!(policy.allows_mime("image/jpg"));
        assert!(!policy.allows_mime("image/tiff"));
        assert!(!policy.allows_mime(""));
    }

    #[test]
    fn extension_lookup() {
        assert_eq!(mime_for_extension("JPG"), Some("image/jpeg"));
        assert_eq!(mime_for_extension("webp"), Some("image/webp"));
        assert_eq!(mime_for_extension("svg"), None);
        assert_eq!(mime_for_filename("chart.v2.Gif"), Some("image/gif"));
        assert_eq!(mime_for_filename("README"), None);
    }

    #[test]
    fn every_extension_maps_into_default_policy() {
        let policy = ValidationPolicy::default();
        for (ext, mime) in EXTENSION_MIME_TYPES {
            assert!(policy.allows_mime(mime), "{ext} maps to rejected {mime}");
        }
    }

    #[test]
    fn policy_json_falls_back_to_defaults() {
        let policy: ValidationPolicy = serde_json::from_str(r#"{"max_size_bytes": 1024}"#).unwrap();
        assert_eq!(policy.max_size_bytes, 1024);
        assert_eq!(
            policy.allowed_mime_types,
            ValidationPolicy::default().allowed_mime_types
        );
    }

    #[test]
    fn error_messages_name_the_file() {
        let err = StagingError::OversizedFile {
            name: "big.png".into(),
            size: 20 * MIB,
            limit: 16 * MIB,
        };
        assert_eq!(err.to_string(), "big.png exceeds the size limit of 16.00 MB");
        assert_eq!(err.file_name(), Some("big.png"));
        assert_eq!(StagingError::EmptySubmission.file_name(), None);
        assert_eq!(
            StagingError::DuplicateFile { name: "a.png".into() }.to_string(),
            "a.png is already selected"
        );
    }
}
