//! Conversion from browser `File` objects to staging candidates.
//!
//! Only metadata is read: the `File` itself is kept as the raw handle
//! and handed back untouched at submission time.

use kline_staging::FileMeta;

/// Metadata of a browser file.
///
/// `File.size` is a JS number; sizes beyond 2^53 are not representable
/// in JS anyway, so the float-to-integer conversion is lossless for
/// every real file.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn meta_of(file: &web_sys::File) -> FileMeta {
    FileMeta::new(file.name(), file.size().max(0.0) as u64, file.type_())
}

/// Turn a `FileList` into an ordered batch of staging candidates.
#[must_use]
pub fn candidates(list: &web_sys::FileList) -> Vec<(FileMeta, web_sys::File)> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|file| (meta_of(&file), file))
        .collect()
}
