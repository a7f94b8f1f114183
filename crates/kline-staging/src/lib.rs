//! kline-staging: Pure file-staging model for chart uploads (sans-IO).
//!
//! Holds the files a user has picked or dropped for analysis, checks
//! each one against a [`ValidationPolicy`], renders the list into row
//! descriptors and hands the final ordered set of raw file handles to
//! the host when the form is submitted.
//!
//! This crate has **no I/O dependencies**. File contents are never
//! read: only name, size and MIME type are inspected. The raw handle
//! type is a generic parameter so the same controller drives the
//! browser (`web_sys::File`, in `kline-io`) and the command line
//! (`PathBuf`, in `kline-preflight`).

pub mod controller;
pub mod list;
pub mod render;
pub mod types;
pub mod validate;

pub use controller::{FILES_FIELD, FileStagingController, Phase, SubmitButton, Submission};
pub use list::StagingList;
pub use render::{RemoveToken, RenderedList, RowDescriptor, format_mib};
pub use types::{
    FileMeta, MIB, StagedFile, StagingError, ValidationPolicy, mime_for_extension,
    mime_for_filename,
};
pub use validate::validate;
