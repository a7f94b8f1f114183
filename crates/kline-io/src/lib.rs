//! kline-io: Browser I/O and Dioxus component library.
//!
//! Bridges the sans-IO staging model in `kline-staging` to the page:
//! reads file metadata from picker and drop events, shows notices,
//! submits the staged files as a native multipart form, and provides
//! the upload form components.

pub mod components;
pub mod config;
pub mod dom;
pub mod drop_target;
pub mod file;
pub mod form;
pub mod listener;
pub mod notice;
pub mod page;
pub mod scroll;

pub use components::{LoadingPanel, StagedList, SubmitControl, UploadForm};
pub use dom::DomError;
pub use drop_target::DropTarget;
