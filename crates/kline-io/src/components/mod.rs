//! Dioxus UI components for kline-reader.
//!
//! Provides the upload form (drop zone, file picker, staged list and
//! submit control) and its loading indicator.

mod staged_list;
mod submit_control;
mod upload;

pub use staged_list::StagedList;
pub use submit_control::{LoadingPanel, SubmitControl};
pub use upload::{DROP_ZONE_ID, FILES_INPUT_ID, FORM_ID, PICKER_ID, UploadForm};
