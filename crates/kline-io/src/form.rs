//! Native multipart submission of the staged files.
//!
//! The upload form is an ordinary `<form method="post"
//! enctype="multipart/form-data">` with a hidden `<input type="file"
//! multiple>`. On submit the staged `File` objects are copied into that
//! input through a `DataTransfer` and the form is submitted natively,
//! so the browser navigates to the server's rendered result page.

use kline_staging::Submission;

use crate::dom::{self, DomError};

/// Attach `submission`'s files to the input `input_id` and submit the
/// form `form_id`.
///
/// `HTMLFormElement.submit()` does not fire a `submit` event, so this
/// can be called from the form's own submit handler.
///
/// # Errors
///
/// Returns a [`DomError`] if either element is missing or a browser API
/// call fails. Nothing has been sent in that case.
pub fn submit_native(
    form_id: &str,
    input_id: &str,
    submission: &Submission<web_sys::File>,
) -> Result<(), DomError> {
    let form = dom::element_by_id::<web_sys::HtmlFormElement>(form_id)?;
    let input = dom::element_by_id::<web_sys::HtmlInputElement>(input_id)?;

    let transfer = web_sys::DataTransfer::new()?;
    let items = transfer.items();
    for file in &submission.handles {
        items.add_with_file(file)?;
    }

    input.set_name(submission.field_name);
    input.set_files(transfer.files().as_ref());
    form.submit()?;
    Ok(())
}
