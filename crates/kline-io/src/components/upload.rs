//! Multi-file upload form with drag-and-drop and file picker.

use dioxus::prelude::*;
use kline_staging::{
    FILES_FIELD, FileMeta, FileStagingController, RemoveToken, StagingError, ValidationPolicy,
    format_mib,
};

use super::{LoadingPanel, StagedList, SubmitControl};
use crate::dom;
use crate::drop_target::DropTarget;
use crate::file;
use crate::form;
use crate::listener::Listener;
use crate::notice;
use crate::page;

/// Id of the `<form>` element.
pub const FORM_ID: &str = "kline-upload-form";
/// Id of the drop region.
pub const DROP_ZONE_ID: &str = "kline-drop-zone";
/// Id of the visible file picker.
pub const PICKER_ID: &str = "kline-file-picker";
/// Id of the hidden input that carries the files on submission.
pub const FILES_INPUT_ID: &str = "kline-files";

/// `accept` filter for the file picker.
const ACCEPT: &str = ".png,.jpg,.jpeg,.gif,.bmp,.webp,image/png,image/jpeg,image/gif,image/bmp,image/webp";

/// Props for the [`UploadForm`] component.
#[derive(Props, Clone, PartialEq)]
pub struct UploadFormProps {
    /// URL the form posts to.
    #[props(into)]
    action: String,
    /// Rules every candidate file must pass.
    #[props(default)]
    policy: ValidationPolicy,
}

/// A drop zone, file picker, staged-file list and submit control.
///
/// Files picked or dropped are validated and appended to the staging
/// list; rejections are shown in a blocking notice. On submit the
/// staged files are posted natively as `multipart/form-data` under the
/// `files` field and the page navigates to the server's response.
#[component]
pub fn UploadForm(props: UploadFormProps) -> Element {
    let policy = props.policy.clone();
    let mut controller = use_signal(move || FileStagingController::<web_sys::File>::new(policy));
    let mut dragging = use_signal(|| false);
    let mut drop_target = use_signal(|| Option::<DropTarget>::None);
    let mut restore_listener = use_signal(|| Option::<Listener>::None);

    // Shared by the picker and drop paths so both stage identically.
    let mut stage = move |batch: Vec<(FileMeta, web_sys::File)>| {
        let rejected = controller.write().add_candidates(batch);
        for err in rejected {
            // The form is frozen while the submission is sent.
            if err != StagingError::SubmissionInProgress {
                notice::blocking_notice(&err.to_string());
            }
        }
    };

    // Native listeners need the region in the DOM, so install them
    // after the first render.
    use_effect(move || {
        match DropTarget::attach(DROP_ZONE_ID, move |files| stage(file::candidates(&files))) {
            Ok(target) => drop_target.set(Some(target)),
            Err(e) => dom::warn("drag-and-drop unavailable", &e),
        }
        match page::on_restored_from_cache(move || controller.write().reset()) {
            Ok(listener) => restore_listener.set(Some(listener)),
            Err(e) => dom::warn("page restore handling unavailable", &e),
        }
    });

    let handle_pick = move |_: FormEvent| {
        match dom::element_by_id::<web_sys::HtmlInputElement>(PICKER_ID) {
            Ok(input) => {
                if let Some(files) = input.files() {
                    stage(file::candidates(&files));
                }
                // Clear so picking the same file again still fires `change`.
                input.set_value("");
            }
            Err(e) => dom::warn("file picker unavailable", &e),
        }
    };

    let handle_remove = move |token: RemoveToken| {
        controller.write().remove(token);
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let prepared = controller.write().prepare_submission();
        match prepared {
            Ok(submission) => {
                if let Err(e) = form::submit_native(FORM_ID, FILES_INPUT_ID, &submission) {
                    dom::warn("submission failed", &e);
                    controller.write().abort_submission();
                    notice::blocking_notice("The upload could not be started. Please try again.");
                }
            }
            Err(StagingError::SubmissionInProgress) => {}
            Err(err) => notice::blocking_notice(&err.to_string()),
        }
    };

    let rendered = controller.read().render();
    let button = controller.read().submit_button();
    let busy = button.busy;
    let limit = format_mib(props.policy.max_size_bytes);

    let border_class = if dragging() {
        "border-[var(--border-accent)] bg-[var(--surface-active)]"
    } else {
        "border-[var(--border-muted)] bg-[var(--surface)]"
    };

    rsx! {
        form {
            id: FORM_ID,
            method: "post",
            action: "{props.action}",
            enctype: "multipart/form-data",
            class: "space-y-4",
            onsubmit: handle_submit,

            div {
                id: DROP_ZONE_ID,
                class: "border-2 border-dashed rounded-lg p-6 text-center transition-colors {border_class}",
                ondragenter: move |evt| {
                    evt.prevent_default();
                    dragging.set(true);
                },
                ondragover: move |evt| {
                    evt.prevent_default();
                    dragging.set(true);
                },
                ondragleave: move |_| {
                    dragging.set(false);
                },
                ondrop: move |evt| {
                    evt.prevent_default();
                    dragging.set(false);
                },

                p { class: "text-[var(--text-secondary)] mb-3",
                    "Drop chart images here or "
                }

                label {
                    class: "inline-block px-4 py-2 bg-[var(--btn-primary)] hover:bg-[var(--btn-primary-hover)] rounded cursor-pointer text-white font-medium transition-colors",
                    input {
                        id: PICKER_ID,
                        r#type: "file",
                        multiple: true,
                        accept: ACCEPT,
                        class: "hidden",
                        disabled: busy,
                        onchange: handle_pick,
                    }
                    "Choose Files"
                }

                p { class: "text-[var(--muted)] text-sm mt-2",
                    "PNG, JPEG, GIF, BMP, WebP up to {limit} each"
                }
            }

            // Filled from the staging list right before native submission.
            input {
                id: FILES_INPUT_ID,
                r#type: "file",
                name: FILES_FIELD,
                multiple: true,
                class: "hidden",
            }

            StagedList {
                rendered: rendered,
                disabled: busy,
                on_remove: handle_remove,
            }

            SubmitControl { button: button }

            if busy {
                LoadingPanel {}
            }
        }
    }
}
