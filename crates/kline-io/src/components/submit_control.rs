//! Submit button and in-progress indicator.

use dioxus::prelude::*;
use kline_staging::SubmitButton;

/// Props for the [`SubmitControl`] component.
#[derive(Props, Clone, PartialEq)]
pub struct SubmitControlProps {
    /// Current state of the submit control.
    button: SubmitButton,
}

/// The form's submit button.
///
/// Disabled while nothing is staged; shows a spinner while the upload
/// is in flight.
#[component]
pub fn SubmitControl(props: SubmitControlProps) -> Element {
    let SubmitButton {
        enabled,
        busy,
        label,
    } = props.button;

    let class = if enabled {
        "w-full px-4 py-2 bg-[var(--btn-primary)] hover:bg-[var(--btn-primary-hover)] rounded text-white font-medium transition-colors cursor-pointer"
    } else {
        "w-full px-4 py-2 bg-[var(--btn-disabled)] rounded text-[var(--text-disabled)] cursor-not-allowed"
    };

    rsx! {
        button {
            r#type: "submit",
            class: "{class}",
            disabled: !enabled,
            if busy {
                span {
                    class: "inline-block w-4 h-4 mr-2 align-middle border-2 border-current border-r-transparent rounded-full animate-spin",
                    role: "status",
                }
            }
            "{label}"
        }
    }
}

/// Progress panel shown under the form while the server analyzes the
/// upload. It stays up until the browser navigates to the result.
#[component]
pub fn LoadingPanel() -> Element {
    rsx! {
        div { class: "flex flex-col items-center gap-3 py-6",
            div {
                class: "w-8 h-8 border-4 border-[var(--btn-primary)] border-r-transparent rounded-full animate-spin",
                role: "status",
                span { class: "sr-only", "Loading..." }
            }
            p { class: "text-[var(--text-secondary)] animate-pulse",
                "Analyzing your chart, please wait..."
            }
        }
    }
}
