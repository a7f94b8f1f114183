//! The list of staged files with per-row remove controls.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdX;
use kline_staging::{RemoveToken, RenderedList};

/// Props for the [`StagedList`] component.
#[derive(Props, Clone, PartialEq)]
pub struct StagedListProps {
    /// The rendered staging list to draw.
    rendered: RenderedList,
    /// Disables every remove control (while submitting).
    #[props(default)]
    disabled: bool,
    /// Called with the token of the row whose remove control was clicked.
    on_remove: EventHandler<RemoveToken>,
}

/// Draws one row per staged file: name, size and a remove control.
///
/// Renders nothing when the list is empty.
#[component]
pub fn StagedList(props: StagedListProps) -> Element {
    if !props.rendered.visible {
        return rsx! {};
    }

    let count = props.rendered.rows.len();
    let disabled = props.disabled;
    let on_remove = props.on_remove;

    rsx! {
        div { class: "bg-[var(--surface)] rounded p-4 text-left",
            h3 { class: "text-sm font-semibold text-[var(--text-heading)] mb-2",
                "Selected files ({count})"
            }
            ul { class: "divide-y divide-[var(--border-muted)]",
                for row in props.rendered.rows {
                    li {
                        key: "{row.index}-{row.name}",
                        class: "flex items-center gap-3 py-2",
                        span {
                            class: "flex-1 truncate text-[var(--text)]",
                            title: row.title.clone(),
                            "{row.name}"
                        }
                        span { class: "text-sm text-[var(--text-secondary)] tabular-nums",
                            "{row.size_label}"
                        }
                        button {
                            r#type: "button",
                            class: "p-1 rounded text-[var(--text-secondary)] hover:text-[var(--text-error)] disabled:opacity-50",
                            aria_label: "Remove {row.name}",
                            disabled: disabled,
                            onclick: move |_| on_remove.call(row.remove),
                            Icon { width: 16, height: 16, icon: LdX }
                        }
                    }
                }
            }
        }
    }
}
