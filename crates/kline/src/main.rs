use dioxus::prelude::*;
use kline_io::{UploadForm, config, notice, scroll};

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Mounts the upload form and runs the page conveniences: server flash
/// messages fade out after a few seconds and a freshly rendered
/// analysis result is scrolled into view.
fn app() -> Element {
    // The server may override the default upload limits via a meta tag.
    let policy = use_hook(config::effective_policy);

    use_effect(move || {
        spawn(scroll::scroll_to_result_later());
        spawn(notice::dismiss_server_alerts_later());
    });

    rsx! {
        // Tailwind utilities, compiled by build.rs via npx @tailwindcss/cli.
        style { dangerous_inner_html: include_str!(env!("TAILWIND_CSS_PATH")) }

        div { class: "min-h-screen bg-(--bg) text-(--text) flex flex-col",
            header { class: "px-6 py-4 border-b border-(--border)",
                h1 { class: "text-2xl font-semibold", "AI K-line Reader" }
                p { class: "text-(--muted) text-sm",
                    "Upload candlestick chart screenshots for trend, pattern and support/resistance analysis"
                }
            }

            div { class: "flex-1 w-full max-w-2xl mx-auto p-6",
                UploadForm {
                    action: "/",
                    policy: policy,
                }
            }
        }
    }
}
