//! User-facing notices.
//!
//! Staging rejections use the browser's blocking `alert()` so the user
//! sees them before doing anything else. Flash messages rendered by the
//! server (`.alert` elements) remove themselves after a few seconds.

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;

use crate::dom::{self, DomError};

/// How long server flash messages stay visible, in milliseconds.
pub const NOTICE_LIFETIME_MS: u32 = 5_000;

/// CSS selector matching server flash messages.
pub const SERVER_ALERT_SELECTOR: &str = ".alert";

/// Show `message` in a blocking browser dialog.
///
/// Falls back to a console warning if no dialog can be shown.
pub fn blocking_notice(message: &str) {
    let shown = dom::window().and_then(|w| w.alert_with_message(message).map_err(DomError::from));
    if let Err(e) = shown {
        dom::warn(&format!("could not show notice {message:?}"), &e);
    }
}

/// Remove every element matching `selector` from the page.
///
/// Returns how many elements were removed.
///
/// # Errors
///
/// Returns a [`DomError`] if the document is unavailable or the
/// selector is invalid.
pub fn dismiss_all(selector: &str) -> Result<u32, DomError> {
    let nodes = dom::document()?.query_selector_all(selector)?;
    let mut removed = 0;
    for i in 0..nodes.length() {
        if let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) {
            element.remove();
            removed += 1;
        }
    }
    Ok(removed)
}

/// Wait [`NOTICE_LIFETIME_MS`] and then dismiss the server's flash
/// messages.
pub async fn dismiss_server_alerts_later() {
    TimeoutFuture::new(NOTICE_LIFETIME_MS).await;
    if let Err(e) = dismiss_all(SERVER_ALERT_SELECTOR) {
        dom::warn("could not dismiss notices", &e);
    }
}
