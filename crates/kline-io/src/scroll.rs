//! Scroll the analysis result into view once the page has settled.

use gloo_timers::future::TimeoutFuture;

use crate::dom;

/// Id of the element the server renders the analysis result into.
pub const RESULT_ID: &str = "analysis-result";

/// Delay before scrolling, giving layout a frame to settle.
pub const SCROLL_DELAY_MS: u32 = 100;

/// Smoothly scroll the element `id` to the top of the viewport.
///
/// Returns `false` if the page has no such element (e.g. before the
/// first submission).
pub fn scroll_into_view(id: &str) -> bool {
    let Ok(element) = dom::element_by_id::<web_sys::Element>(id) else {
        return false;
    };
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    options.set_block(web_sys::ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
    true
}

/// Wait [`SCROLL_DELAY_MS`] and scroll the analysis result into view
/// if the page contains one.
pub async fn scroll_to_result_later() {
    TimeoutFuture::new(SCROLL_DELAY_MS).await;
    scroll_into_view(RESULT_ID);
}
