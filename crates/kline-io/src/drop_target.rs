//! Drag-and-drop adapter for the upload region.
//!
//! Files dropped on the region are handed to a callback as a
//! `FileList`; callers feed them into the same staging path the file
//! picker uses. The browser's default "open the dropped file" navigation
//! is suppressed both on the region and on the page body, so a drop
//! that misses the region does not replace the page.
//!
//! Highlighting the region while dragging is left to the component.

use wasm_bindgen::JsCast;

use crate::dom::{self, DomError};
use crate::listener::Listener;

const DRAG_EVENTS: [&str; 4] = ["dragenter", "dragover", "dragleave", "drop"];

/// Drop handling installed on a page region.
///
/// Dropping the value removes every listener it installed.
pub struct DropTarget {
    _listeners: Vec<Listener>,
}

impl DropTarget {
    /// Install drop handling on the element with id `region_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] if the region or page body cannot be found
    /// or a listener cannot be registered.
    pub fn attach(
        region_id: &str,
        mut on_files: impl FnMut(web_sys::FileList) + 'static,
    ) -> Result<Self, DomError> {
        let region = dom::element_by_id::<web_sys::HtmlElement>(region_id)?;
        let body = dom::document()?
            .body()
            .ok_or_else(|| DomError::JsError("no document body".into()))?;

        let mut listeners = Vec::with_capacity(DRAG_EVENTS.len() * 2 + 1);

        // Keep the browser from navigating to a file dropped anywhere.
        for target in [&region, &body] {
            for event_type in DRAG_EVENTS {
                listeners.push(Listener::new(target, event_type, |event| {
                    event.prevent_default();
                })?);
            }
        }

        listeners.push(Listener::new(&region, "drop", move |event| {
            let files = event
                .dyn_ref::<web_sys::DragEvent>()
                .and_then(web_sys::DragEvent::data_transfer)
                .and_then(|transfer| transfer.files());
            if let Some(files) = files.filter(|f| f.length() > 0) {
                on_files(files);
            }
        })?);

        Ok(Self {
            _listeners: listeners,
        })
    }
}
