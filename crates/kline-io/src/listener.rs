//! Scoped DOM event listeners.
//!
//! A [`Listener`] owns the JS closure registered with
//! `addEventListener` and removes it again when dropped, so listeners
//! installed from a component live exactly as long as the component.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// An event listener registered on a DOM event target.
pub struct Listener {
    target: web_sys::EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    /// Register `callback` for `event_type` on `target`.
    ///
    /// # Errors
    ///
    /// Returns the JS exception if `addEventListener` throws.
    pub fn new(
        target: &web_sys::EventTarget,
        event_type: &'static str,
        callback: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(callback);
        target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event_type,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        // Nothing useful can be done if removal fails during teardown.
        let _ = self.target.remove_event_listener_with_callback(
            self.event_type,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}
