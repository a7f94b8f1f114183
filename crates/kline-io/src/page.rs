//! Page lifecycle hooks.

use wasm_bindgen::JsCast;

use crate::dom::{self, DomError};
use crate::listener::Listener;

/// Call `on_restore` whenever the page is shown again from the
/// browser's back/forward cache.
///
/// After a native form submission the page is frozen mid-upload; going
/// back restores that frozen state instead of reloading, so callers use
/// this to clear the staging list and re-enable the form.
///
/// # Errors
///
/// Returns a [`DomError`] if there is no window or the listener cannot
/// be registered.
pub fn on_restored_from_cache(mut on_restore: impl FnMut() + 'static) -> Result<Listener, DomError> {
    let window = dom::window()?;
    let listener = Listener::new(&window, "pageshow", move |event| {
        let persisted = event
            .dyn_ref::<web_sys::PageTransitionEvent>()
            .is_some_and(web_sys::PageTransitionEvent::persisted);
        if persisted {
            on_restore();
        }
    })?;
    Ok(listener)
}
