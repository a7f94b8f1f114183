//! Small helpers for reaching into the host page.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

/// Errors that can occur when talking to the DOM.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// A browser API call returned an error or a global was missing.
    #[error("browser API error: {0}")]
    JsError(String),

    /// No element with the given id exists in the page.
    #[error("no element with id `{0}`")]
    MissingElement(String),

    /// The element exists but is not of the expected kind.
    #[error("element `{id}` is not a {expected}")]
    WrongElement {
        /// Element id.
        id: String,
        /// Expected interface name.
        expected: &'static str,
    },
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// The global `window`.
///
/// # Errors
///
/// Returns [`DomError::JsError`] outside a window context (e.g. in a worker).
pub fn window() -> Result<web_sys::Window, DomError> {
    web_sys::window().ok_or_else(|| DomError::JsError("no global window".into()))
}

/// The page's `document`.
///
/// # Errors
///
/// Returns [`DomError::JsError`] if there is no window or document.
pub fn document() -> Result<web_sys::Document, DomError> {
    window()?
        .document()
        .ok_or_else(|| DomError::JsError("no document".into()))
}

/// Look up an element by id and cast it to `T`.
///
/// # Errors
///
/// Returns [`DomError::MissingElement`] if no element has that id, or
/// [`DomError::WrongElement`] if it is not a `T`.
pub fn element_by_id<T: JsCast>(id: &str) -> Result<T, DomError> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(id.to_owned()))?
        .dyn_into::<T>()
        .map_err(|_| DomError::WrongElement {
            id: id.to_owned(),
            expected: std::any::type_name::<T>(),
        })
}

/// Report a non-user-facing failure on the browser console.
pub fn warn(context: &str, error: &impl std::fmt::Display) {
    web_sys::console::warn_1(&format!("{context}: {error}").into());
}
