use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlInputElement, Storage, Window};

/// Retrieve the global `window` object, if running in a browser.
///
/// Always `None` off wasm so server-side rendering never touches browser globals.
#[must_use]
pub fn window() -> Option<Window> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::error_1(&JsValue::from(message));
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        log::error!("{message}");
    }
}

/// Current value of the input element that fired `event`.
#[must_use]
pub fn input_value(event: &web_sys::Event) -> Option<String> {
    event
        .target()
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
}

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns an error if the browser window cannot be accessed or `localStorage` is unavailable.
pub fn local_storage() -> Result<Storage, JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("window unavailable"))?
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage unavailable"))
}

/// Seed for the game RNGs drawn from browser entropy.
#[must_use]
pub fn entropy_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        let random = js_sys::Math::random();
        let now = js_sys::Date::now();
        // Mix the raw bits; neither value is NaN.
        random.to_bits() ^ now.to_bits().rotate_left(17)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0x5EED_CAFE
    }
}
