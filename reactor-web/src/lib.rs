#![forbid(unsafe_code)]
//! Browser front-end for the Reactor Ops bridge mini-games.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod app;
pub mod audio;
pub mod components;
pub mod dom;
pub mod driver;
pub mod endpoint;
pub mod i18n;
pub mod logging;
pub mod pages;
pub mod paths;
pub mod router;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    logging::init();
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    crate::i18n::set_lang(&crate::i18n::current_lang());
    if crate::a11y::high_contrast_enabled() {
        crate::a11y::set_high_contrast(true);
    }
    yew::Renderer::<app::App>::new().render();
}
