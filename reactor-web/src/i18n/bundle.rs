use crate::i18n::locales::{load_translations, locales};
use serde_json::Value;
use std::cell::RefCell;

pub struct I18nBundle {
    pub lang: String,
    pub translations: Value,
}

fn build_bundle(lang: &str) -> Option<I18nBundle> {
    let known = locales().iter().any(|meta| meta.code == lang);
    let code = if known { lang } else { "en" };
    Some(I18nBundle {
        lang: code.to_string(),
        translations: load_translations(code)?,
    })
}

fn empty_bundle() -> I18nBundle {
    I18nBundle {
        lang: "en".to_string(),
        translations: Value::Object(serde_json::Map::new()),
    }
}

thread_local! {
    static CURRENT: RefCell<I18nBundle> = RefCell::new(build_bundle("en").unwrap_or_else(empty_bundle));
}

pub(super) fn with_bundle<R>(f: impl FnOnce(&I18nBundle) -> R) -> R {
    CURRENT.with(|cell| f(&cell.borrow()))
}

/// Activate a language and mirror it onto `<html lang>`.
pub fn set_lang(lang: &str) {
    if let Some(bundle) = build_bundle(lang) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|doc| doc.document_element())
            {
                let _ = el.set_attribute("lang", &bundle.lang);
            }
        }
        CURRENT.with(|cell| cell.replace(bundle));
    }
}

#[must_use]
pub fn current_lang() -> String {
    with_bundle(|bundle| bundle.lang.clone())
}
