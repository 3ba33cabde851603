// Accessibility helpers

const HIGH_CONTRAST_KEY: &str = "reactor-ops.hc";

/// Id of the polite live region that mirrors game notices.
pub const STATUS_REGION_ID: &str = "ops-status";

/// Focus ring and screen-reader-only utility CSS, injected before first paint.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus{outline:3px solid #00ff00;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Announce a message through the live region.
pub fn set_status(msg: &str) {
    if let Some(node) =
        crate::dom::document().and_then(|doc| doc.get_element_by_id(STATUS_REGION_ID))
    {
        node.set_text_content(Some(msg));
    }
}

/// Toggle the `hc` class on `<html>` and remember the choice.
pub fn set_high_contrast(enabled: bool) {
    if let Some(html) = crate::dom::document().and_then(|doc| doc.document_element()) {
        let _ = if enabled {
            html.class_list().add_1("hc")
        } else {
            html.class_list().remove_1("hc")
        };
    }
    if let Ok(storage) = crate::dom::local_storage() {
        let _ = storage.set_item(HIGH_CONTRAST_KEY, if enabled { "1" } else { "0" });
    }
}

#[must_use]
pub fn high_contrast_enabled() -> bool {
    crate::dom::local_storage()
        .ok()
        .and_then(|storage| storage.get_item(HIGH_CONTRAST_KEY).ok().flatten())
        .is_some_and(|v| v == "1")
}
