use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;
use yew::Renderer;

use reactor_web::app::App;
use reactor_web::dom;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document().expect("document");
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

fn render_app() {
    reactor_web::i18n::set_lang("en");
    Renderer::<App>::with_root(ensure_app_root()).render();
}

#[wasm_bindgen_test]
fn skip_link_points_to_main_landmark() {
    render_app();
    let doc = dom::document().expect("document");
    let skip = doc
        .query_selector("a[href='#main']")
        .expect("query skip link")
        .expect("skip link exists");
    let main = doc.get_element_by_id("main").expect("main landmark exists");
    assert_eq!(main.tag_name(), "MAIN");
    assert_eq!(main.get_attribute("role").unwrap_or_default(), "main");
    assert_eq!(skip.get_attribute("href").unwrap_or_default(), "#main");
}

#[wasm_bindgen_test]
fn high_contrast_toggle_sets_html_class() {
    render_app();
    let doc = dom::document().expect("document");
    let html = doc.document_element().expect("document element");
    assert!(!html.class_list().contains("hc"));
    let toggle: HtmlElement = doc
        .get_element_by_id("hc-toggle")
        .expect("toggle exists")
        .dyn_into()
        .expect("cast to element");
    toggle.click();
    assert!(html.class_list().contains("hc"));
}
