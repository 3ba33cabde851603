#[cfg(target_arch = "wasm32")]
use reactor_web::dom;
use reactor_game::{Notice, SequencePhase};
use reactor_web::i18n;
use reactor_web::paths;
use reactor_web::router::Route;
use std::collections::BTreeMap;
use yew_router::Routable;

#[cfg(target_arch = "wasm32")]
#[test]
fn dom_helpers_handle_missing_window() {
    assert!(dom::window().is_some());
    assert!(dom::document().is_some());
}

#[test]
fn i18n_bundle_formats_and_falls_back() {
    i18n::set_lang("en");
    assert_eq!(i18n::current_lang(), "en");

    let mut vars = BTreeMap::new();
    vars.insert("round", "4");
    assert_eq!(i18n::tr("notice.round_complete", Some(&vars)), "Round 4 complete!");
    assert_eq!(i18n::t("missing.key"), "missing.key");

    assert_eq!(i18n::fmt_pct(40), "40%");
    assert_eq!(i18n::fmt_seconds(7), "7s");
}

#[test]
fn unknown_language_stays_english() {
    i18n::set_lang("xx");
    assert_eq!(i18n::current_lang(), "en");
    assert!(i18n::locales().iter().any(|m| m.code == "en"));
}

#[test]
fn every_notice_key_has_copy() {
    i18n::set_lang("en");
    for key in [
        "notice.difficulty",
        "notice.cannot_connect",
        "notice.repeat_sequence",
        "notice.wrong_sequence",
        "notice.round_complete",
        "notice.reactor_stabilized",
        "notice.reactor_breach",
        "notice.warp_stabilized",
        "notice.warp_breach",
        "notice.balance_nodes",
    ] {
        assert_ne!(i18n::notice_text(&Notice::neutral(key)), key, "{key} untranslated");
    }
}

#[test]
fn phases_render_lowercase() {
    assert_eq!(SequencePhase::Playback.to_string(), "playback");
}

#[test]
fn routes_map_to_paths() {
    assert_eq!(Route::Home.to_path(), "/");
    assert_eq!(Route::Console.to_path(), "/console");
    assert!(paths::alarm_url().ends_with(paths::ALARM_ASSET));
}
