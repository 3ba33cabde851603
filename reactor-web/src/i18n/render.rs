use crate::i18n::bundle::with_bundle;
use reactor_game::Notice;
use serde_json::Value;
use std::collections::BTreeMap;

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, k| current.get(k))
}

fn render_value(value: &Value, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = value.as_str()?.to_string();
    if let Some(args_map) = args {
        for (k, v) in args_map {
            text = text.replace(&format!("{{{k}}}"), v);
        }
    }
    Some(text)
}

/// Translate a key to the current language.
///
/// Unknown keys come back unchanged so missing strings stay visible.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate a key, replacing `{name}` placeholders from `args`.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    with_bundle(|bundle| {
        get_nested_value(&bundle.translations, key).and_then(|v| render_value(v, args))
    })
    .unwrap_or_else(|| key.to_string())
}

/// Render a state-machine notice with its arguments.
#[must_use]
pub fn notice_text(notice: &Notice) -> String {
    let args: BTreeMap<&str, &str> = notice
        .args
        .iter()
        .map(|(name, value)| (*name, value.as_str()))
        .collect();
    tr(notice.key, Some(&args))
}
