use crate::i18n::tr;
use std::collections::BTreeMap;

/// Whole-percent HUD value, e.g. `42%`.
#[must_use]
pub fn fmt_pct(pct: i32) -> String {
    let value = pct.to_string();
    let mut args = BTreeMap::new();
    args.insert("pct", value.as_str());
    tr("hud.pct", Some(&args))
}

/// Countdown value, e.g. `17s`.
#[must_use]
pub fn fmt_seconds(secs: u32) -> String {
    let value = secs.to_string();
    let mut args = BTreeMap::new();
    args.insert("secs", value.as_str());
    tr("hud.seconds", Some(&args))
}
