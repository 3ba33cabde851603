use serde_json::Value;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LocaleMeta {
    pub code: &'static str,
    pub name: &'static str,
}

const LOCALE_META: &[LocaleMeta] = &[LocaleMeta {
    code: "en",
    name: "English",
}];

const LOCALE_TABLE: &[(&str, &str)] = &[("en", include_str!("../../i18n/en.json"))];

/// Locales shipped with the build.
#[must_use]
pub const fn locales() -> &'static [LocaleMeta] {
    LOCALE_META
}

/// Parse the bundle for `lang`, falling back to English for unknown codes.
pub fn load_translations(lang: &str) -> Option<Value> {
    let bundle = LOCALE_TABLE
        .iter()
        .find_map(|(code, data)| (*code == lang).then_some(*data))
        .unwrap_or(LOCALE_TABLE[0].1);

    serde_json::from_str(bundle).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_locale_falls_back_to_english() {
        let en = load_translations("en").expect("en bundle parses");
        let other = load_translations("xx").expect("fallback parses");
        assert_eq!(en, other);
        assert!(en.get("notice").is_some());
    }
}
