use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Language code used when the system locale cannot be mapped
pub const DEFAULT_LANG: &str = "en_us";

/// Mapping from locale identifiers to normalized language codes
///
/// Keys may be platform locale names (`English_United States`) or the codes
/// themselves (`en_us`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageMap(BTreeMap<String, String>);

impl LanguageMap {
    /// An empty map; every locale resolves to the default language
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Chinese (simplified and traditional), English, Japanese and Korean
    pub fn builtin() -> Self {
        [
            ("Chinese (Simplified)_China", "zh_cn"),
            ("Chinese (Traditional)_Taiwan", "zh_tw"),
            ("English_United States", "en_us"),
            ("Japanese_Japan", "ja_jp"),
            ("Korean_Korea", "ko_kr"),
            ("zh_cn", "zh_cn"),
            ("zh_tw", "zh_tw"),
            ("en_us", "en_us"),
            ("ja_jp", "ja_jp"),
            ("ko_kr", "ko_kr"),
        ]
        .into_iter()
        .collect()
    }

    pub fn insert(&mut self, locale: impl Into<String>, code: impl Into<String>) {
        self.0.insert(locale.into(), code.into());
    }

    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0.get(locale).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Resolve a locale identifier to a language code
    ///
    /// Tries the identifier as given, then lowercased, then lowercased with
    /// `-` turned into `_` (so BCP-47 tags like `en-US` find `en_us`), then
    /// with any script subtag and encoding suffix dropped (`zh-Hans-CN` and
    /// `ja_JP.UTF-8` find `zh_cn` and `ja_jp`). Falls back to `default_lang`.
    pub fn resolve(&self, locale: &str, default_lang: &str) -> String {
        if let Some(code) = self.get(locale) {
            return code.to_string();
        }

        let lowered = locale.to_lowercase();
        if let Some(code) = self.get(&lowered) {
            return code.to_string();
        }

        let underscored = lowered.replace('-', "_");
        if let Some(code) = self.get(&underscored) {
            return code.to_string();
        }

        if let Some(code) = language_region(&underscored).and_then(|tag| self.get(&tag)) {
            return code.to_string();
        }

        default_lang.to_string()
    }
}

/// `<language>_<region>` from a normalized tag, without script or encoding
///
/// `None` when nothing would be dropped.
fn language_region(tag: &str) -> Option<String> {
    let base = tag.split(['.', '@']).next().unwrap_or(tag);
    let parts: Vec<&str> = base
        .split('_')
        .filter(|part| !(part.len() == 4 && part.chars().all(|c| c.is_ascii_alphabetic())))
        .collect();
    let reduced = parts.join("_");
    (reduced != tag && !reduced.is_empty()).then_some(reduced)
}

impl Default for LanguageMap {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LanguageMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Where the current locale identifier comes from
pub trait LocaleSource: Send + Sync {
    /// The locale identifier, or `None` when the platform reports none
    fn locale(&self) -> Option<String>;
}

/// The operating system's locale, as reported by `sys-locale`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocale;

impl LocaleSource for SystemLocale {
    fn locale(&self) -> Option<String> {
        sys_locale::get_locale()
    }
}

/// A locale fixed up front
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedLocale(Option<String>);

impl FixedLocale {
    pub fn new(locale: impl Into<String>) -> Self {
        Self(Some(locale.into()))
    }

    pub fn unset() -> Self {
        Self(None)
    }
}

impl LocaleSource for FixedLocale {
    fn locale(&self) -> Option<String> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_names_resolve() {
        let map = LanguageMap::builtin();
        assert_eq!(map.resolve("English_United States", DEFAULT_LANG), "en_us");
        assert_eq!(map.resolve("Japanese_Japan", DEFAULT_LANG), "ja_jp");
        assert_eq!(map.resolve("Chinese (Traditional)_Taiwan", DEFAULT_LANG), "zh_tw");
    }

    #[test]
    fn test_case_insensitive_match() {
        let map = LanguageMap::builtin();
        assert_eq!(map.resolve("ZH_CN", DEFAULT_LANG), "zh_cn");
        assert_eq!(map.resolve("Ko_KR", DEFAULT_LANG), "ko_kr");
    }

    #[test]
    fn test_bcp47_tags_match() {
        let map = LanguageMap::builtin();
        assert_eq!(map.resolve("ja-JP", DEFAULT_LANG), "ja_jp");
        assert_eq!(map.resolve("zh-TW", DEFAULT_LANG), "zh_tw");
    }

    #[test]
    fn test_script_subtag_and_encoding_are_dropped() {
        let map = LanguageMap::builtin();
        assert_eq!(map.resolve("zh-Hans-CN", DEFAULT_LANG), "zh_cn");
        assert_eq!(map.resolve("zh-Hant-TW", DEFAULT_LANG), "zh_tw");
        assert_eq!(map.resolve("ja_JP.UTF-8", DEFAULT_LANG), "ja_jp");
        assert_eq!(map.resolve("ko_KR.eucKR@dict", DEFAULT_LANG), "ko_kr");
        // A script alone says nothing about the region
        assert_eq!(map.resolve("zh-Hans", "ko_kr"), "ko_kr");
    }

    #[test]
    fn test_language_region() {
        assert_eq!(language_region("zh_hans_cn").as_deref(), Some("zh_cn"));
        assert_eq!(language_region("en_us.utf_8").as_deref(), Some("en_us"));
        assert_eq!(language_region("en_us"), None);
        assert_eq!(language_region("hans"), None);
    }

    #[test]
    fn test_unmapped_falls_back_to_default() {
        let map = LanguageMap::builtin();
        assert_eq!(map.resolve("fr_FR", DEFAULT_LANG), "en_us");
        assert_eq!(map.resolve("", "ko_kr"), "ko_kr");
        // Lowercasing does not reach platform names
        assert_eq!(map.resolve("english_united states", "zh_cn"), "zh_cn");
    }

    #[test]
    fn test_exact_match_wins_over_lowercase() {
        let map: LanguageMap = [("EN", "upper"), ("en", "lower")].into_iter().collect();
        assert_eq!(map.resolve("EN", "x"), "upper");
        assert_eq!(map.resolve("En", "x"), "lower");
    }

    #[test]
    fn test_empty_map() {
        assert!(LanguageMap::new().is_empty());
        assert_eq!(LanguageMap::new().resolve("en_us", "zh_cn"), "zh_cn");
    }

    #[test]
    fn test_fixed_locale() {
        assert_eq!(FixedLocale::new("ja_JP").locale().as_deref(), Some("ja_JP"));
        assert_eq!(FixedLocale::unset().locale(), None);
    }

    #[test]
    fn test_deserialize_from_toml_table() {
        let map: LanguageMap = toml::from_str("\"Deutsch_Deutschland\" = \"de_de\"").unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.resolve("Deutsch_Deutschland", DEFAULT_LANG), "de_de");
    }
}
