//! Key-based localization
//!
//! Maps the system locale to a language code, loads `<dir>/<code>.json` as a
//! flat string table and hands back a [`Translator`] over it.
//!
//! Loading never fails from the caller's point of view. When the locale file
//! is missing or unreadable the translator is empty (every key renders as
//! itself), the attempted path is returned as the error path, and one
//! error-styled line is printed to stderr.
//!
//! A file holding valid JSON that is not an object is the exception: the
//! table is empty but no error path is reported and nothing is printed.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cli_support::i18n::{init_localization, LanguageMap, DEFAULT_LANG};
//! use cli_support::t;
//!
//! let (tr, error_path) = init_localization("locales", &LanguageMap::builtin(), DEFAULT_LANG);
//! if error_path.is_none() {
//!     println!("{}", t!(tr, "greeting", name = "Sam"));
//! }
//! ```

mod error;
mod language;
mod table;
pub mod template;
mod translator;

pub use error::{LocaleError, TemplateError};
pub use language::{FixedLocale, LanguageMap, LocaleSource, SystemLocale, DEFAULT_LANG};
pub use table::StringTable;
pub use translator::Translator;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::color::Console;
use crate::logging::{operations, services, status};

/// Everything produced by one localization load
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub translator: Translator,
    /// System locale identifier as reported, empty when unset
    pub system_locale: String,
    /// Resolved language code
    pub language: String,
    /// The locale file that was attempted
    pub locale_file: PathBuf,
    /// Set to `locale_file` when loading failed
    pub error_path: Option<PathBuf>,
}

impl LoadResult {
    pub fn into_parts(self) -> (Translator, Option<PathBuf>) {
        (self.translator, self.error_path)
    }
}

/// Configurable localization load
///
/// Defaults to the built-in language map, [`DEFAULT_LANG`], the system locale
/// and the process-wide stderr console.
pub struct LocalizationLoader {
    resource_dir: PathBuf,
    language_map: LanguageMap,
    default_lang: String,
    locale_source: Box<dyn LocaleSource>,
    console: Option<Console>,
}

impl LocalizationLoader {
    pub fn new(resource_dir: impl Into<PathBuf>) -> Self {
        Self {
            resource_dir: resource_dir.into(),
            language_map: LanguageMap::builtin(),
            default_lang: DEFAULT_LANG.to_string(),
            locale_source: Box::new(SystemLocale),
            console: None,
        }
    }

    pub fn language_map(mut self, language_map: LanguageMap) -> Self {
        self.language_map = language_map;
        self
    }

    pub fn default_lang(mut self, default_lang: impl Into<String>) -> Self {
        self.default_lang = default_lang.into();
        self
    }

    pub fn locale_source(mut self, source: impl LocaleSource + 'static) -> Self {
        self.locale_source = Box::new(source);
        self
    }

    /// Console used to style the failure diagnostic
    pub fn console(mut self, console: Console) -> Self {
        self.console = Some(console);
        self
    }

    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }

    /// The raw system locale identifier, empty when unset
    pub fn system_locale(&self) -> String {
        self.locale_source.locale().unwrap_or_default()
    }

    /// Language code for a locale identifier
    pub fn resolve_language(&self, locale: &str) -> String {
        self.language_map.resolve(locale, &self.default_lang)
    }

    /// `<resource_dir>/<language>.json`
    pub fn locale_file(&self, language: &str) -> PathBuf {
        self.resource_dir.join(format!("{language}.json"))
    }

    pub fn load(&self) -> LoadResult {
        let system_locale = self.system_locale();
        let language = self.resolve_language(&system_locale);
        let locale_file = self.locale_file(&language);

        debug!(
            service = services::LOCALIZATION,
            operation = operations::RESOLVE,
            system_locale = %system_locale,
            language = %language,
            path = %locale_file.display(),
            "resolved locale"
        );

        match StringTable::load(&locale_file) {
            Ok(table) => LoadResult {
                translator: Translator::new(table),
                system_locale,
                language,
                locale_file,
                error_path: None,
            },
            Err(e) => {
                self.report(&e);
                LoadResult {
                    translator: Translator::empty(),
                    system_locale,
                    language,
                    error_path: Some(locale_file.clone()),
                    locale_file,
                }
            }
        }
    }

    fn report(&self, error: &LocaleError) {
        debug!(
            service = services::LOCALIZATION,
            operation = operations::LOAD,
            status = status::ERROR,
            kind = error.kind(),
            path = %error.path().display(),
            "locale file failed to load"
        );

        let console = self.console.unwrap_or_else(Console::stderr);
        eprintln!("{}", console.error(&format!("[localization] {error}")));
    }
}

/// Load the string table for the current system locale
///
/// Returns the translator and, when loading failed, the path that was tried.
pub fn init_localization(
    resource_dir: impl Into<PathBuf>,
    language_map: &LanguageMap,
    default_lang: &str,
) -> (Translator, Option<PathBuf>) {
    LocalizationLoader::new(resource_dir)
        .language_map(language_map.clone())
        .default_lang(default_lang)
        .load()
        .into_parts()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::t;
    use std::fs;
    use tempfile::TempDir;

    fn loader(dir: &Path, locale: &str) -> LocalizationLoader {
        LocalizationLoader::new(dir)
            .locale_source(FixedLocale::new(locale))
            .console(Console::new(false))
    }

    #[test]
    fn test_loads_table_for_mapped_locale() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("en_us.json"), r#"{"hello": "Hi {name}"}"#).unwrap();

        let result = loader(temp.path(), "English_United States").load();
        assert_eq!(result.language, "en_us");
        assert_eq!(result.locale_file, temp.path().join("en_us.json"));
        assert_eq!(result.error_path, None);

        let tr = result.translator;
        assert_eq!(t!(tr, "hello", name = "Sam"), "Hi Sam");
        assert_eq!(tr.t("missing_key"), "missing_key");
    }

    #[test]
    fn test_missing_argument_leaves_template() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("en_us.json"), r#"{"greet": "Hi {name}"}"#).unwrap();

        let (tr, error_path) = loader(temp.path(), "en_us").load().into_parts();
        assert!(error_path.is_none());
        assert_eq!(tr.t("greet"), "Hi {name}");
    }

    #[test]
    fn test_missing_file_reports_error_path() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("does-not-exist");

        let result = loader(&dir, "Japanese_Japan").load();
        assert_eq!(result.language, "ja_jp");
        assert_eq!(result.error_path, Some(dir.join("ja_jp.json")));
        assert!(result.translator.table().is_empty());
        assert_eq!(result.translator.t("hello"), "hello");
    }

    #[test]
    fn test_malformed_json_reports_error_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("en_us.json");
        fs::write(&path, "{ not json").unwrap();

        let result = loader(temp.path(), "en_us").load();
        assert_eq!(result.error_path, Some(path));
        assert!(result.translator.table().is_empty());
    }

    // Valid JSON with the wrong top-level shape is silently ignored while a
    // missing or malformed file is reported. Kept as-is and pinned here.
    #[test]
    fn test_json_list_is_empty_without_error_path() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("en_us.json"), r#"["hello", "world"]"#).unwrap();

        let result = loader(temp.path(), "en_us").load();
        assert_eq!(result.error_path, None);
        assert!(result.translator.table().is_empty());
        assert_eq!(result.translator.t("hello"), "hello");
    }

    #[test]
    fn test_unmapped_locale_uses_default() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("ko_kr.json"), r#"{"hi": "안녕"}"#).unwrap();

        let result = loader(temp.path(), "fr_FR").default_lang("ko_kr").load();
        assert_eq!(result.language, "ko_kr");
        assert_eq!(result.translator.t("hi"), "안녕");
    }

    #[test]
    fn test_unset_locale_uses_default() {
        let temp = TempDir::new().unwrap();
        let result = LocalizationLoader::new(temp.path())
            .locale_source(FixedLocale::unset())
            .console(Console::new(false))
            .load();
        assert_eq!(result.system_locale, "");
        assert_eq!(result.language, DEFAULT_LANG);
        assert_eq!(result.error_path, Some(temp.path().join("en_us.json")));
    }

    #[test]
    fn test_custom_language_map() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("de_de.json"), r#"{"hi": "Hallo {name}"}"#).unwrap();

        let map: LanguageMap = [("German_Germany", "de_de")].into_iter().collect();
        let result = loader(temp.path(), "German_Germany")
            .language_map(map)
            .load();
        assert_eq!(t!(result.translator, "hi", name = "Sam"), "Hallo Sam");
    }

    #[test]
    fn test_init_localization_with_missing_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nowhere");
        let empty = LanguageMap::new();

        // An empty map always resolves to the default, whatever the system locale
        let (tr, error_path) = init_localization(&dir, &empty, "zh_tw");
        assert_eq!(error_path, Some(dir.join("zh_tw.json")));
        assert_eq!(tr.t("anything"), "anything");
    }
}
