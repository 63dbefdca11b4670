use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::i18n::{LanguageMap, DEFAULT_LANG};

/// Complete cli-support configuration (loaded from TOML file)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SupportConfig {
    #[serde(default)]
    pub localization: LocalizationConfig,

    /// Directory of the file this was loaded from; relative paths resolve
    /// against it
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Localization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizationConfig {
    /// Directory holding `<lang>.json` files
    #[serde(default = "default_locales_dir")]
    pub dir: String,

    /// Language used when the system locale is not in the map
    #[serde(default = "default_lang")]
    pub default_lang: String,

    /// Replaces the built-in locale map when present
    #[serde(default)]
    pub languages: Option<LanguageMap>,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            dir: default_locales_dir(),
            default_lang: default_lang(),
            languages: None,
        }
    }
}

fn default_locales_dir() -> String {
    "locales".to_string()
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

impl SupportConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Locale directory, resolved against the config file's directory
    pub fn locales_dir(&self) -> PathBuf {
        self.resolve_path(&self.localization.dir)
    }

    /// Configured language map, or the built-in one
    pub fn language_map(&self) -> LanguageMap {
        self.localization
            .languages
            .clone()
            .unwrap_or_else(LanguageMap::builtin)
    }

    fn resolve_path(&self, value: &str) -> PathBuf {
        let path = PathBuf::from(value);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }

    /// Apply CLI/env overrides (they win over the file)
    pub fn apply_overrides(&mut self, locales_dir: Option<&str>, default_lang: Option<&str>) {
        if let Some(dir) = locales_dir {
            // Overrides are relative to the working directory, not the file
            self.localization.dir = std::path::absolute(dir)
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_else(|_| dir.to_string());
        }
        if let Some(lang) = default_lang {
            self.localization.default_lang = lang.to_string();
        }
    }

    /// Example configuration as TOML string
    pub fn example() -> String {
        let config = SupportConfig {
            localization: LocalizationConfig {
                languages: Some(LanguageMap::builtin()),
                ..LocalizationConfig::default()
            },
            base_dir: None,
        };
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}
