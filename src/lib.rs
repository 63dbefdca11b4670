// Library interface for cli-support
// Color detection and localization are usable on their own; the remaining
// modules back the `cli-support` binary and integration tests.

pub mod cli_utils;
pub mod color;
pub mod config;
pub mod config_discovery;
pub mod i18n;
pub mod logging;
pub mod xdg;

// Re-export commonly used types
pub use color::{colorize, supports_color, ColorCapability, ColorStyle, Console};
pub use config::SupportConfig;
pub use i18n::{init_localization, LanguageMap, LoadResult, LocalizationLoader, Translator};
