pub mod color;
pub mod locale;
pub mod translate;

use anyhow::Result;

use crate::cli::LocalizationArgs;
use cli_support::config_discovery::load_config_with_discovery;
use cli_support::i18n::{FixedLocale, LocalizationLoader};

/// Build a loader from config file, env and CLI flags (flags win)
pub fn build_loader(args: &LocalizationArgs) -> Result<LocalizationLoader> {
    let mut config = load_config_with_discovery(args.config.as_deref())?;
    config.apply_overrides(args.locales_dir.as_deref(), args.default_lang.as_deref());

    let loader = LocalizationLoader::new(config.locales_dir())
        .language_map(config.language_map())
        .default_lang(config.localization.default_lang.clone());

    Ok(match &args.locale {
        Some(locale) => loader.locale_source(FixedLocale::new(locale.clone())),
        None => loader,
    })
}
