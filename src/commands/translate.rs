use anyhow::Result;
use std::fmt::Display;

use crate::cli::TranslateArgs;

use super::build_loader;

/// Print the translation of one key
///
/// A locale file that fails to load is reported on stderr by the loader; the
/// key then renders untranslated and the command still succeeds.
pub fn run(args: TranslateArgs) -> Result<()> {
    let loader = build_loader(&args.localization)?;
    let result = loader.load();

    let named: Vec<(&str, &dyn Display)> = args
        .args
        .iter()
        .map(|(name, value)| (name.as_str(), value as &dyn Display))
        .collect();

    println!("{}", result.translator.t_with(&args.key, &named));
    Ok(())
}
