use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::{LocaleArgs, OutputFormat};
use cli_support::cli_utils::{prefix, yes_no};
use cli_support::color::Console;

use super::build_loader;

#[derive(Debug, Serialize)]
struct LocaleReport {
    system_locale: String,
    overridden: bool,
    language: String,
    locale_file: PathBuf,
    exists: bool,
}

pub fn run(args: LocaleArgs) -> Result<()> {
    let loader = build_loader(&args.localization)?;
    let system_locale = loader.system_locale();
    let language = loader.resolve_language(&system_locale);
    let locale_file = loader.locale_file(&language);

    let report = LocaleReport {
        exists: locale_file.is_file(),
        overridden: args.localization.locale.is_some(),
        system_locale,
        language,
        locale_file,
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            let console = Console::global();
            let source = if report.overridden { " (--locale)" } else { "" };
            let locale = if report.system_locale.is_empty() {
                "<unset>"
            } else {
                report.system_locale.as_str()
            };
            println!("{} {}", prefix(&console), console.header("Locale"));
            println!("  locale:       {locale}{source}");
            println!("  language:     {}", console.step(&report.language));
            println!("  file:         {}", report.locale_file.display());
            println!("  file exists:  {}", yes_no(&console, report.exists));
        }
    }

    Ok(())
}
