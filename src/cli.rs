use clap::{Args, Parser, Subcommand, ValueEnum};

/// cli-support - terminal color and localization helpers
///
/// Inspect how color detection and locale resolution behave on this machine,
/// and look up translation keys from the command line.
#[derive(Parser, Debug)]
#[command(name = "cli-support")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal color and localization helpers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report color capability and preview the output styles
    Color(ColorArgs),

    /// Show how the system locale resolves to a language code
    Locale(LocaleArgs),

    /// Translate a key using the current locale
    Translate(TranslateArgs),
}

/// Output format for reports
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Localization arguments shared across commands
#[derive(Args, Debug, Clone)]
pub struct LocalizationArgs {
    /// Config file path
    #[arg(short = 'c', long, env = "CLI_SUPPORT_CONFIG")]
    pub config: Option<String>,

    /// Directory holding <lang>.json files
    #[arg(long, env = "CLI_SUPPORT_LOCALES_DIR")]
    pub locales_dir: Option<String>,

    /// Language used when the system locale is not mapped
    #[arg(long, env = "CLI_SUPPORT_DEFAULT_LANG")]
    pub default_lang: Option<String>,

    /// Use this locale identifier instead of the system locale
    #[arg(long)]
    pub locale: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ColorArgs {
    /// Output format (text, json)
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct LocaleArgs {
    #[command(flatten)]
    pub localization: LocalizationArgs,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct TranslateArgs {
    /// Translation key
    pub key: String,

    /// Placeholder value as name=value (repeatable)
    #[arg(short = 'a', long = "arg", value_parser = parse_key_val)]
    pub args: Vec<(String, String)>,

    #[command(flatten)]
    pub localization: LocalizationArgs,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{s}`"))?;
    if name.is_empty() {
        return Err(format!("missing placeholder name in `{s}`"));
    }
    Ok((name.to_string(), value.to_string()))
}
