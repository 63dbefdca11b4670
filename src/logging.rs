//! Structured logging for cli-support
//!
//! Library code only emits `tracing` events; the binary installs the
//! subscriber. Events use structured fields so they can be filtered and
//! parsed.
//!
//! # Log Format Conventions
//!
//! - `service`: The component emitting the event ("color", "localization")
//! - `operation`: What it was doing ("detect", "resolve", "load")
//! - `status`: The result status ("success", "error")
//! - `path`: File involved, if any
//!
//! # Examples
//!
//! ```rust
//! use tracing::warn;
//!
//! warn!(
//!     service = "localization",
//!     operation = "load",
//!     status = "error",
//!     path = "locales/en_us.json",
//!     "locale file failed to load"
//! );
//! ```

use std::{fmt as std_fmt, io};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{
    fmt::{self, format::Writer},
    prelude::*,
    EnvFilter,
};

use crate::color::{ansi, Console};

/// Filter applied when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "warn";

/// Formatter that tags every line with "cli-support" instead of the module path
struct PrefixFormatter {
    with_ansi: bool,
}

impl<S, N> FormatEvent<S, N> for PrefixFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std_fmt::Result {
        let meta = event.metadata();

        write!(
            writer,
            "{} ",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.6f%:z")
        )?;

        if self.with_ansi {
            let level_style = match *meta.level() {
                tracing::Level::ERROR => ansi::RED,
                tracing::Level::WARN => ansi::YELLOW,
                tracing::Level::INFO => ansi::GREEN,
                tracing::Level::DEBUG => ansi::BLUE,
                tracing::Level::TRACE => ansi::MAGENTA,
            };
            write!(
                writer,
                "{}{:5}(cli-support){}: ",
                level_style,
                meta.level(),
                ansi::RESET
            )?;
        } else {
            write!(writer, "{:5}(cli-support): ", meta.level())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, colored when the terminal allows it
    Pretty,
    /// Same layout without color (for CI)
    Compact,
    /// JSON lines (for log aggregation systems)
    Json,
}

impl LogFormat {
    /// Parse from `CLI_SUPPORT_LOG_FORMAT`
    pub fn from_env() -> Self {
        Self::parse(
            &std::env::var("CLI_SUPPORT_LOG_FORMAT").unwrap_or_default(),
            std::env::var_os("CI").is_some(),
        )
    }

    fn parse(value: &str, ci: bool) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            "pretty" => Self::Pretty,
            _ => {
                // Default: pretty for dev, compact in CI
                if ci {
                    Self::Compact
                } else {
                    Self::Pretty
                }
            }
        }
    }
}

/// Initialize the global tracing subscriber
///
/// # Environment Variables
///
/// - `RUST_LOG`: Log filter (default "warn")
/// - `CLI_SUPPORT_LOG_FORMAT`: "pretty", "compact" or "json"
/// - `CI`: If set, defaults to compact format
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = match LogFormat::from_env() {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .event_format(PrefixFormatter {
                        with_ansi: Console::stderr().is_enabled(),
                    })
                    .with_writer(io::stderr),
            )
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .event_format(PrefixFormatter { with_ansi: false })
                    .with_writer(io::stderr),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_ansi(false)
                    .with_writer(io::stderr)
                    .json(),
            )
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Service names for consistent logging
pub mod services {
    pub const COLOR: &str = "color";
    pub const LOCALIZATION: &str = "localization";
}

/// Operation names for consistent logging
pub mod operations {
    pub const DETECT: &str = "detect";
    pub const RESOLVE: &str = "resolve";
    pub const LOAD: &str = "load";
}

/// Status values for consistent logging
pub mod status {
    pub const SUCCESS: &str = "success";
    pub const ERROR: &str = "error";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json", false), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON", true), LogFormat::Json);
        assert_eq!(LogFormat::parse("compact", false), LogFormat::Compact);
        assert_eq!(LogFormat::parse("pretty", true), LogFormat::Pretty);
    }

    #[test]
    fn test_log_format_default_depends_on_ci() {
        assert_eq!(LogFormat::parse("", false), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("", true), LogFormat::Compact);
        assert_eq!(LogFormat::parse("bogus", false), LogFormat::Pretty);
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init();
        init();
    }
}
