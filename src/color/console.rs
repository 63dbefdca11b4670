use std::sync::OnceLock;

use serde::Serialize;

use super::capability::ColorCapability;

/// Raw ANSI SGR sequences
pub mod ansi {
    /// Resets terminal to default color. Always appended after colored text.
    pub const RESET: &str = "\x1b[0m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
}

/// The six output styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorStyle {
    /// Section titles
    Header,
    /// Steps of a multi-step workflow (same color as `Header`)
    Step,
    Ok,
    Warn,
    Error,
    Info,
}

impl ColorStyle {
    pub const ALL: [ColorStyle; 6] = [
        ColorStyle::Header,
        ColorStyle::Step,
        ColorStyle::Ok,
        ColorStyle::Warn,
        ColorStyle::Error,
        ColorStyle::Info,
    ];

    /// ANSI prefix for this style
    pub const fn code(self) -> &'static str {
        match self {
            ColorStyle::Header | ColorStyle::Step => ansi::MAGENTA,
            ColorStyle::Ok => ansi::GREEN,
            ColorStyle::Warn => ansi::YELLOW,
            ColorStyle::Error => ansi::RED,
            ColorStyle::Info => ansi::CYAN,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ColorStyle::Header => "header",
            ColorStyle::Step => "step",
            ColorStyle::Ok => "ok",
            ColorStyle::Warn => "warn",
            ColorStyle::Error => "error",
            ColorStyle::Info => "info",
        }
    }
}

static GLOBAL: OnceLock<Console> = OnceLock::new();
static STDERR: OnceLock<Console> = OnceLock::new();

/// Formats text with ANSI styles when color is enabled
///
/// The enabled flag is fixed at construction. Disabled consoles return text
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Console {
    enabled: bool,
}

impl Console {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn from_capability(capability: ColorCapability) -> Self {
        Self::new(capability.is_enabled())
    }

    /// Process-wide console
    ///
    /// Color capability is detected on the first call and reused for the rest
    /// of the process. Later changes to the environment are not observed.
    pub fn global() -> Console {
        *GLOBAL.get_or_init(|| Console::from_capability(ColorCapability::detect()))
    }

    /// Process-wide console for text written to stderr
    ///
    /// Detected once, like [`Console::global`], but gated on stderr being a
    /// terminal so `2>file` never receives escape sequences.
    pub fn stderr() -> Console {
        *STDERR.get_or_init(|| Console::from_capability(ColorCapability::detect_stderr()))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wrap `text` in the style's prefix and a reset suffix
    pub fn colorize(&self, text: &str, style: ColorStyle) -> String {
        if !self.enabled {
            return text.to_string();
        }
        format!("{}{}{}", style.code(), text, ansi::RESET)
    }

    pub fn header(&self, text: &str) -> String {
        self.colorize(text, ColorStyle::Header)
    }

    pub fn step(&self, text: &str) -> String {
        self.colorize(text, ColorStyle::Step)
    }

    pub fn ok(&self, text: &str) -> String {
        self.colorize(text, ColorStyle::Ok)
    }

    pub fn warn(&self, text: &str) -> String {
        self.colorize(text, ColorStyle::Warn)
    }

    pub fn error(&self, text: &str) -> String {
        self.colorize(text, ColorStyle::Error)
    }

    pub fn info(&self, text: &str) -> String {
        self.colorize(text, ColorStyle::Info)
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::global()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [&str; 4] = ["", "plain", "with \x1b[1m escapes", "naïve ünïcode"];

    #[test]
    fn test_disabled_is_identity() {
        let console = Console::new(false);
        for style in ColorStyle::ALL {
            for text in SAMPLES {
                assert_eq!(console.colorize(text, style), text);
            }
        }
    }

    #[test]
    fn test_enabled_wraps_with_prefix_and_reset() {
        let console = Console::new(true);
        for style in ColorStyle::ALL {
            for text in SAMPLES {
                let out = console.colorize(text, style);
                assert!(out.starts_with(style.code()));
                assert!(out.ends_with(ansi::RESET));
                assert_eq!(
                    &out[style.code().len()..out.len() - ansi::RESET.len()],
                    text
                );
            }
        }
    }

    #[test]
    fn test_named_helpers() {
        let console = Console::new(true);
        assert_eq!(console.header("h"), "\x1b[35mh\x1b[0m");
        assert_eq!(console.step("s"), "\x1b[35ms\x1b[0m");
        assert_eq!(console.ok("o"), "\x1b[32mo\x1b[0m");
        assert_eq!(console.warn("w"), "\x1b[33mw\x1b[0m");
        assert_eq!(console.error("e"), "\x1b[31me\x1b[0m");
        assert_eq!(console.info("i"), "\x1b[36mi\x1b[0m");
    }

    #[test]
    fn test_header_and_step_share_style() {
        assert_eq!(ColorStyle::Header.code(), ColorStyle::Step.code());
    }

    #[test]
    fn test_from_capability() {
        assert!(Console::from_capability(ColorCapability::explicit(true)).is_enabled());
        assert!(!Console::from_capability(ColorCapability::explicit(false)).is_enabled());
    }

    #[test]
    fn test_global_is_stable() {
        assert_eq!(Console::global(), Console::global());
        assert_eq!(Console::stderr(), Console::stderr());
    }
}
