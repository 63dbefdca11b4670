//! Terminal color support
//!
//! Decides whether ANSI escape sequences should be written to stdout and
//! wraps text in one of six fixed styles when they should.
//!
//! # Detection order
//!
//! 1. `NO_COLOR` present (any value, empty included): no color
//! 2. `FORCE_COLOR` present: color
//! 3. stdout is not a terminal: no color
//! 4. Windows: color if virtual terminal processing can be enabled
//! 5. Elsewhere: color unless `TERM` is unset, empty or `dumb`
//!
//! Output written to stderr goes through [`Console::stderr`], which applies
//! rule 3 to stderr instead.
//!
//! # Examples
//!
//! ```rust
//! use cli_support::color::{ColorStyle, Console};
//!
//! let console = Console::new(true);
//! assert_eq!(console.ok("done"), "\x1b[32mdone\x1b[0m");
//! assert_eq!(Console::new(false).colorize("done", ColorStyle::Ok), "done");
//! ```

mod capability;
mod console;
mod vt;

pub use capability::{
    native_provider, supports_color_with, ColorCapability, ColorDecision, Environment,
    ProcessEnv, StderrTerminal, TerminalProvider, UnixTerminal, WindowsTerminal, FORCE_COLOR, NO_COLOR, TERM,
};
pub use console::{ansi, ColorStyle, Console};
pub use vt::{enable_windows_vt, VtError, VtStatus};

/// Whether ANSI color should be used on the current stdout
///
/// Runs detection against the process environment every time it is called.
/// Formatting code should use [`Console::global`] instead, which detects once.
pub fn supports_color() -> bool {
    ColorCapability::detect().is_enabled()
}

/// Wrap `text` in `style` using the process-wide console
pub fn colorize(text: &str, style: ColorStyle) -> String {
    Console::global().colorize(text, style)
}
