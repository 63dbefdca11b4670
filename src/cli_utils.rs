/// CLI utilities for consistent output formatting
use crate::color::Console;

/// Get the `[cli-support]` prefix, info-styled when the console has color
pub fn prefix(console: &Console) -> String {
    console.info("[cli-support]")
}

/// Render a yes/no flag in ok/warn style
pub fn yes_no(console: &Console, value: bool) -> String {
    if value {
        console.ok("yes")
    } else {
        console.warn("no")
    }
}
