use std::collections::HashMap;
use std::ffi::OsString;
use std::io::IsTerminal;

use serde::Serialize;
use tracing::debug;

use super::vt;
use crate::logging::{operations, services};

/// Presence alone disables color, even when empty
pub const NO_COLOR: &str = "NO_COLOR";
/// Presence alone forces color unless `NO_COLOR` is also present
pub const FORCE_COLOR: &str = "FORCE_COLOR";
/// Terminal type, consulted on non-Windows platforms only
pub const TERM: &str = "TERM";

/// Read access to environment variables
pub trait Environment {
    fn var_os(&self, key: &str) -> Option<OsString>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

impl Environment for HashMap<String, String> {
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.get(key).map(OsString::from)
    }
}

/// Platform-specific half of color detection
///
/// One implementation exists per platform; [`native_provider`] picks the one
/// matching the build target.
pub trait TerminalProvider {
    /// Short platform label used in diagnostics
    fn name(&self) -> &'static str;

    /// Whether stdout is attached to an interactive terminal
    fn stdout_is_terminal(&self) -> bool;

    /// Whether an interactive stdout will interpret ANSI sequences
    fn ansi_supported(&self, env: &dyn Environment) -> bool;
}

/// Unix-like terminals, gated on `TERM`
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixTerminal;

impl TerminalProvider for UnixTerminal {
    fn name(&self) -> &'static str {
        "unix"
    }

    fn stdout_is_terminal(&self) -> bool {
        std::io::stdout().is_terminal()
    }

    fn ansi_supported(&self, env: &dyn Environment) -> bool {
        match env.var_os(TERM) {
            Some(term) => !term.is_empty() && term != "dumb",
            None => false,
        }
    }
}

/// Windows consoles, gated on virtual terminal processing
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsTerminal;

impl TerminalProvider for WindowsTerminal {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn stdout_is_terminal(&self) -> bool {
        std::io::stdout().is_terminal()
    }

    fn ansi_supported(&self, _env: &dyn Environment) -> bool {
        vt::enable_windows_vt()
    }
}

/// Wraps a provider so the terminal check applies to stderr
///
/// Output written to stderr (diagnostics, log lines) must be gated on stderr,
/// which can be redirected independently of stdout. The `ANSI` check is
/// delegated unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrTerminal<P>(pub P);

impl<P: TerminalProvider> TerminalProvider for StderrTerminal<P> {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn stdout_is_terminal(&self) -> bool {
        std::io::stderr().is_terminal()
    }

    fn ansi_supported(&self, env: &dyn Environment) -> bool {
        self.0.ansi_supported(env)
    }
}

/// The terminal provider for the platform this binary was built for
#[cfg(windows)]
pub fn native_provider() -> WindowsTerminal {
    WindowsTerminal
}

/// The terminal provider for the platform this binary was built for
#[cfg(not(windows))]
pub fn native_provider() -> UnixTerminal {
    UnixTerminal
}

/// Which detection rule settled the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorDecision {
    /// `NO_COLOR` was present
    NoColor,
    /// `FORCE_COLOR` was present
    ForceColor,
    /// stdout is not an interactive terminal
    NotATerminal,
    /// The platform provider decided (`TERM` or virtual terminal processing)
    Platform,
    /// Set explicitly by the caller rather than detected
    Explicit,
}

/// Outcome of color detection
///
/// Computed once and passed by value to whatever needs to format output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCapability {
    enabled: bool,
    decision: ColorDecision,
}

impl ColorCapability {
    /// Detect against the process environment and the native provider
    pub fn detect() -> Self {
        Self::detect_with(&ProcessEnv, &native_provider())
    }

    /// Same rules, with the terminal check made against stderr
    pub fn detect_stderr() -> Self {
        Self::detect_with(&ProcessEnv, &StderrTerminal(native_provider()))
    }

    /// Detect against an arbitrary environment and provider
    pub fn detect_with(env: &dyn Environment, provider: &dyn TerminalProvider) -> Self {
        let capability = if env.var_os(NO_COLOR).is_some() {
            Self::decided(false, ColorDecision::NoColor)
        } else if env.var_os(FORCE_COLOR).is_some() {
            Self::decided(true, ColorDecision::ForceColor)
        } else if !provider.stdout_is_terminal() {
            Self::decided(false, ColorDecision::NotATerminal)
        } else {
            Self::decided(provider.ansi_supported(env), ColorDecision::Platform)
        };

        debug!(
            service = services::COLOR,
            operation = operations::DETECT,
            provider = provider.name(),
            enabled = capability.enabled,
            decision = ?capability.decision,
            "color capability detected"
        );

        capability
    }

    /// A capability fixed by the caller, bypassing detection
    pub const fn explicit(enabled: bool) -> Self {
        Self::decided(enabled, ColorDecision::Explicit)
    }

    const fn decided(enabled: bool, decision: ColorDecision) -> Self {
        Self { enabled, decision }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn decision(&self) -> ColorDecision {
        self.decision
    }
}

/// Rules 1-5 against an arbitrary environment and provider
pub fn supports_color_with(env: &dyn Environment, provider: &dyn TerminalProvider) -> bool {
    ColorCapability::detect_with(env, provider).is_enabled()
}
