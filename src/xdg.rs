//! XDG Base Directory support for cli-support
//!
//! Follows the XDG Base Directory Specification:
//! - https://specifications.freedesktop.org/basedir-spec/basedir-spec-latest.html
//!
//! Only the configuration directory is used:
//! - `$XDG_CONFIG_HOME/cli-support/` (default: platform config dir, e.g. `~/.config/cli-support/`)

use std::path::PathBuf;

/// Get the cli-support configuration directory
///
/// Respects XDG_CONFIG_HOME environment variable.
/// Falls back to the platform config directory, then `$HOME/.config/cli-support`.
///
/// # Example
/// ```
/// let config_dir = cli_support::xdg::config_dir();
/// // Unix: ~/.config/cli-support or $XDG_CONFIG_HOME/cli-support
/// ```
pub fn config_dir() -> PathBuf {
    if let Some(xdg_config) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        PathBuf::from(xdg_config).join("cli-support")
    } else if let Some(config) = dirs::config_dir() {
        config.join("cli-support")
    } else if let Some(home) = dirs::home_dir() {
        // XDG spec default: $HOME/.config
        home.join(".config").join("cli-support")
    } else {
        PathBuf::from(".cli-support")
    }
}

/// Get the user-level configuration file
///
/// # Example
/// ```
/// let config_file = cli_support::xdg::config_file();
/// // Unix: ~/.config/cli-support/config.toml
/// ```
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_dir_respects_xdg_env() {
        std::env::set_var("XDG_CONFIG_HOME", "/tmp/test-config");
        let dir = config_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-config/cli-support"));
        std::env::remove_var("XDG_CONFIG_HOME");
    }

    #[test]
    #[serial]
    fn test_config_file() {
        std::env::set_var("XDG_CONFIG_HOME", "/tmp/test-config");
        let file = config_file();
        assert_eq!(file, PathBuf::from("/tmp/test-config/cli-support/config.toml"));
        std::env::remove_var("XDG_CONFIG_HOME");
    }
}
