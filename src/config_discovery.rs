use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::SupportConfig;
use crate::xdg;

/// File names searched for in each directory, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["cli-support.toml", ".cli-support.toml"];

/// Discovers configuration by traversing up the directory tree
///
/// Falls back to the user-level file under the XDG config directory.
pub fn discover_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current = start_dir.to_path_buf();

    loop {
        for name in CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Ok(Some(config_path));
            }
        }

        // Try to go up one level
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    // Fallback to global config
    let global_config = xdg::config_file();
    if global_config.is_file() {
        return Ok(Some(global_config));
    }

    Ok(None)
}

/// Loads configuration with auto-discovery support
///
/// If `explicit_path` is provided, loads config from that path.
/// Otherwise, auto-discovers config by traversing up directory tree from cwd.
///
/// Returns the built-in defaults if no config is found.
pub fn load_config_with_discovery(explicit_path: Option<&str>) -> Result<SupportConfig> {
    if let Some(config_path) = explicit_path {
        return SupportConfig::from_file(config_path);
    }

    let current_dir =
        std::env::current_dir().context("Failed to get current directory for config discovery")?;

    match discover_config(&current_dir)? {
        Some(discovered_path) => {
            tracing::debug!(path = %discovered_path.display(), "using discovered config");
            SupportConfig::from_file(&discovered_path)
        }
        None => {
            tracing::debug!("no configuration file found, using defaults");
            Ok(SupportConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_discover_config_finds_nearest() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::env::set_var("XDG_CONFIG_HOME", root.join("xdg"));

        // Create nested structure
        let project = root.join("project");
        let subdir = project.join("subdir");
        fs::create_dir_all(&subdir).unwrap();

        // Config in root and in project; project is nearer
        fs::write(root.join("cli-support.toml"), "").unwrap();
        let config_path = project.join(".cli-support.toml");
        fs::write(&config_path, "# test config").unwrap();

        let found = discover_config(&subdir).unwrap();
        assert_eq!(found, Some(config_path));
        std::env::remove_var("XDG_CONFIG_HOME");
    }

    #[test]
    #[serial]
    fn test_discover_config_prefers_plain_name() {
        let temp = TempDir::new().unwrap();
        std::env::set_var("XDG_CONFIG_HOME", temp.path().join("xdg"));
        fs::write(temp.path().join("cli-support.toml"), "").unwrap();
        fs::write(temp.path().join(".cli-support.toml"), "").unwrap();

        let found = discover_config(temp.path()).unwrap();
        assert_eq!(found, Some(temp.path().join("cli-support.toml")));
        std::env::remove_var("XDG_CONFIG_HOME");
    }

    #[test]
    #[serial]
    fn test_discover_config_falls_back_to_xdg() {
        let temp = TempDir::new().unwrap();
        let xdg_home = temp.path().join("xdg");
        let global = xdg_home.join("cli-support").join("config.toml");
        fs::create_dir_all(global.parent().unwrap()).unwrap();
        fs::write(&global, "").unwrap();
        std::env::set_var("XDG_CONFIG_HOME", &xdg_home);

        let project = temp.path().join("project");
        fs::create_dir_all(&project).unwrap();

        // Ancestors of the temp dir may hold a stray config; only assert when they don't
        let found = discover_config(&project).unwrap();
        if !temp
            .path()
            .ancestors()
            .any(|dir| CONFIG_FILE_NAMES.iter().any(|n| dir.join(n).is_file()))
        {
            assert_eq!(found, Some(global));
        }
        std::env::remove_var("XDG_CONFIG_HOME");
    }

    #[test]
    fn test_explicit_path_is_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        fs::write(&path, "[localization]\ndefault_lang = \"ja_jp\"\n").unwrap();

        let config = load_config_with_discovery(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.localization.default_lang, "ja_jp");
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.toml");
        assert!(load_config_with_discovery(Some(path.to_str().unwrap())).is_err());
    }
}
