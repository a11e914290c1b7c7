use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::Result;
use dirs::config_dir;
use serde::{Deserialize, Serialize};

/// Startup theme selection. The runtime toggle never writes this back, so
/// a restart always returns to the configured default.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Light,
    Dark,
}

/// User-level configuration loaded from `~/.config/tick/config.toml`
/// (platform-specific).
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Override for the data directory holding the task store.
    pub data_dir: Option<PathBuf>,
    /// Theme the TUI starts in; defaults to light.
    pub theme: Option<ThemeChoice>,
}

impl Config {
    /// Whether the TUI should start in dark mode.
    pub fn starts_dark(&self) -> bool {
        self.theme == Some(ThemeChoice::Dark)
    }
}

/// Load config from the default path; if missing, return defaults.
pub fn load() -> Result<Config> {
    let path = default_path()?;
    load_from_path(path)
}

/// Load config from a given path; if missing or empty, return defaults.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    let cfg: Config = toml::from_str(&contents)?;
    Ok(cfg)
}

/// Resolve the default config path (platform aware).
pub fn default_path() -> Result<PathBuf> {
    let base = config_dir().ok_or_else(|| color_eyre::eyre::eyre!("no config dir available"))?;
    Ok(base.join("tick").join("config.toml"))
}

/// Write the given config to the default path, creating parent directories
/// as needed. Existing files are left alone to avoid clobbering user edits.
pub fn write_default_if_missing(config: &Config) -> Result<PathBuf> {
    write_to_path_if_missing(config, default_path()?)
}

fn write_to_path_if_missing(config: &Config, path: PathBuf) -> Result<PathBuf> {
    if path.exists() {
        return Ok(path);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = toml::to_string_pretty(config)?;
    fs::write(&path, body)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_default_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_from_path(dir.path().join("config.toml")).expect("load");
        assert_eq!(cfg, Config::default());
        assert!(!cfg.starts_dark());
    }

    #[test]
    fn parses_custom_config() {
        let contents = r#"
            data_dir = "/tmp/tick-data"
            theme = "dark"
        "#;
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).expect("write temp config");

        let cfg = load_from_path(&path).expect("load");
        assert_eq!(
            cfg,
            Config {
                data_dir: Some(PathBuf::from("/tmp/tick-data")),
                theme: Some(ThemeChoice::Dark),
            }
        );
        assert!(cfg.starts_dark());
    }

    #[test]
    fn empty_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "   \n").expect("write temp config");

        let cfg = load_from_path(&path).expect("load");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn write_default_creates_file_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let cfg = Config {
            data_dir: Some(PathBuf::from("/tmp/tick-data")),
            theme: None,
        };

        write_to_path_if_missing(&cfg, path.clone()).expect("write should succeed");
        let second = write_to_path_if_missing(&cfg, path.clone()).expect("second write ok");
        assert_eq!(second, path);
        let loaded: Config =
            toml::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
        assert_eq!(loaded, cfg);
    }
}
