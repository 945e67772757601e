//! Application settings and paths.
//!
//! Manages the XDG-compliant configuration directory and the JSON
//! settings file holding sweep defaults. Explicit CLI flags always win
//! over settings values.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Global paths singleton.
static PATHS: OnceLock<Paths> = OnceLock::new();

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/trawl)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Get the global paths instance.
    pub fn get() -> &'static Paths {
        PATHS.get_or_init(|| Self::new().expect("Failed to initialize paths"))
    }

    /// Initialize paths using XDG directories.
    fn new() -> ConfigResult<Self> {
        let project =
            ProjectDirs::from("com", "trawl", "trawl").ok_or(ConfigError::DirectoryNotFound)?;

        let paths = Self {
            config_dir: project.config_dir().to_path_buf(),
        };

        fs::create_dir_all(&paths.config_dir)?;

        Ok(paths)
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Sweep defaults, merged under explicit CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Default port range, as "start-end" or a single port.
    pub default_ports: String,
    /// Default per-attempt timeout in milliseconds.
    pub default_timeout_ms: u64,
    /// Default per-host in-flight connection attempt bound.
    pub default_concurrency: usize,
    /// Default number of candidate addresses swept at once.
    pub default_host_concurrency: usize,
    /// Default host list capacity.
    pub default_max_hosts: usize,
    /// Default connect attempts per second, 0 for unlimited.
    pub default_rate_limit: u32,
    /// Default output format.
    pub default_output_format: String,
    /// Enable verbose output by default.
    pub verbose: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_ports: "1-1024".to_string(),
            default_timeout_ms: 1000,
            default_concurrency: 200,
            default_host_concurrency: 16,
            default_max_hosts: 256,
            default_rate_limit: 0,
            default_output_format: "plain".to_string(),
            verbose: false,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location.
    pub fn load() -> ConfigResult<Self> {
        let paths = Paths::get();
        let file = paths.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Save settings to the default location.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Paths::get().settings_file())
    }

    /// Save settings to a specific file.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.default_ports, "1-1024");
        assert_eq!(settings.default_timeout_ms, 1000);
        assert_eq!(settings.default_concurrency, 200);
        assert_eq!(settings.default_max_hosts, 256);
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("settings.json");

        let mut settings = AppSettings::default();
        settings.default_ports = "22-443".to_string();
        settings.default_rate_limit = 100;
        settings.save_to(&file).unwrap();

        let loaded = AppSettings::load_from(&file).unwrap();
        assert_eq!(loaded.default_ports, "22-443");
        assert_eq!(loaded.default_rate_limit, 100);
    }

    #[test]
    fn test_save_to_unwritable_path() {
        let settings = AppSettings::default();
        let err = settings
            .save_to(Path::new("/nonexistent/settings.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::WriteFailed { .. }));
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("settings.json");
        fs::write(&file, r#"{"default_timeout_ms": 250}"#).unwrap();

        let loaded = AppSettings::load_from(&file).unwrap();
        assert_eq!(loaded.default_timeout_ms, 250);
        assert_eq!(loaded.default_ports, "1-1024");
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("settings.json");
        fs::write(&file, "not json").unwrap();

        let err = AppSettings::load_from(&file).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat(_)));
    }

    #[test]
    fn test_missing_settings_file() {
        let err = AppSettings::load_from(Path::new("/nonexistent/settings.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }
}
