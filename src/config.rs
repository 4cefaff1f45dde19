//! Layered configuration for the roadmap tool.
//!
//! Sources, later ones winning:
//! - Built-in defaults
//! - `.roadmap/settings.toml`, found by walking up from the current directory
//! - Environment variables
//!
//! # Environment Variables
//!
//! Variables are prefixed with `RM_` and use double underscores to separate
//! nested levels:
//! - `RM_SEARCH__LIMIT=25` sets `search.limit`
//! - `RM_STORAGE__BACKGROUND_WRITES=true` sets `storage.background_writes`
//! - `RM_CONTENT_DIR=/srv/roadmap` sets `content_dir`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::content::SEARCH_RESULT_LIMIT;
use crate::storage::DEFAULT_STORAGE_KEY;

/// Directory holding the settings file, relative to the workspace root.
pub const CONFIG_DIR: &str = ".roadmap";
const SETTINGS_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "RM_";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Directory with `tracks.json` and one folder per track
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Where the progress snapshot is kept
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Workspace root directory (where .roadmap is located)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub progress: ProgressConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    /// Name the progress snapshot is stored under
    #[serde(default = "default_storage_key")]
    pub key: String,

    /// Write snapshots from a background thread
    #[serde(default)]
    pub background_writes: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchConfig {
    /// Maximum number of search results shown
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProgressConfig {
    /// Drop progress for content that no longer exists when the store opens
    #[serde(default)]
    pub reconcile_on_load: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Level applied to every target without an override
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target overrides, e.g. `store = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_version() -> u32 {
    1
}
fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("roadmap"))
        .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join("data"))
}
fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}
fn default_search_limit() -> usize {
    SEARCH_RESULT_LIMIT
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            content_dir: default_content_dir(),
            data_dir: default_data_dir(),
            workspace_root: None,
            storage: StorageConfig::default(),
            search: SearchConfig::default(),
            progress: ProgressConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
            background_writes: false,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_search_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

fn env_provider() -> Env {
    // Double underscore becomes a dot; single underscores stay in field names
    Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().replace("__", ".").into())
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(SETTINGS_FILE));

        Self::figment(&config_path)
            .extract()
            .map_err(Box::new)
            .map(|mut settings: Settings| {
                if settings.workspace_root.is_none() {
                    settings.workspace_root = Self::workspace_root();
                }
                settings
            })
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref()).extract().map_err(Box::new)
    }

    fn figment(config_path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            .merge(env_provider())
    }

    /// Find `.roadmap/settings.toml` from the current directory upward
    fn find_workspace_config() -> Option<PathBuf> {
        Self::workspace_root().map(|root| root.join(CONFIG_DIR).join(SETTINGS_FILE))
    }

    /// The nearest ancestor of the current directory containing `.roadmap`
    pub fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        current
            .ancestors()
            .find(|ancestor| ancestor.join(CONFIG_DIR).is_dir())
            .map(Path::to_path_buf)
    }

    /// Check if configuration is properly initialized
    pub fn check_init() -> Result<(), String> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(SETTINGS_FILE));

        if !config_path.exists() {
            return Err("No configuration file found".to_string());
        }

        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| format!("Cannot read configuration file: {e}"))?;
        toml::from_str::<Settings>(&content).map_err(|e| {
            format!(
                "Configuration file is corrupted: {e}\nRun 'roadmap init --force' to regenerate."
            )
        })?;
        Ok(())
    }

    /// `path` as given when absolute, otherwise relative to the workspace root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.workspace_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn content_path(&self) -> PathBuf {
        self.resolve(&self.content_dir)
    }

    pub fn data_path(&self) -> PathBuf {
        self.resolve(&self.data_dir)
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file under the current directory
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = PathBuf::from(CONFIG_DIR).join(SETTINGS_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        let mut settings = Settings::default();
        // Keep data next to the workspace so the file is portable
        settings.data_dir = PathBuf::from(CONFIG_DIR).join("data");
        settings.save(&config_path)?;
        crate::log_event!("config", "initialized", "{}", config_path.display());

        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.version, 1);
        assert_eq!(settings.content_dir, PathBuf::from("content"));
        assert_eq!(settings.storage.key, "aiml-roadmap-progress");
        assert!(!settings.storage.background_writes);
        assert_eq!(settings.search.limit, 10);
        assert!(!settings.progress.reconcile_on_load);
        assert_eq!(settings.logging.default, "warn");
        assert!(settings.data_dir.ends_with("roadmap") || settings.data_dir.ends_with("data"));
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");

        let toml_content = r#"
version = 2
content_dir = "/srv/content"

[search]
limit = 3

[progress]
reconcile_on_load = true

[logging]
default = "info"

[logging.modules]
store = "debug"
"#;
        fs::write(&config_path, toml_content).unwrap();

        let settings = Settings::load_from(&config_path).unwrap();
        assert_eq!(settings.version, 2);
        assert_eq!(settings.content_dir, PathBuf::from("/srv/content"));
        assert_eq!(settings.search.limit, 3);
        assert!(settings.progress.reconcile_on_load);
        assert_eq!(settings.logging.default, "info");
        assert_eq!(settings.logging.modules["store"], "debug");
    }

    #[test]
    fn test_save_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested/settings.toml");

        let mut settings = Settings::default();
        settings.search.limit = 42;
        settings.progress.reconcile_on_load = true;
        settings.save(&config_path).unwrap();

        let loaded = Settings::load_from(&config_path).unwrap();
        assert_eq!(loaded.search.limit, 42);
        assert!(loaded.progress.reconcile_on_load);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[progress]\nreconcile_on_load = true\n").unwrap();

        let settings = Settings::load_from(&config_path).unwrap();
        assert!(settings.progress.reconcile_on_load);
        // Untouched sections keep their defaults
        assert_eq!(settings.version, 1);
        assert_eq!(settings.logging.default, "warn");
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[storage]\nbackground_writes = false\n").unwrap();

        unsafe {
            std::env::set_var("RM_STORAGE__BACKGROUND_WRITES", "true");
        }
        let settings = Settings::load_from(&config_path).unwrap();
        unsafe {
            std::env::remove_var("RM_STORAGE__BACKGROUND_WRITES");
        }

        assert!(settings.storage.background_writes);
    }

    #[test]
    fn test_resolve_relative_to_workspace() {
        let settings = Settings {
            workspace_root: Some(PathBuf::from("/work")),
            content_dir: PathBuf::from("content"),
            data_dir: PathBuf::from("/var/data"),
            ..Settings::default()
        };
        assert_eq!(settings.content_path(), PathBuf::from("/work/content"));
        assert_eq!(settings.data_path(), PathBuf::from("/var/data"));

        let detached = Settings {
            workspace_root: None,
            ..Settings::default()
        };
        assert_eq!(detached.content_path(), PathBuf::from("content"));
    }
}
