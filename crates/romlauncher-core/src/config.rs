//! Launcher configuration types.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Rows shown per page on the launcher screen.
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Number of history records written to disk.
pub const DEFAULT_HISTORY_LIMIT: usize = 25;

/// Maximum characters of a history row.
pub const DEFAULT_DISPLAY_BUDGET: usize = 48;

/// Maximum directories (and, separately, files) listed per directory.
pub const DEFAULT_MAX_ENTRIES: usize = 1024;

/// Configuration for the catalog and navigation engine.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct LauncherConfig {
    /// Top-level content directory; navigation never goes above it.
    #[serde(default = "default_library_root")]
    pub library_root: String,

    /// Directory holding `favorites.txt` and `history.txt`.
    #[builder(default = "default_data_dir()")]
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory holding libretro core binaries.
    #[builder(default = "default_cores_dir()")]
    #[serde(default = "default_cores_dir")]
    pub cores_dir: String,

    /// Directory with box-art images named after ROM stems.
    #[builder(default)]
    #[serde(default)]
    pub boxart_dir: Option<PathBuf>,

    /// Rows per page.
    #[builder(default = "DEFAULT_PAGE_SIZE")]
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// History records kept on disk.
    #[builder(default = "DEFAULT_HISTORY_LIMIT")]
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Character budget for a rendered history row.
    #[builder(default = "DEFAULT_DISPLAY_BUDGET")]
    #[serde(default = "default_display_budget")]
    pub display_budget: usize,

    /// Entry cap per kind when listing a directory.
    #[builder(default = "DEFAULT_MAX_ENTRIES")]
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Extension to core overrides, consulted before the built-in table.
    #[builder(default)]
    #[serde(default)]
    pub core_overrides: BTreeMap<String, String>,
}

fn default_library_root() -> String {
    "sdmc:/roms".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("sdmc:/romlauncher")
}

fn default_cores_dir() -> String {
    "sdmc:/retroarch/cores".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_display_budget() -> usize {
    DEFAULT_DISPLAY_BUDGET
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

impl LauncherConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.library_root {
            Some(ref root) if root.is_empty() => {
                return Err("Library root cannot be empty".to_string());
            }
            None => return Err("Library root is required".to_string()),
            _ => {}
        }
        if self.page_size == Some(0) {
            return Err("Page size must be at least 1".to_string());
        }
        Ok(())
    }
}

impl LauncherConfig {
    /// Create a new config builder.
    pub fn builder() -> LauncherConfigBuilder {
        LauncherConfigBuilder::default()
    }

    /// Create a config for a library root with every other value defaulted.
    pub fn new(library_root: impl Into<String>) -> Self {
        Self {
            library_root: library_root.into(),
            data_dir: default_data_dir(),
            cores_dir: default_cores_dir(),
            boxart_dir: None,
            page_size: DEFAULT_PAGE_SIZE,
            history_limit: DEFAULT_HISTORY_LIMIT,
            display_budget: DEFAULT_DISPLAY_BUDGET,
            max_entries: DEFAULT_MAX_ENTRIES,
            core_overrides: BTreeMap::new(),
        }
    }

    /// Default location of the config file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("romlauncher").join("config.toml"))
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config from the default location, falling back to defaults.
    pub fn load_or_default() -> Self {
        match Self::default_path() {
            Some(path) if path.exists() => match Self::load(&path) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!("Ignoring config {}: {err}", path.display());
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// Check values that serde defaults cannot rule out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.library_root.is_empty() {
            return Err(ConfigError::Invalid {
                message: "library_root cannot be empty".to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid {
                message: "page_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Path of the favorites store.
    pub fn favorites_path(&self) -> PathBuf {
        self.data_dir.join("favorites.txt")
    }

    /// Path of the history store.
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("history.txt")
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self::new(default_library_root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = LauncherConfig::builder()
            .library_root("/mnt/roms")
            .page_size(10usize)
            .data_dir("/tmp/launcher")
            .build()
            .unwrap();

        assert_eq!(config.library_root, "/mnt/roms");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.favorites_path(), PathBuf::from("/tmp/launcher/favorites.txt"));
    }

    #[test]
    fn test_builder_rejects_empty_root() {
        assert!(LauncherConfig::builder().library_root("").build().is_err());
        assert!(LauncherConfig::builder().build().is_err());
    }

    #[test]
    fn test_builder_rejects_zero_page_size() {
        let result = LauncherConfig::builder()
            .library_root("/roms")
            .page_size(0usize)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: LauncherConfig = toml::from_str(
            r#"
            library_root = "/media/roms"
            page_size = 20

            [core_overrides]
            sfc = "bsnes"
            "#,
        )
        .unwrap();

        assert_eq!(config.library_root, "/media/roms");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.history_limit, 25);
        assert_eq!(config.core_overrides.get("sfc").map(String::as_str), Some("bsnes"));
    }

    #[test]
    fn test_load_rejects_zero_page_size() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "library_root = \"/roms\"\npage_size = 0\n").unwrap();

        let err = LauncherConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
