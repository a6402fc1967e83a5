//! Error types for catalog, persistence and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or navigating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The directory could not be opened or enumerated.
    #[error("Directory unreadable: {path}: {source}")]
    DirectoryUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The selected virtual index does not refer to a directory.
    #[error("Entry {index} is not a directory")]
    NotADirectory { index: usize },
}

impl CatalogError {
    /// Create an unreadable-directory error with path context.
    pub fn unreadable(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::DirectoryUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Whether the underlying failure was a missing directory.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DirectoryUnreadable { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

/// Errors from the line-oriented stores backing favorites and history.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store could not be written. The in-memory state is kept.
    #[error("Failed to persist {path}: {source}")]
    PersistenceWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Create a read error with path context.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a write error with path context.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PersistenceWriteFailed {
            path: path.into(),
            source,
        }
    }
}

/// Errors from loading or validating the launcher configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::LauncherConfig`].
    #[error("Invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but holds unusable values.
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Top-level error for engine operations.
#[derive(Debug, Error)]
pub enum LauncherError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_not_found() {
        let err = CatalogError::unreadable(
            "/roms/missing",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
        assert!(err.to_string().contains("/roms/missing"));
    }

    #[test]
    fn test_store_error_wraps_into_launcher_error() {
        let err: LauncherError = StoreError::write(
            "/data/favorites.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        )
        .into();
        assert!(matches!(
            err,
            LauncherError::Store(StoreError::PersistenceWriteFailed { .. })
        ));
    }
}
