//! Line-oriented persistence for favorites and history.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use romlauncher_core::StoreError;

/// A whole-file store of text lines.
///
/// Reads return every line of the backing store; writes replace its contents.
pub trait LineStore {
    /// Read all lines. A store that does not exist yet reads as empty.
    fn read_lines(&self) -> Result<Vec<String>, StoreError>;

    /// Replace the store's contents with `lines`, each `\n`-terminated.
    fn write_lines(&self, lines: &[String]) -> Result<(), StoreError>;
}

/// [`LineStore`] backed by a text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineStore for FileStore {
    fn read_lines(&self) -> Result<Vec<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content.lines().map(str::to_owned).collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "store does not exist yet");
                Ok(Vec::new())
            }
            Err(e) => Err(StoreError::read(&self.path, e)),
        }
    }

    fn write_lines(&self, lines: &[String]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::write(&self.path, e))?;
        }

        let capacity = lines.iter().map(|l| l.len() + 1).sum();
        let mut content = String::with_capacity(capacity);
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }

        fs::write(&self.path, content).map_err(|e| StoreError::write(&self.path, e))
    }
}
