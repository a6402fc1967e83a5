//! Directory enumeration primitive.

use compact_str::CompactString;

use romlauncher_core::{CatalogError, EntryKind};

/// Lists the immediate children of a directory.
pub trait DirectorySource {
    /// Return `(name, kind)` pairs for the children of `path`, in any order.
    fn read_children(&self, path: &str) -> Result<Vec<(CompactString, EntryKind)>, CatalogError>;
}

/// [`DirectorySource`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl DirectorySource for FsSource {
    fn read_children(&self, path: &str) -> Result<Vec<(CompactString, EntryKind)>, CatalogError> {
        let reader = std::fs::read_dir(path).map_err(|e| CatalogError::unreadable(path, e))?;

        let mut children = Vec::new();
        for entry in reader {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::debug!(path, "skipping unreadable entry: {err}");
                    continue;
                }
            };
            let name = CompactString::from(entry.file_name().to_string_lossy());
            // No type hint means a regular file, same as an unknown d_type.
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let kind = if is_dir {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            children.push((name, kind));
        }
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_is_unreadable() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = FsSource
            .read_children(missing.to_str().unwrap())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_classifies_children() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("snes")).unwrap();
        std::fs::write(dir.path().join("a.nes"), b"rom").unwrap();

        let mut children = FsSource.read_children(dir.path().to_str().unwrap()).unwrap();
        children.sort();
        assert_eq!(
            children,
            vec![
                (CompactString::from("a.nes"), EntryKind::File),
                (CompactString::from("snes"), EntryKind::Directory),
            ]
        );
    }
}
