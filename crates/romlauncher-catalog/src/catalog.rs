//! Single-directory catalog with a unified virtual index.

use romlauncher_core::path::{self, PathConverter, SEPARATOR};
use romlauncher_core::{CatalogEntry, CatalogError, DEFAULT_MAX_ENTRIES, EntryKind, ViewEntry};

use crate::source::{DirectorySource, FsSource};

/// Sorted listing of one directory.
///
/// Directories occupy virtual indices `0..dir_count`, files follow at
/// `dir_count..dir_count + file_count`. Both sequences are sorted by byte
/// order of the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    path: String,
    directories: Vec<CatalogEntry>,
    files: Vec<CatalogEntry>,
}

impl Catalog {
    /// List `path` from the local filesystem.
    pub fn build(path: impl Into<String>) -> Result<Self, CatalogError> {
        CatalogBuilder::new().build(path)
    }

    /// Create a catalog from already-sorted sequences.
    fn from_parts(path: String, directories: Vec<CatalogEntry>, files: Vec<CatalogEntry>) -> Self {
        Self {
            path,
            directories,
            files,
        }
    }

    /// The directory this catalog lists.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Sorted subdirectories.
    pub fn directories(&self) -> &[CatalogEntry] {
        &self.directories
    }

    /// Sorted files.
    pub fn files(&self) -> &[CatalogEntry] {
        &self.files
    }

    pub fn dir_count(&self) -> usize {
        self.directories.len()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Total number of virtual indices.
    pub fn len(&self) -> usize {
        self.dir_count() + self.file_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Virtual index of the `dir_index`-th directory.
    pub fn virtual_index_of_dir(&self, dir_index: usize) -> usize {
        dir_index
    }

    /// Virtual index of the `file_index`-th file.
    pub fn virtual_index_of_file(&self, file_index: usize) -> usize {
        self.dir_count() + file_index
    }

    /// Entry at a virtual index.
    pub fn entry(&self, virtual_index: usize) -> Option<&CatalogEntry> {
        if virtual_index < self.dir_count() {
            self.directories.get(virtual_index)
        } else {
            self.files.get(virtual_index - self.dir_count())
        }
    }

    /// Absolute path of the entry at a virtual index.
    pub fn entry_path(&self, virtual_index: usize) -> Option<String> {
        self.entry(virtual_index)
            .map(|entry| path::join(&self.path, &entry.name))
    }

    /// All entries in virtual-index order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.directories.iter().chain(self.files.iter())
    }

    /// Rows for the file-browsing view.
    pub fn view_entries(&self) -> Vec<ViewEntry> {
        self.entries()
            .map(|entry| {
                let path = path::join(&self.path, &entry.name);
                match entry.kind {
                    EntryKind::Directory => ViewEntry::Directory {
                        name: entry.name.clone(),
                        path,
                    },
                    EntryKind::File => ViewEntry::Rom {
                        label: entry.name.to_string(),
                        path,
                    },
                }
            })
            .collect()
    }

    /// Path one level into the directory at `virtual_index`.
    pub fn child_path(&self, virtual_index: usize) -> Result<String, CatalogError> {
        if virtual_index >= self.dir_count() {
            return Err(CatalogError::NotADirectory {
                index: virtual_index,
            });
        }
        Ok(path::join(&self.path, &self.directories[virtual_index].name))
    }

    /// Path one level up, or `None` at the library root.
    ///
    /// The root is a floor: a parent outside `root` is never returned.
    pub fn parent_path(&self, root: &str) -> Option<String> {
        if is_same_dir(&self.path, root) {
            return None;
        }
        let trimmed = self.path.strip_suffix(SEPARATOR).unwrap_or(&self.path);
        let parent = path::parent(trimmed)?;
        if is_same_dir(parent, root) {
            return Some(root.to_string());
        }
        PathConverter::new(root).strip_root(parent)?;
        Some(parent.to_string())
    }
}

fn is_same_dir(a: &str, b: &str) -> bool {
    a == b || a.trim_end_matches(SEPARATOR) == b.trim_end_matches(SEPARATOR)
}

/// Builds catalogs from a [`DirectorySource`].
#[derive(Debug, Clone)]
pub struct CatalogBuilder<S = FsSource> {
    source: S,
    max_entries: usize,
}

impl CatalogBuilder<FsSource> {
    /// Builder over the local filesystem.
    pub fn new() -> Self {
        Self::with_source(FsSource)
    }
}

impl Default for CatalogBuilder<FsSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DirectorySource> CatalogBuilder<S> {
    /// Builder over a custom source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }

    /// Cap the number of directories and of files kept per listing.
    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Enumerate and sort the immediate children of `path`.
    pub fn build(&self, path: impl Into<String>) -> Result<Catalog, CatalogError> {
        let path = path.into();
        let children = self.source.read_children(&path)?;

        let mut directories = Vec::new();
        let mut files = Vec::new();
        for (name, kind) in children {
            if name.as_str() == "." || name.as_str() == ".." {
                continue;
            }
            match kind {
                EntryKind::Directory => directories.push(CatalogEntry::directory(name)),
                EntryKind::File => files.push(CatalogEntry::file(name)),
            }
        }

        directories.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        files.sort_unstable_by(|a, b| a.name.cmp(&b.name));

        if directories.len() > self.max_entries || files.len() > self.max_entries {
            tracing::warn!(
                path = %path,
                dirs = directories.len(),
                files = files.len(),
                max = self.max_entries,
                "maximum number of entries reached, listing truncated"
            );
            directories.truncate(self.max_entries);
            files.truncate(self.max_entries);
        }

        tracing::info!(
            path = %path,
            dirs = directories.len(),
            files = files.len(),
            "listed directory"
        );

        Ok(Catalog::from_parts(path, directories, files))
    }

    /// Build the catalog for the directory at `virtual_index` of `catalog`.
    ///
    /// `catalog` is left untouched, so on error the caller still holds a valid
    /// catalog for its current path.
    pub fn navigate_into(&self, catalog: &Catalog, virtual_index: usize) -> Result<Catalog, CatalogError> {
        let child = catalog.child_path(virtual_index)?;
        self.build(child)
    }

    /// Build the catalog for the parent of `catalog`, or `Ok(None)` at `root`.
    pub fn navigate_up(&self, catalog: &Catalog, root: &str) -> Result<Option<Catalog>, CatalogError> {
        match catalog.parent_path(root) {
            Some(parent) => self.build(parent).map(Some),
            None => Ok(None),
        }
    }
}
