//! Catalog entries and the rows shared by every browsing view.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Kind of a directory child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Subdirectory.
    Directory,
    /// Anything else, including entries whose type could not be determined.
    File,
}

impl EntryKind {
    /// Check if this is a directory.
    pub fn is_dir(self) -> bool {
        matches!(self, EntryKind::Directory)
    }
}

/// A named child of the catalog's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// File or directory name (not full path).
    pub name: CompactString,
    /// Entry kind.
    pub kind: EntryKind,
}

impl CatalogEntry {
    /// Create a directory entry.
    pub fn directory(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }

    /// Create a file entry.
    pub fn file(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

/// One row of a browsing view.
///
/// File browsing produces `Directory` and `Rom` rows, the favorites view
/// interleaves `GroupHeader`s with `Rom`s, and the history view is all `Rom`s.
/// An empty favorites or history view is a single `Notice`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewEntry {
    /// A subdirectory that can be entered.
    Directory { name: CompactString, path: String },
    /// A launchable ROM.
    Rom { label: String, path: String },
    /// A favorites group header.
    GroupHeader { key: String },
    /// Informational placeholder; never launchable.
    Notice { message: String },
}

impl ViewEntry {
    /// Text shown for this row.
    pub fn text(&self) -> String {
        match self {
            Self::Directory { name, .. } => format!("{name}/"),
            Self::Rom { label, .. } => label.clone(),
            Self::GroupHeader { key } => format!("[{key}]"),
            Self::Notice { message } => message.clone(),
        }
    }

    /// Absolute path of a directory or ROM row.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Directory { path, .. } | Self::Rom { path, .. } => Some(path.as_str()),
            Self::GroupHeader { .. } | Self::Notice { .. } => None,
        }
    }

    /// Path of a launchable row.
    pub fn rom_path(&self) -> Option<&str> {
        match self {
            Self::Rom { path, .. } => Some(path.as_str()),
            _ => None,
        }
    }

    /// Check if this row is a group header.
    pub fn is_group_header(&self) -> bool {
        matches!(self, Self::GroupHeader { .. })
    }

    /// Check if this row is the empty-view placeholder.
    pub fn is_notice(&self) -> bool {
        matches!(self, Self::Notice { .. })
    }
}

/// Whether rendered row text denotes a group header: `[` ... `]`.
pub fn is_group_header(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('[') && text.ends_with(']')
}
