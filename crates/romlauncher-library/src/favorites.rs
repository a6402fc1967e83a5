//! Favorites set with grouped display.

use std::collections::BTreeMap;

use indexmap::IndexSet;

use romlauncher_core::path::{self, PathConverter};
use romlauncher_core::{LauncherConfig, StoreError, ViewEntry};

use crate::store::{FileStore, LineStore};

/// Group key for favorites stored directly in the library root.
pub const ROOT_GROUP: &str = "Root";

/// Group key for favorites that are not under the library root.
pub const UNCATEGORIZED_GROUP: &str = "Uncategorized";

/// Placeholder shown when there are no favorites.
pub const EMPTY_FAVORITES_MESSAGE: &str = "Use the X button to add favorites!";

/// The set of favorited ROMs, held as absolute paths.
///
/// Insertion order is kept so that toggling a path on and back off rewrites
/// the store byte-for-byte.
#[derive(Debug)]
pub struct FavoritesIndex<S = FileStore> {
    store: S,
    converter: PathConverter,
    paths: IndexSet<String>,
}

impl FavoritesIndex<FileStore> {
    /// Load `favorites.txt` from the configured data directory.
    pub fn open(config: &LauncherConfig) -> Result<Self, StoreError> {
        Self::load(
            FileStore::new(config.favorites_path()),
            PathConverter::new(config.library_root.clone()),
        )
    }
}

impl<S: LineStore> FavoritesIndex<S> {
    /// Empty index that persists to `store`.
    pub fn new(store: S, converter: PathConverter) -> Self {
        Self {
            store,
            converter,
            paths: IndexSet::new(),
        }
    }

    /// Read the persisted favorites. Blank lines are skipped.
    pub fn load(store: S, converter: PathConverter) -> Result<Self, StoreError> {
        let lines = store.read_lines()?;
        let mut index = Self::new(store, converter);
        for line in lines.iter().filter(|l| !l.trim().is_empty()) {
            let absolute = index.converter.to_absolute(line);
            index.paths.insert(absolute);
        }
        tracing::info!(count = index.paths.len(), "loaded favorites");
        Ok(index)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Favorited absolute paths in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn converter(&self) -> &PathConverter {
        &self.converter
    }

    /// Add `path` if absent, remove it if present, then persist.
    ///
    /// Returns whether `path` is now a favorite. When the write fails the
    /// in-memory change is kept and goes out with the next successful persist.
    pub fn toggle(&mut self, path: &str) -> Result<bool, StoreError> {
        let added = if self.paths.shift_remove(path) {
            false
        } else {
            self.paths.insert(path.to_string());
            true
        };
        tracing::debug!(path, added, "toggled favorite");
        self.persist()?;
        Ok(added)
    }

    /// Write every favorite as a root-relative path.
    pub fn persist(&self) -> Result<(), StoreError> {
        let lines: Vec<String> = self
            .paths
            .iter()
            .map(|p| self.converter.to_relative(p))
            .collect();
        self.store.write_lines(&lines).inspect_err(|err| {
            tracing::warn!("failed to persist favorites: {err}");
        })
    }

    /// Group key for an absolute path: its root-relative directory.
    pub fn group_key(&self, absolute: &str) -> String {
        match self.converter.strip_root(absolute) {
            Some(relative) => match path::parent(relative) {
                Some(dir) if !dir.is_empty() => dir.to_string(),
                _ => ROOT_GROUP.to_string(),
            },
            None => UNCATEGORIZED_GROUP.to_string(),
        }
    }

    /// Favorites grouped by directory as `[header, rom, rom, header, ...]`.
    ///
    /// Groups are ordered by key and members by file name, both byte-wise.
    /// An empty index yields a single notice row.
    pub fn build_grouped_view(&self) -> Vec<ViewEntry> {
        if self.paths.is_empty() {
            return vec![ViewEntry::Notice {
                message: EMPTY_FAVORITES_MESSAGE.to_string(),
            }];
        }

        let mut groups: BTreeMap<String, Vec<&str>> = BTreeMap::new();
        for absolute in &self.paths {
            groups
                .entry(self.group_key(absolute))
                .or_default()
                .push(absolute.as_str());
        }

        let mut view = Vec::with_capacity(groups.len() + self.paths.len());
        for (key, mut members) in groups {
            members.sort_unstable_by(|a, b| {
                path::file_name(a)
                    .cmp(path::file_name(b))
                    .then_with(|| a.cmp(b))
            });
            view.push(ViewEntry::GroupHeader { key });
            view.extend(members.into_iter().map(|absolute| ViewEntry::Rom {
                label: path::file_name(absolute).to_string(),
                path: absolute.to_string(),
            }));
        }
        view
    }
}

/// Index of the next row after `current` in `direction` that is not a group
/// header, wrapping at both ends.
///
/// Returns `current` when a full cycle finds nothing else to select.
pub fn find_next_selectable(view: &[ViewEntry], current: usize, direction: isize) -> usize {
    let len = view.len();
    if len == 0 || direction == 0 {
        return current;
    }
    let start = current.min(len - 1);
    let step = if direction > 0 { 1 } else { len - 1 };

    let mut index = start;
    for _ in 1..len {
        index = (index + step) % len;
        if !view[index].is_group_header() {
            return index;
        }
    }
    start
}

/// Index of the first row that is not a group header, or 0.
pub fn first_selectable(view: &[ViewEntry]) -> usize {
    view.iter()
        .position(|entry| !entry.is_group_header())
        .unwrap_or(0)
}
