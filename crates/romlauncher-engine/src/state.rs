//! Browsing modes and the view each one shows.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr, IntoEnumIterator};

use romlauncher_core::ViewEntry;

use crate::navigation::Walk;

/// Which collection the user is browsing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, FromRepr, Serialize, Deserialize,
)]
pub enum BrowserMode {
    #[default]
    Files,
    Favorites,
    History,
}

impl BrowserMode {
    /// Move to next mode (cyclic).
    pub fn next(self) -> Self {
        let current = self as usize;
        let next = (current + 1) % Self::iter().count();
        Self::from_repr(next).unwrap_or_default()
    }

    /// Move to previous mode (cyclic).
    pub fn prev(self) -> Self {
        let current = self as usize;
        let count = Self::iter().count();
        let prev = (current + count - 1) % count;
        Self::from_repr(prev).unwrap_or_default()
    }
}

/// The rows currently on screen, tagged by the mode that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "entries", rename_all = "snake_case")]
pub enum ActiveView {
    /// Directories then files of the current catalog.
    FileBrowsing(Vec<ViewEntry>),
    /// Favorites grouped by directory, headers included.
    FavoritesBrowsing(Vec<ViewEntry>),
    /// Launch history, newest first.
    HistoryBrowsing(Vec<ViewEntry>),
}

impl ActiveView {
    pub fn entries(&self) -> &[ViewEntry] {
        match self {
            Self::FileBrowsing(entries)
            | Self::FavoritesBrowsing(entries)
            | Self::HistoryBrowsing(entries) => entries,
        }
    }

    pub fn mode(&self) -> BrowserMode {
        match self {
            Self::FileBrowsing(_) => BrowserMode::Files,
            Self::FavoritesBrowsing(_) => BrowserMode::Favorites,
            Self::HistoryBrowsing(_) => BrowserMode::History,
        }
    }

    /// Cursor walk for this view: favorites skip their group headers.
    pub fn walk(&self) -> Walk<'_> {
        match self {
            Self::FavoritesBrowsing(entries) => Walk::SkipHeaders(entries),
            Self::FileBrowsing(_) | Self::HistoryBrowsing(_) => Walk::Linear,
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
