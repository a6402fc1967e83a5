//! Cursor and page state shared by every browsing view.

use romlauncher_core::ViewEntry;
use romlauncher_library::find_next_selectable;
use serde::{Deserialize, Serialize};

/// Direction of a cursor or page move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    /// Signed step for this direction.
    pub fn step(self) -> isize {
        match self {
            Self::Prev => -1,
            Self::Next => 1,
        }
    }
}

/// How `move_selection` steps through the view.
#[derive(Debug, Clone, Copy)]
pub enum Walk<'a> {
    /// Every row is selectable.
    Linear,
    /// Group headers in the given view are skipped.
    SkipHeaders(&'a [ViewEntry]),
}

/// Selected row and current page of a paginated view.
///
/// A view with no entries is inactive and ignores every move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    selected_index: usize,
    current_page: usize,
    total_pages: usize,
    total_entries: usize,
    page_size: usize,
}

impl NavigationState {
    /// Empty state. A `page_size` of 0 is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            selected_index: 0,
            current_page: 0,
            total_pages: 0,
            total_entries: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn total_entries(&self) -> usize {
        self.total_entries
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Whether there is anything to select.
    pub fn is_active(&self) -> bool {
        self.total_entries > 0
    }

    /// Indices shown on the current page.
    pub fn page_range(&self) -> std::ops::Range<usize> {
        let start = (self.current_page * self.page_size).min(self.total_entries);
        let end = (start + self.page_size).min(self.total_entries);
        start..end
    }

    /// Move the cursor one row, wrapping at both ends.
    pub fn move_selection(&mut self, direction: Direction, walk: Walk<'_>) {
        if !self.is_active() {
            return;
        }
        self.selected_index = match walk {
            Walk::SkipHeaders(view) => {
                find_next_selectable(view, self.selected_index, direction.step())
                    .min(self.total_entries - 1)
            }
            Walk::Linear => {
                let total = self.total_entries;
                match direction {
                    Direction::Next => (self.selected_index + 1) % total,
                    Direction::Prev => (self.selected_index + total - 1) % total,
                }
            }
        };
        self.sync_page();
    }

    /// Move to the previous or next page, wrapping, and select its first row.
    pub fn page_move(&mut self, direction: Direction) {
        if !self.is_active() {
            return;
        }
        let pages = self.total_pages;
        self.current_page = match direction {
            Direction::Next => (self.current_page + 1) % pages,
            Direction::Prev => (self.current_page + pages - 1) % pages,
        };
        self.selected_index = self.current_page * self.page_size;
    }

    /// Adopt a new entry count, clamping the cursor into range.
    pub fn rebuild(&mut self, total_entries: usize) {
        self.total_entries = total_entries;
        self.total_pages = total_entries.div_ceil(self.page_size);
        self.selected_index = self.selected_index.min(total_entries.saturating_sub(1));
        self.sync_page();
    }

    /// Adopt a new entry count with the cursor back on the first row.
    pub fn reset(&mut self, total_entries: usize) {
        self.selected_index = 0;
        self.rebuild(total_entries);
    }

    /// Put the cursor on `index`, clamped into range.
    pub fn select(&mut self, index: usize) {
        self.selected_index = index.min(self.total_entries.saturating_sub(1));
        self.sync_page();
    }

    fn sync_page(&mut self) {
        self.current_page = self.selected_index / self.page_size;
    }
}
