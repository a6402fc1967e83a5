//! Favorites and launch history for romlauncher.
//!
//! Both collections hold absolute ROM paths in memory and persist them as
//! paths relative to the library root through a [`LineStore`]:
//!
//! - **Favorites** - an insertion-ordered set, displayed grouped by directory
//! - **History** - one record per ROM, displayed newest first
//!
//! ```rust,ignore
//! use romlauncher_core::LauncherConfig;
//! use romlauncher_library::{FavoritesIndex, HistoryLog, Clock, SystemClock};
//!
//! let config = LauncherConfig::load_or_default();
//! let mut favorites = FavoritesIndex::open(&config)?;
//! favorites.toggle("sdmc:/roms/snes/Super Metroid.sfc")?;
//!
//! for row in favorites.build_grouped_view() {
//!     println!("{}", row.text());
//! }
//!
//! let mut history = HistoryLog::open(&config)?;
//! history.record_launch("sdmc:/roms/snes/Super Metroid.sfc", SystemClock.now());
//! history.persist()?;
//! ```

mod favorites;
mod history;
mod store;

pub use favorites::{
    EMPTY_FAVORITES_MESSAGE, FavoritesIndex, ROOT_GROUP, UNCATEGORIZED_GROUP,
    find_next_selectable, first_selectable,
};
pub use history::{
    Clock, EMPTY_HISTORY_MESSAGE, HistoryLog, HistoryRecord, SystemClock, format_timestamp,
    truncate_chars,
};
pub use store::{FileStore, LineStore};

pub use romlauncher_core::{StoreError, ViewEntry};
