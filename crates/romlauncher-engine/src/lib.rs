//! Navigation engine for romlauncher.
//!
//! The [`Engine`] ties a [`Catalog`](romlauncher_catalog::Catalog) of the
//! current directory to the favorites index and launch history, and exposes
//! one cursor over whichever of the three is being browsed:
//!
//! - **Files** - directories first, then files, of the current directory
//! - **Favorites** - grouped by directory; headers are never selected
//! - **History** - newest launch first
//!
//! ```rust,ignore
//! use romlauncher_core::LauncherConfig;
//! use romlauncher_engine::{Activation, Direction, Engine};
//! use romlauncher_library::{FavoritesIndex, HistoryLog, SystemClock};
//!
//! let config = LauncherConfig::load_or_default();
//! let favorites = FavoritesIndex::open(&config)?;
//! let history = HistoryLog::open(&config)?;
//! let mut engine = Engine::open(config, favorites, history, SystemClock)?;
//!
//! engine.move_selection(Direction::Next);
//! if let Activation::Launch(path) = engine.enter_selected()? {
//!     engine.record_launch(&path)?;
//! }
//! ```
//!
//! Box art is looked up off the caller's thread by [`BoxArtLoader`].

mod boxart;
mod constants;
mod engine;
mod navigation;
mod state;

pub use boxart::{BoxArt, BoxArtLoader, find_boxart};
pub use constants::{BOXART_EXTENSIONS, BOXART_POLL_INTERVAL_MS};
pub use engine::{Activation, Engine};
pub use navigation::{Direction, NavigationState, Walk};
pub use state::{ActiveView, BrowserMode};
