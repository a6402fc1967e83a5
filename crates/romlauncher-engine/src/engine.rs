//! The engine facade driven by a front end.

use romlauncher_catalog::{Catalog, CatalogBuilder, DirectorySource, FsSource};
use romlauncher_core::{LaunchPlan, LauncherConfig, LauncherError, ViewEntry};
use romlauncher_library::{
    Clock, FavoritesIndex, FileStore, HistoryLog, LineStore, SystemClock, find_next_selectable,
    first_selectable,
};

use crate::navigation::{Direction, NavigationState};
use crate::state::{ActiveView, BrowserMode};

/// Outcome of activating the selected row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Entered the directory at this path.
    Entered(String),
    /// The selected ROM should be launched.
    Launch(String),
    /// Headers, notices and empty views do nothing.
    Nothing,
}

/// Browsing state over the catalog, favorites and history.
///
/// Every operation runs to completion on the caller's thread.
pub struct Engine<D = FsSource, S = FileStore, C = SystemClock> {
    config: LauncherConfig,
    builder: CatalogBuilder<D>,
    catalog: Catalog,
    favorites: FavoritesIndex<S>,
    history: HistoryLog<S>,
    clock: C,
    view: ActiveView,
    nav: NavigationState,
    /// File-browsing cursor kept while another mode is shown.
    file_cursor: Option<usize>,
}

impl<S: LineStore, C: Clock> Engine<FsSource, S, C> {
    /// Open the library root from the local filesystem.
    pub fn open(
        config: LauncherConfig,
        favorites: FavoritesIndex<S>,
        history: HistoryLog<S>,
        clock: C,
    ) -> Result<Self, LauncherError> {
        Self::with_source(config, FsSource, favorites, history, clock)
    }
}

impl<D: DirectorySource, S: LineStore, C: Clock> Engine<D, S, C> {
    /// Open the library root from a custom directory source.
    pub fn with_source(
        config: LauncherConfig,
        source: D,
        favorites: FavoritesIndex<S>,
        history: HistoryLog<S>,
        clock: C,
    ) -> Result<Self, LauncherError> {
        let builder = CatalogBuilder::with_source(source).max_entries(config.max_entries);
        let catalog = builder.build(config.library_root.clone())?;
        let view = ActiveView::FileBrowsing(catalog.view_entries());
        let mut nav = NavigationState::new(config.page_size);
        nav.reset(view.len());

        Ok(Self {
            config,
            builder,
            catalog,
            favorites,
            history,
            clock,
            view,
            nav,
            file_cursor: None,
        })
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn favorites(&self) -> &FavoritesIndex<S> {
        &self.favorites
    }

    pub fn history(&self) -> &HistoryLog<S> {
        &self.history
    }

    pub fn current_view(&self) -> &ActiveView {
        &self.view
    }

    pub fn mode(&self) -> BrowserMode {
        self.view.mode()
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    /// Directory shown in file-browsing mode.
    pub fn current_path(&self) -> &str {
        self.catalog.path()
    }

    /// Row under the cursor.
    pub fn selected_entry(&self) -> Option<&ViewEntry> {
        if !self.nav.is_active() {
            return None;
        }
        self.view.entries().get(self.nav.selected_index())
    }

    /// Absolute path of the selected ROM.
    pub fn selected_path(&self) -> Option<&str> {
        self.selected_entry()?.rom_path()
    }

    pub fn move_selection(&mut self, direction: Direction) {
        self.nav.move_selection(direction, self.view.walk());
    }

    pub fn page_move(&mut self, direction: Direction) {
        self.nav.page_move(direction);
        // A page may start on a header; step onto the next ROM.
        if self.selected_entry().is_some_and(ViewEntry::is_group_header) {
            self.move_selection(Direction::Next);
        }
    }

    /// Put the cursor on `index`, clamped into range.
    pub fn select(&mut self, index: usize) {
        self.nav.select(index);
    }

    /// Switch to `mode`, rebuilding its view.
    ///
    /// The file-browsing cursor survives a trip through the other modes.
    /// Selecting the mode already shown does nothing; use [`reload`](Self::reload)
    /// to rebuild it.
    pub fn set_mode(&mut self, mode: BrowserMode) {
        let previous = self.mode();
        if mode == previous {
            return;
        }
        if previous == BrowserMode::Files {
            self.file_cursor = Some(self.nav.selected_index());
        }

        self.view = self.build_view(mode);
        self.nav.reset(self.view.len());
        match mode {
            BrowserMode::Files => {
                if let Some(cursor) = self.file_cursor.take() {
                    self.nav.select(cursor);
                }
            }
            BrowserMode::Favorites => self.nav.select(first_selectable(self.view.entries())),
            BrowserMode::History => {}
        }
        tracing::debug!(from = %previous, to = %mode, "switched browsing mode");
    }

    /// Switch to the next mode and return it.
    pub fn cycle_mode(&mut self) -> BrowserMode {
        let next = self.mode().next();
        self.set_mode(next);
        next
    }

    /// Activate the selected row.
    ///
    /// Entering a directory that cannot be listed leaves the catalog, the
    /// path and the cursor as they were.
    pub fn enter_selected(&mut self) -> Result<Activation, LauncherError> {
        let Some(entry) = self.selected_entry() else {
            return Ok(Activation::Nothing);
        };
        match entry {
            ViewEntry::Directory { .. } => {
                let catalog = self
                    .builder
                    .navigate_into(&self.catalog, self.nav.selected_index())?;
                let path = catalog.path().to_string();
                self.show_catalog(catalog);
                Ok(Activation::Entered(path))
            }
            ViewEntry::Rom { path, .. } => Ok(Activation::Launch(path.clone())),
            ViewEntry::GroupHeader { .. } | ViewEntry::Notice { .. } => Ok(Activation::Nothing),
        }
    }

    /// Go back one level.
    ///
    /// In file browsing this lists the parent directory and returns `false` at
    /// the library root. Other modes return to file browsing.
    pub fn go_up(&mut self) -> Result<bool, LauncherError> {
        if self.mode() != BrowserMode::Files {
            self.set_mode(BrowserMode::Files);
            return Ok(true);
        }
        match self
            .builder
            .navigate_up(&self.catalog, &self.config.library_root)?
        {
            Some(catalog) => {
                self.show_catalog(catalog);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Toggle the favorite state of the ROM at `index` of the current view.
    ///
    /// Returns `Ok(None)` for rows that are not ROMs, otherwise whether the
    /// ROM is now a favorite. A failed write still keeps the toggle.
    pub fn toggle_favorite_at(&mut self, index: usize) -> Result<Option<bool>, LauncherError> {
        let Some(path) = self
            .view
            .entries()
            .get(index)
            .and_then(ViewEntry::rom_path)
            .map(str::to_owned)
        else {
            return Ok(None);
        };

        let outcome = self.favorites.toggle(&path);
        if self.mode() == BrowserMode::Favorites {
            self.refresh_view();
        }
        Ok(Some(outcome?))
    }

    /// Toggle the favorite state of the selected ROM.
    pub fn toggle_selected_favorite(&mut self) -> Result<Option<bool>, LauncherError> {
        self.toggle_favorite_at(self.nav.selected_index())
    }

    /// Record a launch of `path` now and persist the history.
    pub fn record_launch(&mut self, path: &str) -> Result<usize, LauncherError> {
        let timestamp = self.clock.now();
        self.history.record_launch(path, timestamp);
        let outcome = self.history.persist();
        if self.mode() == BrowserMode::History {
            self.refresh_view();
        }
        Ok(outcome?)
    }

    /// Emulator invocation for `path` under the current configuration.
    pub fn launch_plan(&self, path: &str) -> Option<LaunchPlan> {
        LaunchPlan::for_rom(path, &self.config)
    }

    /// Re-list the current directory and rebuild the current view.
    pub fn reload(&mut self) -> Result<(), LauncherError> {
        self.catalog = self.builder.build(self.catalog.path().to_string())?;
        self.refresh_view();
        Ok(())
    }

    fn build_view(&self, mode: BrowserMode) -> ActiveView {
        match mode {
            BrowserMode::Files => ActiveView::FileBrowsing(self.catalog.view_entries()),
            BrowserMode::Favorites => {
                ActiveView::FavoritesBrowsing(self.favorites.build_grouped_view())
            }
            BrowserMode::History => ActiveView::HistoryBrowsing(
                self.history.build_display_view(self.config.display_budget),
            ),
        }
    }

    /// Rebuild the current view in place, keeping the cursor in range.
    fn refresh_view(&mut self) {
        self.view = self.build_view(self.mode());
        self.nav.rebuild(self.view.len());
        if self.selected_entry().is_some_and(ViewEntry::is_group_header) {
            let next = find_next_selectable(self.view.entries(), self.nav.selected_index(), 1);
            self.nav.select(next);
        }
    }

    fn show_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.view = ActiveView::FileBrowsing(self.catalog.view_entries());
        self.nav.reset(self.view.len());
    }
}

impl<D, S, C> std::fmt::Debug for Engine<D, S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("path", &self.catalog.path())
            .field("mode", &self.view.mode())
            .field("nav", &self.nav)
            .finish_non_exhaustive()
    }
}
