use romlauncher_core::{LauncherConfig, LauncherError, PathConverter, ViewEntry};
use romlauncher_engine::{Activation, ActiveView, BrowserMode, Direction, Engine};
use romlauncher_library::{Clock, FavoritesIndex, FileStore, HistoryLog};
use std::cell::Cell;
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;

/// Clock that ticks one second per reading.
#[derive(Clone, Default)]
struct TickClock(Rc<Cell<i64>>);

impl Clock for TickClock {
    fn now(&self) -> i64 {
        let next = self.0.get() + 1;
        self.0.set(next);
        next
    }
}

struct Fixture {
    _temp: TempDir,
    root: String,
    data: std::path::PathBuf,
}

fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();
    let roms = temp.path().join("roms");
    fs::create_dir_all(roms.join("nes")).unwrap();
    fs::create_dir_all(roms.join("snes")).unwrap();
    fs::write(roms.join("nes").join("Metroid.nes"), b"rom").unwrap();
    fs::write(roms.join("nes").join("Zelda.nes"), b"rom").unwrap();
    fs::write(roms.join("snes").join("Super Metroid.sfc"), b"rom").unwrap();
    fs::write(roms.join("Tetris.gb"), b"rom").unwrap();

    let data = temp.path().join("data");
    Fixture {
        root: roms.to_str().unwrap().to_string(),
        data,
        _temp: temp,
    }
}

fn engine(fx: &Fixture) -> Engine<romlauncher_catalog::FsSource, FileStore, TickClock> {
    let config = LauncherConfig::builder()
        .library_root(fx.root.clone())
        .data_dir(fx.data.clone())
        .page_size(2usize)
        .build()
        .unwrap();
    let converter = PathConverter::new(fx.root.clone());
    let favorites =
        FavoritesIndex::load(FileStore::new(config.favorites_path()), converter.clone()).unwrap();
    let history = HistoryLog::load(
        FileStore::new(config.history_path()),
        converter,
        config.history_limit,
    )
    .unwrap();
    Engine::open(config, favorites, history, TickClock::default()).unwrap()
}

fn texts(engine: &Engine<romlauncher_catalog::FsSource, FileStore, TickClock>) -> Vec<String> {
    engine.current_view().entries().iter().map(ViewEntry::text).collect()
}

#[test]
fn test_opens_at_library_root() {
    let fx = fixture();
    let engine = engine(&fx);

    assert_eq!(engine.mode(), BrowserMode::Files);
    assert_eq!(engine.current_path(), fx.root);
    assert_eq!(texts(&engine), vec!["nes/", "snes/", "Tetris.gb"]);
    assert_eq!(engine.navigation().total_pages(), 2);
    assert_eq!(engine.selected_path(), None);
}

#[test]
fn test_enter_directory_and_launch() {
    let fx = fixture();
    let mut engine = engine(&fx);

    let entered = engine.enter_selected().unwrap();
    assert_eq!(entered, Activation::Entered(format!("{}/nes", fx.root)));
    assert_eq!(texts(&engine), vec!["Metroid.nes", "Zelda.nes"]);
    assert_eq!(engine.navigation().selected_index(), 0);

    engine.move_selection(Direction::Next);
    let launch = engine.enter_selected().unwrap();
    let zelda = format!("{}/nes/Zelda.nes", fx.root);
    assert_eq!(launch, Activation::Launch(zelda.clone()));

    engine.record_launch(&zelda).unwrap();
    let history = fs::read_to_string(fx.data.join("history.txt")).unwrap();
    assert_eq!(history, "1|nes/Zelda.nes\n");
}

#[test]
fn test_go_up_stops_at_root() {
    let fx = fixture();
    let mut engine = engine(&fx);

    engine.move_selection(Direction::Next);
    engine.enter_selected().unwrap();
    assert!(engine.current_path().ends_with("/snes"));

    assert!(engine.go_up().unwrap());
    assert_eq!(engine.current_path(), fx.root);
    assert!(!engine.go_up().unwrap());
    assert_eq!(engine.current_path(), fx.root);
}

#[test]
fn test_failed_enter_keeps_state() {
    let fx = fixture();
    let mut engine = engine(&fx);
    engine.move_selection(Direction::Next);

    fs::remove_dir_all(format!("{}/snes", fx.root)).unwrap();
    let err = engine.enter_selected().unwrap_err();

    assert!(matches!(err, LauncherError::Catalog(_)));
    assert_eq!(engine.current_path(), fx.root);
    assert_eq!(engine.navigation().selected_index(), 1);
    assert_eq!(texts(&engine), vec!["nes/", "snes/", "Tetris.gb"]);
}

#[test]
fn test_toggle_favorites_from_files() {
    let fx = fixture();
    let mut engine = engine(&fx);

    // Directories are never favorited.
    assert_eq!(engine.toggle_favorite_at(0).unwrap(), None);
    assert_eq!(engine.toggle_favorite_at(2).unwrap(), Some(true));

    engine.enter_selected().unwrap();
    assert_eq!(engine.toggle_favorite_at(1).unwrap(), Some(true));

    let stored = fs::read_to_string(fx.data.join("favorites.txt")).unwrap();
    assert_eq!(stored, "Tetris.gb\nnes/Zelda.nes\n");

    engine.set_mode(BrowserMode::Favorites);
    assert_eq!(texts(&engine), vec!["[Root]", "Tetris.gb", "[nes]", "Zelda.nes"]);
    assert_eq!(engine.navigation().selected_index(), 1);

    engine.move_selection(Direction::Next);
    assert_eq!(engine.navigation().selected_index(), 3);
    engine.move_selection(Direction::Next);
    assert_eq!(engine.navigation().selected_index(), 1);
}

#[test]
fn test_unfavorite_in_favorites_view_skips_header() {
    let fx = fixture();
    let mut engine = engine(&fx);
    engine.toggle_favorite_at(2).unwrap();
    engine.set_mode(BrowserMode::Favorites);

    assert_eq!(engine.toggle_selected_favorite().unwrap(), Some(false));
    let view = engine.current_view();
    assert!(matches!(view, ActiveView::FavoritesBrowsing(rows) if rows.len() == 1 && rows[0].is_notice()));
    assert_eq!(engine.enter_selected().unwrap(), Activation::Nothing);
}

#[test]
fn test_file_cursor_survives_mode_cycle() {
    let fx = fixture();
    let mut engine = engine(&fx);
    engine.select(2);

    assert_eq!(engine.cycle_mode(), BrowserMode::Favorites);
    assert_eq!(engine.cycle_mode(), BrowserMode::History);
    assert_eq!(texts(&engine), vec!["No games launched yet"]);
    assert_eq!(engine.cycle_mode(), BrowserMode::Files);

    assert_eq!(engine.navigation().selected_index(), 2);
    assert_eq!(engine.navigation().current_page(), 1);
}

#[test]
fn test_history_view_refreshes_on_launch() {
    let fx = fixture();
    let mut engine = engine(&fx);
    let tetris = format!("{}/Tetris.gb", fx.root);
    let metroid = format!("{}/nes/Metroid.nes", fx.root);

    engine.record_launch(&tetris).unwrap();
    engine.set_mode(BrowserMode::History);
    engine.record_launch(&metroid).unwrap();

    assert_eq!(
        texts(&engine),
        vec!["[1970-01-01 00:00] Metroid", "[1970-01-01 00:00] Tetris"]
    );
    assert_eq!(engine.selected_path(), Some(metroid.as_str()));

    // Back leaves history for file browsing.
    assert!(engine.go_up().unwrap());
    assert_eq!(engine.mode(), BrowserMode::Files);
}

#[test]
fn test_page_move_in_files() {
    let fx = fixture();
    let mut engine = engine(&fx);

    engine.page_move(Direction::Next);
    assert_eq!(engine.navigation().selected_index(), 2);
    assert_eq!(engine.navigation().page_range(), 2..3);
    engine.page_move(Direction::Next);
    assert_eq!(engine.navigation().selected_index(), 0);
}

#[test]
fn test_selecting_current_mode_keeps_cursor() {
    let fx = fixture();
    let mut engine = engine(&fx);
    engine.select(2);

    engine.set_mode(BrowserMode::Files);
    assert_eq!(engine.navigation().selected_index(), 2);

    engine.toggle_favorite_at(2).unwrap();
    engine.set_mode(BrowserMode::Favorites);
    engine.set_mode(BrowserMode::Favorites);
    assert_eq!(engine.navigation().selected_index(), 1);

    engine.set_mode(BrowserMode::Files);
    assert_eq!(engine.navigation().selected_index(), 2);
}
