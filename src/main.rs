//! romlauncher - browse a ROM library, keep favorites and launch history.
//!
//! Usage:
//!   romlauncher browse [PATH]      List a page of a library directory
//!   romlauncher favorites          Show favorites grouped by directory
//!   romlauncher history            Show recently launched ROMs
//!   romlauncher toggle PATH        Add or remove a favorite
//!   romlauncher launch PATH        Record a launch and print the emulator invocation
//!   romlauncher shell              Interactive line-driven browser
//!   romlauncher --help             Show help

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail, eyre};
use tracing_subscriber::EnvFilter;

use romlauncher_catalog::CatalogBuilder;
use romlauncher_core::{LaunchPlan, LauncherConfig, PathConverter, is_group_header};
use romlauncher_engine::{
    Activation, BOXART_POLL_INTERVAL_MS, BoxArtLoader, BrowserMode, Direction, Engine,
    NavigationState,
};
use romlauncher_library::{Clock, FavoritesIndex, HistoryLog, SystemClock};

#[derive(Parser)]
#[command(
    name = "romlauncher",
    version,
    about = "Browse a ROM library and launch games",
    long_about = "romlauncher lists a ROM library one directory at a time, keeps a \
                  favorites list and a launch history next to it, and works out \
                  which emulator core opens each ROM."
)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List one page of a library directory
    Browse {
        /// Directory to list (defaults to the library root)
        path: Option<String>,

        /// Page to show, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show favorites grouped by directory
    Favorites {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show launch history, newest first
    History {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a ROM to favorites, or remove it if already there
    Toggle {
        /// ROM path, absolute or relative to the library root
        path: String,
    },

    /// Record a launch and print the emulator invocation
    Launch {
        /// ROM path, absolute or relative to the library root
        path: String,
    },

    /// Interactive browser reading commands from stdin
    Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    tracing::debug!(root = %config.library_root, data = %config.data_dir.display(), "loaded config");

    match cli.command {
        Command::Browse { path, page, format } => run_browse(&config, path, page, format),
        Command::Favorites { format } => run_favorites(&config, format),
        Command::History { format } => run_history(&config, format),
        Command::Toggle { path } => run_toggle(&config, &path),
        Command::Launch { path } => run_launch(&config, &path),
        Command::Shell => run_shell(config),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<LauncherConfig> {
    match path {
        Some(path) => LauncherConfig::load(path)
            .wrap_err_with(|| format!("Failed to load config from {}", path.display())),
        None => Ok(LauncherConfig::load_or_default()),
    }
}

/// List one page of a directory.
fn run_browse(
    config: &LauncherConfig,
    path: Option<String>,
    page: usize,
    format: OutputFormat,
) -> Result<()> {
    let converter = PathConverter::new(config.library_root.clone());
    let path = path
        .map(|p| converter.to_absolute(&p))
        .unwrap_or_else(|| config.library_root.clone());

    let catalog = CatalogBuilder::new()
        .max_entries(config.max_entries)
        .build(path)
        .context("Failed to list directory")?;
    let rows = catalog.view_entries();

    let mut nav = NavigationState::new(config.page_size);
    nav.reset(rows.len());
    if page == 0 || (nav.is_active() && page > nav.total_pages()) {
        bail!("Page {} out of range (1-{})", page, nav.total_pages().max(1));
    }
    nav.select((page - 1) * nav.page_size());
    let visible = &rows[nav.page_range()];

    match format {
        OutputFormat::Text => {
            print_header(&format!(
                "{} - page {}/{}",
                catalog.path(),
                page,
                nav.total_pages().max(1)
            ));
            println!(
                " {} directories, {} files",
                catalog.dir_count(),
                catalog.file_count()
            );
            println!();
            if visible.is_empty() {
                println!(" (empty)");
            }
            for row in visible {
                println!("   {}", row.text());
            }
            println!();
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": catalog.path(),
                "page": page,
                "total_pages": nav.total_pages(),
                "directories": catalog.dir_count(),
                "files": catalog.file_count(),
                "entries": visible,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Show the grouped favorites view.
fn run_favorites(config: &LauncherConfig, format: OutputFormat) -> Result<()> {
    let favorites = FavoritesIndex::open(config).context("Failed to load favorites")?;
    let rows = favorites.build_grouped_view();

    match format {
        OutputFormat::Text => {
            print_header(&format!("Favorites ({})", favorites.len()));
            for row in &rows {
                let text = row.text();
                if is_group_header(&text) {
                    println!(" {text}");
                } else {
                    println!("   {text}");
                }
            }
            println!();
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }

    Ok(())
}

/// Show the launch history view.
fn run_history(config: &LauncherConfig, format: OutputFormat) -> Result<()> {
    let history = HistoryLog::open(config).context("Failed to load history")?;

    match format {
        OutputFormat::Text => {
            print_header("Recently played");
            for row in history.build_display_view(config.display_budget) {
                println!("   {}", row.text());
            }
            println!();
        }
        OutputFormat::Json => {
            let records: Vec<_> = history
                .records()
                .into_iter()
                .take(history.limit())
                .collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}

/// Toggle one favorite.
fn run_toggle(config: &LauncherConfig, path: &str) -> Result<()> {
    let mut favorites = FavoritesIndex::open(config).context("Failed to load favorites")?;
    let absolute = favorites.converter().to_absolute(path);

    let added = favorites
        .toggle(&absolute)
        .context("Failed to save favorites")?;
    if added {
        println!("Added {absolute} to favorites");
    } else {
        println!("Removed {absolute} from favorites");
    }

    Ok(())
}

/// Record a launch and print the emulator invocation.
fn run_launch(config: &LauncherConfig, path: &str) -> Result<()> {
    let mut history = HistoryLog::open(config).context("Failed to load history")?;
    let absolute = PathConverter::new(config.library_root.clone()).to_absolute(path);

    let plan = LaunchPlan::for_rom(&absolute, config)
        .ok_or_else(|| eyre!("No emulator is configured for {absolute}"))?;

    history.record_launch(&absolute, SystemClock.now());
    history.persist().context("Failed to save history")?;

    print_plan(&plan);
    Ok(())
}

/// Line-driven session over the engine.
fn run_shell(config: LauncherConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
    let _guard = runtime.enter();

    let mut boxart = config.boxart_dir.clone().map(BoxArtLoader::new);
    let favorites = FavoritesIndex::open(&config).context("Failed to load favorites")?;
    let history = HistoryLog::open(&config).context("Failed to load history")?;
    let mut engine = Engine::open(config, favorites, history, SystemClock)
        .context("Failed to open library root")?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if let Some(loader) = boxart.as_mut() {
            if loader.select(engine.selected_path()).is_some() {
                std::thread::sleep(Duration::from_millis(BOXART_POLL_INTERVAL_MS));
            }
            loader.poll();
        }
        let art_line = boxart.as_ref().and_then(|loader| {
            let art = loader.art_for(engine.selected_path()?)?;
            Some(match &art.image {
                Some(image) => format!("art: {}", image.display()),
                None => "art: none".to_string(),
            })
        });
        render(&engine, art_line.as_deref());

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match line.trim() {
            "j" | "down" => engine.move_selection(Direction::Next),
            "k" | "up" => engine.move_selection(Direction::Prev),
            "n" | "next" => engine.page_move(Direction::Next),
            "p" | "prev" => engine.page_move(Direction::Prev),
            "" | "enter" => match engine.enter_selected() {
                Ok(Activation::Launch(path)) => match engine.launch_plan(&path) {
                    Some(plan) => {
                        if let Err(err) = engine.record_launch(&path) {
                            eprintln!("warning: {err}");
                        }
                        print_plan(&plan);
                    }
                    None => eprintln!("No emulator is configured for {path}"),
                },
                Ok(Activation::Entered(_) | Activation::Nothing) => {}
                Err(err) => eprintln!("error: {err}"),
            },
            "b" | "back" => {
                if let Err(err) = engine.go_up() {
                    eprintln!("error: {err}");
                }
            }
            "f" | "fav" => match engine.toggle_selected_favorite() {
                Ok(Some(true)) => println!("Added to favorites"),
                Ok(Some(false)) => println!("Removed from favorites"),
                Ok(None) => {}
                Err(err) => eprintln!("warning: {err}"),
            },
            "m" | "mode" => {
                engine.cycle_mode();
            }
            "q" | "quit" => break,
            other => eprintln!("unknown command: {other} (j/k/n/p/enter/back/fav/mode/q)"),
        }
    }

    Ok(())
}

fn render(engine: &Engine, art: Option<&str>) {
    let nav = engine.navigation();
    let title = match engine.mode() {
        BrowserMode::Files => engine.current_path().to_string(),
        mode => mode.to_string(),
    };

    println!();
    print_header(&format!(
        "{} - page {}/{}",
        title,
        nav.current_page() + 1,
        nav.total_pages().max(1)
    ));

    let rows = engine.current_view().entries();
    for index in nav.page_range() {
        let marker = if index == nav.selected_index() { ">" } else { " " };
        println!(" {} {}", marker, rows[index].text());
    }
    if let Some(art) = art {
        println!();
        println!(" {art}");
    }
}

fn print_plan(plan: &LaunchPlan) {
    println!("emulator:  {}", plan.emulator);
    println!("program:   {}", plan.program);
    println!("arguments: {}", plan.arguments);
}

fn print_header(title: &str) {
    println!("{}", "─".repeat(60));
    println!(" {title}");
    println!("{}", "─".repeat(60));
}
