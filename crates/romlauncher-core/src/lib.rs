//! Core types for romlauncher.
//!
//! This crate provides the data structures shared by the catalog, library and
//! engine crates: catalog entries and view rows, error types, configuration,
//! library-root path conversion and the default emulator-core table.

mod config;
pub mod cores;
mod entry;
mod error;
pub mod path;

pub use config::{
    DEFAULT_DISPLAY_BUDGET, DEFAULT_HISTORY_LIMIT, DEFAULT_MAX_ENTRIES, DEFAULT_PAGE_SIZE,
    LauncherConfig, LauncherConfigBuilder,
};
pub use cores::{EmulatorChoice, LaunchPlan, derive_emulator};
pub use entry::{CatalogEntry, EntryKind, ViewEntry, is_group_header};
pub use error::{CatalogError, ConfigError, LauncherError, StoreError};
pub use path::PathConverter;
