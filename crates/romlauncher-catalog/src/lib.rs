//! Directory catalog builder for romlauncher.
//!
//! A [`Catalog`] is the sorted listing of exactly one directory: its
//! subdirectories and files kept in two byte-wise sorted sequences behind a
//! single virtual index (directories first, then files).
//!
//! Catalogs are never updated in place. Navigating into or out of a
//! directory builds a fresh catalog and leaves the old one untouched, so a
//! failed listing never leaves the caller with a half-updated view.
//!
//! # Example
//!
//! ```rust,no_run
//! use romlauncher_catalog::CatalogBuilder;
//!
//! let builder = CatalogBuilder::new().max_entries(512);
//! let catalog = builder.build("/media/roms").unwrap();
//! for entry in catalog.entries() {
//!     println!("{}", entry.name);
//! }
//!
//! if let Ok(snes) = builder.navigate_into(&catalog, 0) {
//!     println!("{} entries in {}", snes.len(), snes.path());
//! }
//! ```

mod catalog;
mod source;

pub use catalog::{Catalog, CatalogBuilder};
pub use source::{DirectorySource, FsSource};

// Re-export core types for convenience
pub use romlauncher_core::{CatalogEntry, CatalogError, EntryKind, ViewEntry};
