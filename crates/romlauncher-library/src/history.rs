//! Launch history: one record per ROM, newest first.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use romlauncher_core::path::{self, PathConverter};
use romlauncher_core::{LauncherConfig, StoreError, ViewEntry};

use crate::store::{FileStore, LineStore};

/// Placeholder shown when nothing has been launched.
pub const EMPTY_HISTORY_MESSAGE: &str = "No games launched yet";

const FIELD_SEPARATOR: char = '|';

/// Source of launch timestamps, in seconds since the Unix epoch.
pub trait Clock {
    fn now(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A launched ROM and when it was last launched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Absolute path of the ROM.
    pub path: String,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}

impl HistoryRecord {
    /// `[YYYY-MM-DD HH:MM] name` in UTC, without the file extension.
    pub fn display_text(&self) -> String {
        format!("[{}] {}", format_timestamp(self.timestamp), path::file_stem(&self.path))
    }
}

/// Format a Unix timestamp as `YYYY-MM-DD HH:MM` (UTC).
pub fn format_timestamp(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => timestamp.to_string(),
    }
}

/// Keep at most `budget` characters of `text`. A budget of 0 keeps everything.
pub fn truncate_chars(text: &str, budget: usize) -> String {
    if budget == 0 {
        return text.to_string();
    }
    match text.char_indices().nth(budget) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Recency-ordered launch log.
///
/// Every launched path is kept in memory; only the newest `limit` records are
/// persisted and displayed.
#[derive(Debug)]
pub struct HistoryLog<S = FileStore> {
    store: S,
    converter: PathConverter,
    limit: usize,
    records: IndexMap<String, i64>,
}

impl HistoryLog<FileStore> {
    /// Load `history.txt` from the configured data directory.
    pub fn open(config: &LauncherConfig) -> Result<Self, StoreError> {
        Self::load(
            FileStore::new(config.history_path()),
            PathConverter::new(config.library_root.clone()),
            config.history_limit,
        )
    }
}

impl<S: LineStore> HistoryLog<S> {
    /// Empty log that persists to `store`.
    pub fn new(store: S, converter: PathConverter, limit: usize) -> Self {
        Self {
            store,
            converter,
            limit,
            records: IndexMap::new(),
        }
    }

    /// Read `timestamp|relative_path` lines, skipping malformed ones.
    pub fn load(store: S, converter: PathConverter, limit: usize) -> Result<Self, StoreError> {
        let lines = store.read_lines()?;
        let mut log = Self::new(store, converter, limit);

        let mut skipped = 0usize;
        for line in &lines {
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(line) {
                Some((timestamp, relative)) => {
                    let absolute = log.converter.to_absolute(relative);
                    log.upsert(absolute, timestamp);
                }
                None => {
                    tracing::debug!(line = %line, "skipping malformed history line");
                    skipped += 1;
                }
            }
        }

        tracing::info!(count = log.records.len(), skipped, "loaded history");
        Ok(log)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Timestamp of the last launch of `path`.
    pub fn last_launched(&self, path: &str) -> Option<i64> {
        self.records.get(path).copied()
    }

    /// Record a launch of `path` at `timestamp`, replacing any earlier one.
    ///
    /// Empty paths are ignored.
    pub fn record_launch(&mut self, path: &str, timestamp: i64) {
        if path.is_empty() {
            return;
        }
        self.upsert(path.to_string(), timestamp);
    }

    fn upsert(&mut self, path: String, timestamp: i64) {
        self.records.insert(path, timestamp);
    }

    /// All records, newest first. Equal timestamps order by path.
    pub fn records(&self) -> Vec<HistoryRecord> {
        let mut records: Vec<HistoryRecord> = self
            .records
            .iter()
            .map(|(path, &timestamp)| HistoryRecord {
                path: path.clone(),
                timestamp,
            })
            .collect();
        records.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.path.cmp(&b.path))
        });
        records
    }

    /// Path of the ROM shown at `display_index` of the display view.
    pub fn path_at(&self, display_index: usize) -> Option<String> {
        if display_index >= self.limit {
            return None;
        }
        self.records()
            .into_iter()
            .nth(display_index)
            .map(|record| record.path)
    }

    /// Write the newest `limit` records, newest first.
    ///
    /// Returns the number of records written. Older records stay in memory.
    pub fn persist(&self) -> Result<usize, StoreError> {
        let lines: Vec<String> = self
            .records()
            .into_iter()
            .take(self.limit)
            .map(|record| {
                format!(
                    "{}{FIELD_SEPARATOR}{}",
                    record.timestamp,
                    self.converter.to_relative(&record.path)
                )
            })
            .collect();

        self.store.write_lines(&lines).inspect_err(|err| {
            tracing::warn!("failed to persist history: {err}");
        })?;
        tracing::debug!(written = lines.len(), "persisted history");
        Ok(lines.len())
    }

    /// Rows for the history view, newest first, each at most `budget` chars.
    ///
    /// An empty log yields a single notice row.
    pub fn build_display_view(&self, budget: usize) -> Vec<ViewEntry> {
        if self.records.is_empty() {
            return vec![ViewEntry::Notice {
                message: EMPTY_HISTORY_MESSAGE.to_string(),
            }];
        }

        self.records()
            .into_iter()
            .take(self.limit)
            .map(|record| ViewEntry::Rom {
                label: truncate_chars(&record.display_text(), budget),
                path: record.path,
            })
            .collect()
    }
}

fn parse_line(line: &str) -> Option<(i64, &str)> {
    let (timestamp, relative) = line.split_once(FIELD_SEPARATOR)?;
    let timestamp = timestamp.trim().parse().ok()?;
    if relative.is_empty() {
        return None;
    }
    Some((timestamp, relative))
}
