//! Engine constants.

/// Box-art image extensions, in lookup order.
pub const BOXART_EXTENSIONS: &[&str] = &["png", "jpg"];

/// Pause between polls while waiting for box art in tests and the shell.
pub const BOXART_POLL_INTERVAL_MS: u64 = 10;
