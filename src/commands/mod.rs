// ABOUTME: Command implementations for each transfer mode
// ABOUTME: Exports test, dump, load, transfer, and transfer-names commands

pub mod check;
pub mod dump;
pub mod load;
pub mod transfer;
pub mod transfer_names;

pub use check::test_connection;
pub use dump::dump;
pub use load::load;
pub use transfer::transfer;
pub use transfer_names::transfer_names;

use std::path::{Path, PathBuf};

/// Absolute form of `path` for messages, falling back to the path as given
pub(crate) fn display_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
