//! Core operations.
//!
//! This module contains the business logic for repogen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod init;

use std::path::Path;

pub use check::check;
pub use generate::generate;
pub use init::init;

/// Path shown to the user: relative to the project root when possible.
pub(crate) fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
