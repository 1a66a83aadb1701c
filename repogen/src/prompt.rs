//! Interactive overwrite confirmation.

use std::io;
use std::path::{Path, PathBuf};

use dialoguer::{Confirm as Prompt, theme::ColorfulTheme};
use repogen_codegen::{ArtifactKind, Confirm};

/// Lists the existing files on stderr, then asks one yes/no question.
pub struct TerminalConfirm {
    root: PathBuf,
}

impl TerminalConfirm {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

impl Confirm for TerminalConfirm {
    fn confirm_overwrite(&mut self, kind: ArtifactKind, existing: &[PathBuf]) -> io::Result<bool> {
        eprintln!("These {} files already exist:", kind);
        for path in existing {
            eprintln!("  {}", path.strip_prefix(&self.root).unwrap_or(path).display());
        }

        Prompt::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Overwrite all existing {} files?", kind))
            .default(false)
            .interact()
            .map_err(io::Error::other)
    }
}
