//! Init command report data structures.

use std::path::PathBuf;

use super::output::{Marker, Output, Report};

/// Report data from `repogen init`.
#[derive(Debug, Default)]
pub struct InitReport {
    pub config_path: PathBuf,
    /// Whether the config was written by this run.
    pub config_created: bool,
    /// Stub files copied into the project.
    pub stubs_written: Vec<String>,
    /// Stub files that already existed and were kept.
    pub stubs_kept: Vec<String>,
    /// How to activate the published stubs, if they are not configured yet.
    pub stubs_hint: Option<String>,
}

impl Report for InitReport {
    fn render(&self, out: &mut dyn Output) {
        let config = self.config_path.display().to_string();
        if self.config_created {
            out.item(Marker::Created, &config);
        } else {
            out.item(Marker::Kept, &config);
        }

        for stub in &self.stubs_written {
            out.item(Marker::Created, stub);
        }
        for stub in &self.stubs_kept {
            out.item(Marker::Kept, stub);
        }

        if let Some(hint) = &self.stubs_hint {
            out.blank();
            out.text(hint);
        }

        out.blank();
        out.text("Next steps:");
        out.text("  repogen check");
        out.text("  repogen generate");
    }
}
