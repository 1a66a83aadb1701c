//! Init operation - default configuration and stub publishing.

use repogen_codegen::{Result, stub};
use repogen_core::WriteResult;
use repogen_manifest::RepogenToml;
use tracing::info;

use super::display_path;
use crate::reports::InitReport;

/// Stub directory used when `paths.stubs` is not configured.
const DEFAULT_STUBS_DIR: &str = "stubs/repogen";

/// Execute the init operation for a freshly written (or existing) config.
pub fn init(config: &RepogenToml, created: bool, publish_stubs: bool) -> Result<InitReport> {
    let mut report = InitReport {
        config_path: config.path().to_path_buf(),
        config_created: created,
        ..Default::default()
    };

    if publish_stubs {
        let layout = config.layout();
        let configured = layout.stubs_dir.is_some();
        let dir = layout
            .stubs_dir
            .unwrap_or_else(|| config.root().join(DEFAULT_STUBS_DIR));

        info!(dir = %dir.display(), "publishing stubs");
        for (path, result) in stub::publish(&dir)? {
            let path = display_path(config.root(), &path);
            match result {
                WriteResult::Skipped => report.stubs_kept.push(path),
                _ => report.stubs_written.push(path),
            }
        }
        if !configured {
            report.stubs_hint = Some(format!(
                "set paths.stubs = \"{}\" in repogen.toml to use the published stubs",
                DEFAULT_STUBS_DIR
            ));
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_init_publishes_stubs_with_hint() {
        let temp = TempDir::new().unwrap();
        let (path, created) = RepogenToml::write_default(temp.path()).unwrap();
        let config = RepogenToml::open(path).unwrap();

        let report = init(&config, created, true).unwrap();
        assert!(report.config_created);
        assert_eq!(report.stubs_written.len(), 7);
        assert!(report.stubs_written.contains(&"stubs/repogen/Use.stub".to_string()));
        assert!(report.stubs_hint.is_some());
        assert!(temp.path().join("stubs/repogen/Binding.stub").is_file());

        let again = init(&config, false, true).unwrap();
        assert!(again.stubs_written.is_empty());
        assert_eq!(again.stubs_kept.len(), 7);
    }

    #[test]
    fn test_init_without_stubs() {
        let temp = TempDir::new().unwrap();
        let (path, created) = RepogenToml::write_default(temp.path()).unwrap();
        let report = init(&RepogenToml::open(path).unwrap(), created, false).unwrap();
        assert!(report.stubs_written.is_empty());
        assert!(report.stubs_hint.is_none());
        assert!(!temp.path().join("stubs").exists());
    }
}
