use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for generation operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("stub file does not exist: {name}")]
    #[diagnostic(
        code(repogen::stub_not_found),
        help(
            "run 'repogen init --publish-stubs' to copy the default stubs into '{}'",
            dir.display()
        )
    )]
    StubNotFound { name: String, dir: PathBuf },

    #[error("not writable directory, check permissions: {path}")]
    #[diagnostic(code(repogen::not_writable))]
    DirectoryNotWritable { path: PathBuf },

    #[error("there are no model files to use in directory: \"{dir}\"")]
    #[diagnostic(
        code(repogen::no_entities),
        help("repository generator has stopped; add one '*.{extension}' file per model")
    )]
    NoEntities { dir: PathBuf, extension: String },

    #[error("{anchor} not found in '{path}'")]
    #[diagnostic(
        code(repogen::anchor_missing),
        help("the file was not patched; add the binding by hand or restore the generated layout")
    )]
    AnchorMissing { anchor: String, path: PathBuf },

    #[error("failed to read '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to read overwrite confirmation")]
    Prompt {
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a read error for `path`.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Read {
            path: path.into(),
            source,
        })
    }

    /// Create a write error for `path` from any error source.
    pub fn write(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Box<Self> {
        Box::new(Error::Write {
            path: path.into(),
            source: source.into(),
        })
    }

    /// Create a directory permission error.
    pub fn not_writable(path: impl Into<PathBuf>) -> Box<Self> {
        Box::new(Error::DirectoryNotWritable { path: path.into() })
    }
}

#[cfg(test)]
mod tests {
    use miette::Diagnostic as _;

    use super::*;

    #[test]
    fn test_stub_not_found_help_names_the_directory() {
        let err = Error::StubNotFound {
            name: "Binding".to_string(),
            dir: PathBuf::from("stubs/repogen"),
        };
        assert_eq!(err.to_string(), "stub file does not exist: Binding");
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.ends_with("into 'stubs/repogen'"), "{help}");
    }
}
