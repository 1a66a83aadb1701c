use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Boxed to keep `Result` small on the happy path.
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// The text of a config file, kept around so errors can point into it.
#[derive(Debug, Clone)]
pub(crate) struct ConfigSource<'a> {
    text: &'a str,
    name: &'a str,
}

impl<'a> ConfigSource<'a> {
    pub fn new(text: &'a str, name: &'a str) -> Self {
        Self { text, name }
    }

    fn named(&self) -> NamedSource<String> {
        NamedSource::new(self.name, self.text.to_string())
    }

    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        Box::new(Error::Parse {
            src: self.named(),
            span: source.span().map(SourceSpan::from),
            source,
        })
    }

    /// Reject the value of `section.key`, labelled with `message`.
    pub fn invalid(&self, section: &str, key: &str, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named(),
            span: value_span(self.text, section, key),
            message: message.into(),
        })
    }

    pub fn invalid_namespace(&self, section: &str, key: &str, namespace: &str) -> Box<Error> {
        Box::new(Error::InvalidNamespace {
            src: self.named(),
            span: value_span(self.text, section, key),
            key: format!("{section}.{key}"),
            namespace: namespace.to_string(),
        })
    }
}

/// Span of the value in a `key = value` line below `[section]`.
///
/// Keys that are absent (defaulted) have no span.
fn value_span(src: &str, section: &str, key: &str) -> Option<SourceSpan> {
    let header = format!("[{section}]");
    let mut offset = 0;
    let mut in_section = false;

    for line in src.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.starts_with('[') {
            in_section = trimmed == header;
        } else if in_section {
            if let Some((lhs, rhs)) = line.split_once('=') {
                if lhs.trim() == key {
                    let leading = rhs.len() - rhs.trim_start().len();
                    let start = offset + lhs.len() + 1 + leading;
                    return Some(SourceSpan::from((start, rhs.trim().len())));
                }
            }
        }
        offset += line.len();
    }

    None
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("run 'repogen init' to create a default repogen.toml"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse repogen.toml")]
    #[diagnostic(code(repogen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(repogen::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid namespace '{namespace}' for '{key}'")]
    #[diagnostic(
        code(repogen::invalid_namespace),
        help("namespaces are identifiers separated by backslashes, e.g. 'App\\\\Models'")
    )]
    InvalidNamespace {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid namespace")]
        span: Option<SourceSpan>,
        key: String,
        namespace: String,
    },
}
