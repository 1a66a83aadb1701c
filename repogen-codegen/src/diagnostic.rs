//! Non-fatal findings of a run.
//!
//! Anything that should be reported but must not stop generation ends up
//! here: model files with unusable names, stubs missing placeholders,
//! aggregator anchors that could not be found.

use std::fmt;

/// Part of the run that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Discover,
    Stubs,
    Bootstrap,
    Patch,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Discover => "discover",
            Stage::Stubs => "stubs",
            Stage::Bootstrap => "bootstrap",
            Stage::Patch => "patch",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Info,
}

impl Severity {
    pub fn is_warning(&self) -> bool {
        *self == Severity::Warning
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

/// A finding, optionally tied to a file or model name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub stage: Stage,
    pub message: String,
    pub location: Option<String>,
}

impl Diagnostic {
    fn new(severity: Severity, stage: Stage, message: impl Into<String>) -> Self {
        Self {
            severity,
            stage,
            message: message.into(),
            location: None,
        }
    }

    pub fn warning(stage: Stage, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, stage, message)
    }

    pub fn info(stage: Stage, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, stage, message)
    }

    pub fn at(self, location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..self
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {} ({location})", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_location() {
        let diag = Diagnostic::warning(Stage::Patch, "'register' method body not found")
            .at("app/Providers/RepositoryServiceProvider.php");
        assert!(diag.severity.is_warning());
        assert_eq!(
            diag.to_string(),
            "warning: 'register' method body not found (app/Providers/RepositoryServiceProvider.php)"
        );
    }

    #[test]
    fn test_display_without_location() {
        let diag = Diagnostic::info(Stage::Bootstrap, "aggregator will be created");
        assert!(!diag.severity.is_warning());
        assert_eq!(diag.to_string(), "info: aggregator will be created");
        assert_eq!(diag.stage.to_string(), "bootstrap");
    }
}
