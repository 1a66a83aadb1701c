//! Stub templates.
//!
//! Stubs are text templates with `__PLACEHOLDER__` tokens. The default set is
//! embedded in the binary; a project can point `paths.stubs` at a directory
//! holding its own copies (see `repogen init --publish-stubs`).

mod render;
mod scratch;

use std::path::{Path, PathBuf};

pub use render::{Substitutions, render};
use repogen_core::{File, Overwrite, WriteResult};
pub use scratch::ScratchBuffer;
use tracing::debug;

use crate::{Error, Result};

/// Every stub the generator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StubName {
    Repository,
    Interface,
    ServiceProvider,
    Use,
    Binding,
    BaseRepository,
    BaseInterface,
}

impl StubName {
    pub const ALL: [StubName; 7] = [
        StubName::Repository,
        StubName::Interface,
        StubName::ServiceProvider,
        StubName::Use,
        StubName::Binding,
        StubName::BaseRepository,
        StubName::BaseInterface,
    ];

    /// Name of the stub without extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            StubName::Repository => "Repository",
            StubName::Interface => "Interface",
            StubName::ServiceProvider => "ServiceProvider",
            StubName::Use => "Use",
            StubName::Binding => "Binding",
            StubName::BaseRepository => "BaseRepository",
            StubName::BaseInterface => "BaseInterface",
        }
    }

    /// File name inside a stub directory.
    pub fn file_name(&self) -> String {
        format!("{}.stub", self.as_str())
    }

    /// Placeholders the stub is rendered with, in substitution order.
    pub fn placeholders(&self) -> &'static [&'static str] {
        match self {
            StubName::Repository => &[
                "__USE_STATEMENT_FOR_REPOSITORY__",
                "__REPOSITORY_NAMESPACE__",
                "__MAIN_REPOSITORY__",
                "__REPOSITORY__",
                "__MODEL_NAMESPACE__",
                "__MODEL__",
                "__INTERFACE_NAMESPACE__",
                "__INTERFACE__",
            ],
            StubName::Interface => &[
                "__USE_STATEMENT_FOR_INTERFACE__",
                "__INTERFACE_NAMESPACE__",
                "__MAIN_INTERFACE__",
                "__INTERFACE__",
            ],
            StubName::ServiceProvider => {
                &["__SERVICE_PROVIDER_NAMESPACE__", "__SERVICE_PROVIDER_NAME__"]
            }
            StubName::Use => &["__USE_STATEMENT__"],
            StubName::Binding => &["__BINDING__"],
            StubName::BaseRepository => &[
                "__BASE_NAMESPACE__",
                "__BASE_CLASS__",
                "__BASE_INTERFACE_NAME__",
                "__BASE_INTERFACE__",
                "__ACTIVE_COLUMN__",
            ],
            StubName::BaseInterface => &["__BASE_NAMESPACE__", "__BASE_CLASS__"],
        }
    }

    fn embedded(&self) -> &'static str {
        match self {
            StubName::Repository => include_str!("../../stubs/Repository.stub"),
            StubName::Interface => include_str!("../../stubs/Interface.stub"),
            StubName::ServiceProvider => include_str!("../../stubs/ServiceProvider.stub"),
            StubName::Use => include_str!("../../stubs/Use.stub"),
            StubName::Binding => include_str!("../../stubs/Binding.stub"),
            StubName::BaseRepository => include_str!("../../stubs/BaseRepository.stub"),
            StubName::BaseInterface => include_str!("../../stubs/BaseInterface.stub"),
        }
    }
}

impl std::fmt::Display for StubName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stub {
    name: StubName,
    template: String,
}

impl Stub {
    pub fn new(name: StubName, template: impl Into<String>) -> Self {
        Self {
            name,
            template: template.into(),
        }
    }

    pub fn name(&self) -> StubName {
        self.name
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render the stub.
    pub fn render(&self, substitutions: &Substitutions) -> String {
        substitutions.apply(&self.template)
    }

    /// Placeholders of this stub kind that the template never mentions.
    pub fn missing_placeholders(&self) -> Vec<&'static str> {
        self.name
            .placeholders()
            .iter()
            .copied()
            .filter(|placeholder| !self.template.contains(placeholder))
            .collect()
    }
}

/// Where stubs are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubSource {
    /// Stubs compiled into the binary
    Embedded,
    /// A directory holding `<Name>.stub` files
    Directory(PathBuf),
}

impl StubSource {
    /// Source for an optional configured directory.
    pub fn from_dir(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => StubSource::Directory(dir.to_path_buf()),
            None => StubSource::Embedded,
        }
    }

    /// Load one stub.
    pub fn load(&self, name: StubName) -> Result<Stub> {
        match self {
            StubSource::Embedded => Ok(Stub::new(name, name.embedded())),
            StubSource::Directory(dir) => {
                let path = dir.join(name.file_name());
                if !path.is_file() {
                    return Err(Box::new(Error::StubNotFound {
                        name: name.to_string(),
                        dir: dir.clone(),
                    }));
                }
                debug!(stub = %name, path = %path.display(), "loading stub");
                let template =
                    std::fs::read_to_string(&path).map_err(|e| Error::read(&path, e))?;
                Ok(Stub::new(name, template))
            }
        }
    }
}

/// All stubs needed by a generate run, loaded up front.
#[derive(Debug, Clone)]
pub struct StubSet {
    pub repository: Stub,
    pub interface: Stub,
    pub service_provider: Stub,
    pub use_statement: Stub,
    pub binding: Stub,
    pub base_repository: Stub,
    pub base_interface: Stub,
}

impl StubSet {
    /// Load every stub from `source`, failing on the first missing one.
    pub fn load(source: &StubSource) -> Result<Self> {
        Ok(Self {
            repository: source.load(StubName::Repository)?,
            interface: source.load(StubName::Interface)?,
            service_provider: source.load(StubName::ServiceProvider)?,
            use_statement: source.load(StubName::Use)?,
            binding: source.load(StubName::Binding)?,
            base_repository: source.load(StubName::BaseRepository)?,
            base_interface: source.load(StubName::BaseInterface)?,
        })
    }

    /// Iterate over the loaded stubs.
    pub fn iter(&self) -> impl Iterator<Item = &Stub> {
        [
            &self.repository,
            &self.interface,
            &self.service_provider,
            &self.use_statement,
            &self.binding,
            &self.base_repository,
            &self.base_interface,
        ]
        .into_iter()
    }
}

/// Copy the embedded stubs into `dir`, keeping files that already exist.
pub fn publish(dir: &Path) -> Result<Vec<(PathBuf, WriteResult)>> {
    StubName::ALL
        .iter()
        .map(|name| -> Result<(PathBuf, WriteResult)> {
            let path = dir.join(name.file_name());
            let result = File::new(&path, name.embedded())
                .overwrite(Overwrite::IfMissing)
                .write()
                .map_err(|e| Error::write(&path, e))?;
            Ok((path, result))
        })
        .collect()
}
