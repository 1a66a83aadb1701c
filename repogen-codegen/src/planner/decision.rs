//! Per-kind overwrite decisions.

use std::path::PathBuf;

use tracing::info;

use super::ArtifactKind;
use crate::confirm::Confirm;
use crate::{Error, Result};

/// Files of each kind that existed when the run started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingArtifacts {
    pub implementations: Vec<PathBuf>,
    pub contracts: Vec<PathBuf>,
}

impl ExistingArtifacts {
    pub fn of(&self, kind: ArtifactKind) -> &[PathBuf] {
        match kind {
            ArtifactKind::Implementation => &self.implementations,
            ArtifactKind::Contract => &self.contracts,
        }
    }
}

/// Whether existing files of each kind may be overwritten during this run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverrideDecisions {
    implementation: bool,
    contract: bool,
}

impl OverrideDecisions {
    pub fn new(implementation: bool, contract: bool) -> Self {
        Self {
            implementation,
            contract,
        }
    }

    pub fn get(&self, kind: ArtifactKind) -> bool {
        match kind {
            ArtifactKind::Implementation => self.implementation,
            ArtifactKind::Contract => self.contract,
        }
    }

    /// Ask once per kind, implementations first, and only for kinds that
    /// have existing files.
    pub fn resolve(existing: &ExistingArtifacts, confirm: &mut dyn Confirm) -> Result<Self> {
        let mut decisions = Self::default();
        for kind in ArtifactKind::ALL {
            let files = existing.of(kind);
            if files.is_empty() {
                continue;
            }
            let answer = confirm
                .confirm_overwrite(kind, files)
                .map_err(|source| Box::new(Error::Prompt { source }))?;
            info!(%kind, existing = files.len(), overwrite = answer, "overwrite decision");
            match kind {
                ArtifactKind::Implementation => decisions.implementation = answer,
                ArtifactKind::Contract => decisions.contract = answer,
            }
        }
        Ok(decisions)
    }
}
