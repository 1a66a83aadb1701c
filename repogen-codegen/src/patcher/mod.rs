//! Two-pass patcher for the aggregator file.
//!
//! Pass A inserts an import for the contract above the type declaration,
//! pass B inserts the binding registration at the top of the registration
//! method body. Both passes work on a flat token stream; everything outside
//! the inserted fragments is reproduced byte for byte.

mod anchor;

use std::path::Path;

pub use anchor::{Anchor, AnchorMatch, BlockAfterName, DeclarationAnchor};
use repogen_manifest::Manifest;
use tracing::{debug, warn};

use crate::lexer::{TokenStream, tokenize, tokenize_fragment};
use crate::stub::{ScratchBuffer, Stub, StubSet, Substitutions};
use crate::{Error, Result};

/// Contract → implementation pair to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Fully qualified contract name
    pub contract: String,
    /// Fully qualified implementation name
    pub implementation: String,
}

impl Binding {
    pub fn new(contract: impl Into<String>, implementation: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
            implementation: implementation.into(),
        }
    }

    /// Text of the import statement, without the terminator.
    pub fn import_statement(&self) -> String {
        format!("use {}", self.contract.trim_start_matches('\\'))
    }

    /// Text of the registration call, without the terminator.
    pub fn registration(&self) -> String {
        format!(
            "$this->app->bind(\\{}::class, \\{}::class)",
            self.contract.trim_start_matches('\\'),
            self.implementation.trim_start_matches('\\')
        )
    }
}

/// Result of one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Fragment spliced with its first token at `index`
    Inserted { index: usize },
    /// The fragment's significant tokens were already in the file
    AlreadyPresent,
    /// The anchor predicate matched nothing; the pass did not change the file
    AnchorNotFound { anchor: String },
}

impl PatchOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, PatchOutcome::Inserted { .. })
    }

    /// Description of the missing anchor, if any.
    pub fn missing_anchor(&self) -> Option<&str> {
        match self {
            PatchOutcome::AnchorNotFound { anchor } => Some(anchor),
            _ => None,
        }
    }
}

/// Patched text plus the outcome of each pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchResult {
    pub source: String,
    pub import: PatchOutcome,
    pub binding: PatchOutcome,
}

impl PatchResult {
    /// Whether either pass changed the text.
    pub fn changed(&self) -> bool {
        self.import.is_inserted() || self.binding.is_inserted()
    }
}

/// Owns the two scratch buffers and the anchors for one aggregator.
#[derive(Debug, Clone)]
pub struct Patcher {
    import: ScratchBuffer,
    binding: ScratchBuffer,
    declaration: DeclarationAnchor,
    registration: BlockAfterName,
    strict: bool,
}

impl Patcher {
    pub fn new(
        use_stub: Stub,
        binding_stub: Stub,
        declaration: DeclarationAnchor,
        registration: BlockAfterName,
    ) -> Self {
        Self {
            import: ScratchBuffer::new(use_stub),
            binding: ScratchBuffer::new(binding_stub),
            declaration,
            registration,
            strict: false,
        }
    }

    /// Fail instead of warning when an anchor is missing.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Patcher configured from the `[aggregator]` section.
    pub fn from_manifest(stubs: &StubSet, manifest: &Manifest) -> Self {
        Self::new(
            stubs.use_statement.clone(),
            stubs.binding.clone(),
            DeclarationAnchor::new(&manifest.aggregator.declaration_keyword),
            BlockAfterName::new(&manifest.aggregator.registration_method),
        )
    }

    /// Both scratch buffers hold only their templates.
    pub fn is_pristine(&self) -> bool {
        self.import.is_pristine() && self.binding.is_pristine()
    }

    /// Run both passes over `source`.
    pub fn patch_source(&mut self, source: &str, binding: &Binding) -> PatchResult {
        let scratch = ScratchGuard {
            import: &mut self.import,
            binding: &mut self.binding,
        };

        let mut stream = tokenize(source);
        let fragment = scratch
            .import
            .fill(&Substitutions::new().set("__USE_STATEMENT__", binding.import_statement()));
        let import = splice(&mut stream, &self.declaration, fragment);

        let mut stream = tokenize(&stream.to_source());
        let fragment = scratch
            .binding
            .fill(&Substitutions::new().set("__BINDING__", binding.registration()));
        let registration = splice(&mut stream, &self.registration, fragment);

        PatchResult {
            source: stream.to_source(),
            import,
            binding: registration,
        }
    }

    /// Patch the file at `path`, writing it once if anything was inserted.
    ///
    /// In strict mode a missing anchor fails the patch and nothing is written.
    pub fn patch_file(&mut self, path: &Path, binding: &Binding) -> Result<PatchResult> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        let result = self.patch_source(&source, binding);

        for outcome in [&result.import, &result.binding] {
            if let Some(anchor) = outcome.missing_anchor() {
                if self.strict {
                    return Err(Box::new(Error::AnchorMissing {
                        anchor: anchor.to_string(),
                        path: path.to_path_buf(),
                    }));
                }
                warn!(path = %path.display(), anchor, "anchor not found, pass skipped");
            }
        }

        if result.changed() {
            std::fs::write(path, &result.source).map_err(|e| Error::write(path, e))?;
        }
        Ok(result)
    }
}

/// Resets both scratch buffers when a patch ends, however it ends.
struct ScratchGuard<'a> {
    import: &'a mut ScratchBuffer,
    binding: &'a mut ScratchBuffer,
}

impl Drop for ScratchGuard<'_> {
    fn drop(&mut self) {
        self.import.reset();
        self.binding.reset();
    }
}

fn splice(stream: &mut TokenStream, anchor: &dyn Anchor, fragment: &str) -> PatchOutcome {
    let fragment = tokenize_fragment(fragment);
    if stream.contains_significant(&fragment) {
        debug!(anchor = %anchor.describe(), "fragment already present");
        return PatchOutcome::AlreadyPresent;
    }

    match anchor.locate(stream) {
        Some(found) => {
            debug!(
                anchor = %anchor.describe(),
                line = stream.line_of(found.token),
                index = found.insert_at,
                "splicing fragment"
            );
            stream.splice(found.insert_at, fragment);
            PatchOutcome::Inserted {
                index: found.insert_at,
            }
        }
        None => PatchOutcome::AnchorNotFound {
            anchor: anchor.describe(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::{StubName, StubSource};

    const PROVIDER: &str = "<?php\n\nnamespace App\\Providers;\n\nuse Illuminate\\Support\\ServiceProvider;\n\nclass RepositoryServiceProvider extends ServiceProvider\n{\n    public function register()\n    {\n    }\n}\n";

    fn patcher() -> Patcher {
        Patcher::new(
            StubSource::Embedded.load(StubName::Use).unwrap(),
            StubSource::Embedded.load(StubName::Binding).unwrap(),
            DeclarationAnchor::new("class"),
            BlockAfterName::new("register"),
        )
    }

    fn user_binding() -> Binding {
        Binding::new(
            "App\\Repositories\\Interfaces\\UserRepositoryInterface",
            "App\\Repositories\\Eloquent\\UserRepository",
        )
    }

    #[test]
    fn test_binding_text() {
        let binding = user_binding();
        assert_eq!(
            binding.import_statement(),
            "use App\\Repositories\\Interfaces\\UserRepositoryInterface"
        );
        assert_eq!(
            binding.registration(),
            "$this->app->bind(\\App\\Repositories\\Interfaces\\UserRepositoryInterface::class, \\App\\Repositories\\Eloquent\\UserRepository::class)"
        );
    }

    #[test]
    fn test_patch_inserts_import_and_binding() {
        let mut patcher = patcher();
        let result = patcher.patch_source(PROVIDER, &user_binding());

        assert!(result.import.is_inserted());
        assert!(result.binding.is_inserted());
        insta::assert_snapshot!(result.source, @r"
        <?php

        namespace App\Providers;

        use Illuminate\Support\ServiceProvider;
        use App\Repositories\Interfaces\UserRepositoryInterface;

        class RepositoryServiceProvider extends ServiceProvider
        {
            public function register()
            {
                $this->app->bind(\App\Repositories\Interfaces\UserRepositoryInterface::class, \App\Repositories\Eloquent\UserRepository::class);
            }
        }
        ");
        assert!(patcher.is_pristine());
    }

    #[test]
    fn test_import_lands_above_attributes() {
        let source = PROVIDER.replace("class Repository", "#[Deferred]\nclass Repository");
        let result = patcher().patch_source(&source, &user_binding());

        assert!(result.import.is_inserted());
        assert!(result.source.contains(
            "use App\\Repositories\\Interfaces\\UserRepositoryInterface;\n\n#[Deferred]\nclass RepositoryServiceProvider"
        ));
    }

    #[test]
    fn test_patch_is_idempotent() {
        let mut patcher = patcher();
        let once = patcher.patch_source(PROVIDER, &user_binding());
        let twice = patcher.patch_source(&once.source, &user_binding());

        assert_eq!(twice.import, PatchOutcome::AlreadyPresent);
        assert_eq!(twice.binding, PatchOutcome::AlreadyPresent);
        assert!(!twice.changed());
        assert_eq!(twice.source, once.source);
        assert_eq!(twice.source.matches("use App\\Repositories\\Interfaces\\UserRepositoryInterface;").count(), 1);
        assert_eq!(twice.source.matches("$this->app->bind(").count(), 1);
    }

    #[test]
    fn test_second_entity_keeps_first() {
        let mut patcher = patcher();
        let first = patcher.patch_source(PROVIDER, &user_binding());
        let post = Binding::new(
            "App\\Repositories\\Interfaces\\PostRepositoryInterface",
            "App\\Repositories\\Eloquent\\PostRepository",
        );
        let second = patcher.patch_source(&first.source, &post);

        assert!(second.changed());
        assert_eq!(second.source.matches("$this->app->bind(").count(), 2);
        let user = second.source.find("use App\\Repositories\\Interfaces\\UserRepositoryInterface;").unwrap();
        let post = second.source.find("use App\\Repositories\\Interfaces\\PostRepositoryInterface;").unwrap();
        assert!(user < post);
    }

    #[test]
    fn test_missing_registration_method_only_skips_binding() {
        let source = PROVIDER.replace("register", "boot");
        let mut patcher = patcher();
        let result = patcher.patch_source(&source, &user_binding());

        assert!(result.import.is_inserted());
        assert_eq!(
            result.binding,
            PatchOutcome::AnchorNotFound {
                anchor: "'register' method body".to_string()
            }
        );
        assert!(result.source.contains("use App\\Repositories\\Interfaces\\UserRepositoryInterface;"));
        assert!(!result.source.contains("$this->app->bind("));
        assert!(patcher.is_pristine());
    }

    #[test]
    fn test_missing_declaration_leaves_text_untouched() {
        let source = "<?php\n\nfunction register()\n{\n}\n";
        let mut patcher = patcher();
        let result = patcher.patch_source(source, &user_binding());

        assert_eq!(result.import.missing_anchor(), Some("'class' declaration"));
        assert!(result.binding.is_inserted());
        assert!(result.source.starts_with(source.split('{').next().unwrap()));
    }

    #[test]
    fn test_untouched_bytes_survive() {
        let source = PROVIDER.replace(
            "    public function register()",
            "    // keep   this\r\n    public function register()",
        );
        let mut patcher = patcher();
        let result = patcher.patch_source(&source, &user_binding());
        assert!(result.source.contains("    // keep   this\r\n"));
        assert!(result.source.ends_with("    }\n}\n"));
    }

    #[test]
    fn test_patch_file_writes_once_when_changed() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("RepositoryServiceProvider.php");
        std::fs::write(&path, PROVIDER).unwrap();

        let mut patcher = patcher();
        let first = patcher.patch_file(&path, &user_binding()).unwrap();
        assert!(first.changed());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), first.source);

        let second = patcher.patch_file(&path, &user_binding()).unwrap();
        assert!(!second.changed());
        assert!(patcher.is_pristine());
    }

    #[test]
    fn test_strict_patch_file_leaves_file_alone() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("RepositoryServiceProvider.php");
        let source = PROVIDER.replace("register", "boot");
        std::fs::write(&path, &source).unwrap();

        let mut patcher = patcher().strict(true);
        let err = patcher.patch_file(&path, &user_binding()).unwrap_err();
        match *err {
            Error::AnchorMissing { anchor, .. } => assert_eq!(anchor, "'register' method body"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), source);
        assert!(patcher.is_pristine());
    }

    #[test]
    fn test_patch_file_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut patcher = patcher();
        let err = patcher
            .patch_file(&temp.path().join("missing.php"), &user_binding())
            .unwrap_err();
        assert!(matches!(*err, Error::Read { .. }));
        assert!(patcher.is_pristine());
    }
}
