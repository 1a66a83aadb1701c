//! Semantic validation of a parsed manifest.

use repogen_core::is_identifier;

use super::Manifest;
use crate::Result;
use crate::error::ConfigSource;

/// Validate the manifest after parsing.
pub(crate) fn validate_manifest(manifest: &Manifest, src: &ConfigSource<'_>) -> Result<()> {
    let namespaces = [
        ("namespaces", "models", Some(manifest.namespaces.models.as_str())),
        (
            "namespaces",
            "implementations",
            Some(manifest.namespaces.implementations.as_str()),
        ),
        ("namespaces", "contracts", Some(manifest.namespaces.contracts.as_str())),
        ("namespaces", "providers", Some(manifest.namespaces.providers.as_str())),
        (
            "base",
            "implementation_namespace",
            manifest.base.implementation_namespace.as_deref(),
        ),
        (
            "base",
            "contract_namespace",
            manifest.base.contract_namespace.as_deref(),
        ),
    ];
    for (section, key, value) in namespaces {
        if let Some(namespace) = value {
            if !is_namespace(namespace) {
                return Err(src.invalid_namespace(section, key, namespace));
            }
        }
    }

    let identifiers = [
        ("base", "implementation", manifest.base.implementation.as_str()),
        ("base", "contract", manifest.base.contract.as_str()),
        ("aggregator", "name", manifest.aggregator.name.as_str()),
        (
            "aggregator",
            "declaration_keyword",
            manifest.aggregator.declaration_keyword.as_str(),
        ),
        (
            "aggregator",
            "registration_method",
            manifest.aggregator.registration_method.as_str(),
        ),
        ("query", "active_column", manifest.query.active_column.as_str()),
    ];
    for (section, key, value) in identifiers {
        if !is_identifier(value) {
            return Err(src.invalid(
                section,
                key,
                format!("'{}.{}' must be an identifier, got '{}'", section, key, value),
            ));
        }
    }

    // An empty suffix is fine as long as the two artifact names still differ.
    if manifest.naming.implementation_suffix == manifest.naming.contract_suffix {
        return Err(src.invalid(
            "naming",
            "contract_suffix",
            "implementation and contract suffixes must differ",
        ));
    }
    let suffixes = [
        ("implementation_suffix", &manifest.naming.implementation_suffix),
        ("contract_suffix", &manifest.naming.contract_suffix),
    ];
    for (key, value) in suffixes {
        if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(src.invalid(
                "naming",
                key,
                format!("'naming.{}' must contain only letters, digits and underscores", key),
            ));
        }
    }

    let extensions = [
        ("model_extension", &manifest.naming.model_extension),
        ("output_extension", &manifest.naming.output_extension),
    ];
    for (key, value) in extensions {
        if value.is_empty() || value.starts_with('.') {
            return Err(src.invalid(
                "naming",
                key,
                format!("'naming.{}' must be a non-empty extension without a leading dot", key),
            ));
        }
    }

    Ok(())
}

/// A namespace is one or more identifiers joined by backslashes.
fn is_namespace(namespace: &str) -> bool {
    !namespace.is_empty() && namespace.split('\\').all(is_identifier)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::Error;

    #[test]
    fn test_is_namespace() {
        assert!(is_namespace("App"));
        assert!(is_namespace("App\\Repositories\\Eloquent"));
        assert!(!is_namespace(""));
        assert!(!is_namespace("App\\\\Models"));
        assert!(!is_namespace("\\App"));
        assert!(!is_namespace("App/Models"));
    }

    #[test]
    fn test_invalid_namespace_points_at_value() {
        let src = "[namespaces]\ncontracts = 'App/Contracts'\n";
        let err = Manifest::from_str(src).unwrap_err();
        match *err {
            Error::InvalidNamespace { key, span, .. } => {
                assert_eq!(key, "namespaces.contracts");
                let span = span.unwrap();
                assert_eq!(
                    &src[span.offset()..span.offset() + span.len()],
                    "'App/Contracts'"
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_identical_suffixes_rejected() {
        let err = Manifest::from_str(
            "[naming]\nimplementation_suffix = \"Repo\"\ncontract_suffix = \"Repo\"\n",
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_registration_method_must_be_identifier() {
        let err = Manifest::from_str("[aggregator]\nregistration_method = \"reg ister\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("aggregator.registration_method"));
    }

    #[test]
    fn test_extension_with_dot_rejected() {
        let err = Manifest::from_str("[naming]\nmodel_extension = \".php\"\n").unwrap_err();
        assert!(err.to_string().contains("naming.model_extension"));
    }
}
