//! Section types of repogen.toml.

use std::path::PathBuf;

use serde::Deserialize;

/// `[paths]`: project directories, relative to the directory holding
/// repogen.toml.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory containing one definition file per entity
    pub models: PathBuf,
    /// Output directory for implementation classes
    pub implementations: PathBuf,
    /// Output directory for contracts
    pub contracts: PathBuf,
    /// Directory holding the aggregator (service provider)
    pub providers: PathBuf,
    /// Custom stub directory; the embedded stubs are used when unset
    pub stubs: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            models: PathBuf::from("app/Models"),
            implementations: PathBuf::from("app/Repositories/Eloquent"),
            contracts: PathBuf::from("app/Repositories/Interfaces"),
            providers: PathBuf::from("app/Providers"),
            stubs: None,
        }
    }
}

/// `[namespaces]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamespacesConfig {
    pub models: String,
    pub implementations: String,
    pub contracts: String,
    pub providers: String,
}

impl Default for NamespacesConfig {
    fn default() -> Self {
        Self {
            models: "App\\Models".to_string(),
            implementations: "App\\Repositories\\Eloquent".to_string(),
            contracts: "App\\Repositories\\Interfaces".to_string(),
            providers: "App\\Providers".to_string(),
        }
    }
}

/// `[naming]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    /// Appended to the entity name for implementation classes
    pub implementation_suffix: String,
    /// Appended to the entity name for contracts
    pub contract_suffix: String,
    /// Extension of entity definition files (without dot)
    pub model_extension: String,
    /// Extension of generated files (without dot)
    pub output_extension: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            implementation_suffix: "Repository".to_string(),
            contract_suffix: "RepositoryInterface".to_string(),
            model_extension: "php".to_string(),
            output_extension: "php".to_string(),
        }
    }
}

/// `[base]`: shared base classes every generated artifact extends.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BaseConfig {
    /// Class name of the base implementation
    pub implementation: String,
    /// Class name of the base contract
    pub contract: String,
    /// Namespace of the base implementation (defaults to `namespaces.implementations`)
    pub implementation_namespace: Option<String>,
    /// Namespace of the base contract (defaults to `namespaces.contracts`)
    pub contract_namespace: Option<String>,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            implementation: "Repository".to_string(),
            contract: "RepositoryInterface".to_string(),
            implementation_namespace: None,
            contract_namespace: None,
        }
    }
}

/// `[aggregator]`: the service provider wiring contracts to implementations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AggregatorConfig {
    /// Class name of the aggregator, also its file stem
    pub name: String,
    /// Keyword that opens the aggregator's type declaration
    pub declaration_keyword: String,
    /// Method whose body receives binding registrations
    pub registration_method: String,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            name: "RepositoryServiceProvider".to_string(),
            declaration_keyword: "class".to_string(),
            registration_method: "register".to_string(),
        }
    }
}

/// `[query]`: values baked into the generated query helpers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    /// Column filtered by the `active()` helper
    pub active_column: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            active_column: "active".to_string(),
        }
    }
}
