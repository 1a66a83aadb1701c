//! Manifest types and parsing for repogen.toml files.

mod file;
mod layout;
mod parse;
mod sections;
mod validate;

pub use file::{CONFIG_FILE_NAME, RepogenToml};
pub use layout::ProjectLayout;
use serde::Deserialize;
pub use sections::{
    AggregatorConfig, BaseConfig, NamespacesConfig, NamingConfig, PathsConfig, QueryConfig,
};

/// Root manifest for repogen.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    pub paths: PathsConfig,
    pub namespaces: NamespacesConfig,
    pub naming: NamingConfig,
    pub base: BaseConfig,
    pub aggregator: AggregatorConfig,
    pub query: QueryConfig,
}

impl Manifest {
    /// Namespace of the base implementation class.
    pub fn base_implementation_namespace(&self) -> &str {
        self.base
            .implementation_namespace
            .as_deref()
            .unwrap_or(&self.namespaces.implementations)
    }

    /// Namespace of the base contract.
    pub fn base_contract_namespace(&self) -> &str {
        self.base
            .contract_namespace
            .as_deref()
            .unwrap_or(&self.namespaces.contracts)
    }

    /// Fully qualified name of the base implementation class.
    pub fn base_implementation_fqn(&self) -> String {
        repogen_core::qualify(
            self.base_implementation_namespace(),
            &self.base.implementation,
        )
    }

    /// Fully qualified name of the base contract.
    pub fn base_contract_fqn(&self) -> String {
        repogen_core::qualify(self.base_contract_namespace(), &self.base.contract)
    }

    /// Fully qualified name of the aggregator class.
    pub fn aggregator_fqn(&self) -> String {
        repogen_core::qualify(&self.namespaces.providers, &self.aggregator.name)
    }
}
