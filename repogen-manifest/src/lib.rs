// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Configuration for the repogen generator.
//!
//! A project is described by a `repogen.toml` file. Every key has a default
//! matching the conventional Laravel layout, so an empty file is a valid
//! configuration.

mod error;
mod manifest;

pub use error::{Error, Result};
pub use manifest::{
    AggregatorConfig, BaseConfig, CONFIG_FILE_NAME, Manifest, NamespacesConfig, NamingConfig,
    PathsConfig, ProjectLayout, QueryConfig, RepogenToml,
};
