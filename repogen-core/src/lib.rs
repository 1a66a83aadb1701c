//! Core utilities and types for the repogen generator.
//!
//! This crate provides the file writing primitives and naming helpers
//! shared by the manifest, codegen and CLI crates.

mod file;
mod naming;

// File operations
pub use file::{File, Overwrite, WriteResult, ensure_dir, is_writable};
// Naming utilities
pub use naming::{is_identifier, namespace_of, qualify, suffix};
