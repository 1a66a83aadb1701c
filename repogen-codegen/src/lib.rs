// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Generation-and-patch engine for the repogen repository generator.
//!
//! # Module Organization
//!
//! - [`stub`] - Stub templates (embedded or loaded from a directory) and rendering
//! - [`lexer`] - Lossless tokenizer producing a [`lexer::TokenStream`]
//! - [`patcher`] - Anchor predicates and the two-pass aggregator patcher
//! - [`planner`] - Entity discovery, existing-file sets and overwrite decisions
//! - [`bootstrap`] - First-run creation of the aggregator and base classes
//! - [`generator`] - The orchestrator tying everything together

pub mod bootstrap;
pub mod confirm;
mod diagnostic;
mod error;
pub mod generator;
pub mod lexer;
pub mod patcher;
pub mod planner;
pub mod stub;

pub use confirm::{AlwaysNo, AlwaysYes, Confirm, Scripted};
pub use diagnostic::{Diagnostic, Severity, Stage};
pub use error::{Error, Result};
pub use generator::{GenerateOptions, GenerateOutcome, Generator};
pub use planner::{Action, ArtifactKind};
