//! Overwrite confirmation.
//!
//! The generator asks at most one question per artifact kind. Where the
//! answer comes from is up to the caller: the CLI prompts on the terminal,
//! tests and `--yes`/`--no` runs answer up front.

use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;

use crate::ArtifactKind;

/// Source of answers to "overwrite the existing files of this kind?".
pub trait Confirm {
    /// Ask whether every file in `existing` may be overwritten.
    ///
    /// Only called when `existing` is nonempty.
    fn confirm_overwrite(&mut self, kind: ArtifactKind, existing: &[PathBuf]) -> io::Result<bool>;
}

/// Answers yes to every question.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysYes;

impl Confirm for AlwaysYes {
    fn confirm_overwrite(&mut self, _: ArtifactKind, _: &[PathBuf]) -> io::Result<bool> {
        Ok(true)
    }
}

/// Answers no to every question.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysNo;

impl Confirm for AlwaysNo {
    fn confirm_overwrite(&mut self, _: ArtifactKind, _: &[PathBuf]) -> io::Result<bool> {
        Ok(false)
    }
}

/// Replays a fixed list of answers and records every question asked.
///
/// Asking more questions than there are answers is an error.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    answers: VecDeque<bool>,
    asked: Vec<(ArtifactKind, Vec<PathBuf>)>,
}

impl Scripted {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> &[(ArtifactKind, Vec<PathBuf>)] {
        &self.asked
    }

    /// Kinds asked about so far, in order.
    pub fn asked_kinds(&self) -> Vec<ArtifactKind> {
        self.asked.iter().map(|(kind, _)| *kind).collect()
    }
}

impl Confirm for Scripted {
    fn confirm_overwrite(&mut self, kind: ArtifactKind, existing: &[PathBuf]) -> io::Result<bool> {
        self.asked.push((kind, existing.to_vec()));
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no scripted answer left for the {kind} prompt"),
            )
        })
    }
}
