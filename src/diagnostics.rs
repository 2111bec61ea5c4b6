//! Non-fatal findings collected during a compile.
//!
//! A compile never aborts on bad input. Malformed blocks, merge conflicts
//! and unreadable files are recorded as [`Diagnostic`] values, attached to
//! the finished [`Compilation`](crate::compiler::Compilation), and logged
//! once by the compiler.

use std::path::PathBuf;

use crate::classifier::HttpMethod;

/// A fragment that could not be turned into an operation or definition.
///
/// Carries the file it came from and a human-readable reason. The
/// surrounding file keeps being processed; only the one block is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedBlock {
    pub source: PathBuf,
    pub reason: String,
}

impl std::fmt::Display for MalformedBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "malformed block in {}: {}", self.source.display(), self.reason)
    }
}

impl std::error::Error for MalformedBlock {}

/// Severity of a diagnostic, used to pick the log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Note,
}

/// One non-fatal finding from a compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A block between markers that could not be classified.
    MalformedBlock(MalformedBlock),
    /// Two blocks declared the same path and method.
    OperationConflict {
        path: String,
        method: HttpMethod,
        previous: PathBuf,
        current: PathBuf,
        /// Whether the later block replaced the earlier one.
        replaced: bool,
    },
    /// Two blocks declared a definition with the same name.
    DefinitionConflict {
        name: String,
        previous: PathBuf,
        current: PathBuf,
        /// Whether the later block replaced the earlier one.
        replaced: bool,
    },
    /// A file or directory entry that could not be read.
    UnreadableFile { source: PathBuf, reason: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::UnreadableFile { .. } => Severity::Note,
            _ => Severity::Warning,
        }
    }
}

impl From<MalformedBlock> for Diagnostic {
    fn from(block: MalformedBlock) -> Self {
        Diagnostic::MalformedBlock(block)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Diagnostic::MalformedBlock(block) => write!(f, "{}", block),
            Diagnostic::OperationConflict {
                path,
                method,
                previous,
                current,
                replaced,
            } => {
                let outcome = if *replaced { "replaced by" } else { "kept over" };
                write!(
                    f,
                    "duplicate operation {} {}: {} {} {}",
                    method,
                    path,
                    previous.display(),
                    outcome,
                    current.display()
                )
            }
            Diagnostic::DefinitionConflict {
                name,
                previous,
                current,
                replaced,
            } => {
                let outcome = if *replaced { "replaced by" } else { "kept over" };
                write!(
                    f,
                    "duplicate definition `{}`: {} {} {}",
                    name,
                    previous.display(),
                    outcome,
                    current.display()
                )
            }
            Diagnostic::UnreadableFile { source, reason } => {
                write!(f, "skipped unreadable {}: {}", source.display(), reason)
            }
        }
    }
}
