// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The compiler capability consumed by the snippet checker.
//!
//! A [`Compiler`] takes one standalone compilation unit plus the fixed
//! [`ReferenceSet`] and reports whether it built, together with everything the
//! frontend had to say about it. [`CscCompiler`] drives a command-line C#
//! compiler; any other frontend can be substituted by implementing the trait.

pub mod csc;
pub mod error;
pub mod references;

use doccheck_diagnostics::Diagnostic;

pub use csc::{CscCompiler, CscConfig};
pub use error::CompilerError;
pub use references::{DependencyConfig, Reference, ReferenceKind, ReferenceSet, ReferencesConfig};

/// Result of compiling one snippet.
#[derive(Debug, Clone, Default)]
pub struct CompileOutput {
    pub success: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutput {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            diagnostics: Vec::new(),
        }
    }

    pub fn failed(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            success: false,
            diagnostics,
        }
    }

    /// Diagnostics that caused the failure: errors and escalated warnings.
    pub fn failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_failure())
    }
}

/// Compiles a source fragment as a library against a set of references.
///
/// The fragment is always handed to the frontend as-is; parse problems show
/// up as diagnostics of the compile step. `Err` is reserved for
/// infrastructure failures (the compiler could not be run at all).
pub trait Compiler {
    fn compile(&self, source: &str, references: &ReferenceSet) -> Result<CompileOutput, CompilerError>;
}

impl<C: Compiler + ?Sized> Compiler for &C {
    fn compile(&self, source: &str, references: &ReferenceSet) -> Result<CompileOutput, CompilerError> {
        (**self).compile(source, references)
    }
}
