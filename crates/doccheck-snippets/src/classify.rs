// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Compile a snippet and classify the outcome.

use doccheck_compiler::{Compiler, CompilerError, ReferenceSet};
use doccheck_diagnostics::Diagnostic;
use tracing::debug;

use crate::extract::Snippet;
use crate::heuristic::UnresolvedSymbolHeuristic;

/// How a snippet fared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Compiled cleanly.
    Valid,
    /// Failed only on names that a standalone snippet cannot resolve.
    ExpectedUnresolved,
    /// Failed for some other reason; carries the failing diagnostics.
    Unknown { failures: Vec<Diagnostic> },
}

impl Verdict {
    pub fn name(&self) -> &'static str {
        match self {
            Verdict::Valid => "valid",
            Verdict::ExpectedUnresolved => "unresolved",
            Verdict::Unknown { .. } => "unknown",
        }
    }
}

/// Verdict plus the marker flag, which is tracked independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub verdict: Verdict,
    pub todo: bool,
}

/// Compiles snippets against one reference set.
pub struct Classifier<'a> {
    compiler: &'a dyn Compiler,
    references: &'a ReferenceSet,
    heuristic: &'a dyn UnresolvedSymbolHeuristic,
    prefixes: Vec<String>,
}

impl<'a> Classifier<'a> {
    pub fn new(
        compiler: &'a dyn Compiler,
        references: &'a ReferenceSet,
        heuristic: &'a dyn UnresolvedSymbolHeuristic,
    ) -> Self {
        let prefixes = references.prefixes().map(str::to_string).collect();
        Self {
            compiler,
            references,
            heuristic,
            prefixes,
        }
    }

    /// Compile `snippet` as a library and classify the result.
    pub fn classify(&self, snippet: &Snippet) -> Result<Verdict, CompilerError> {
        let output = self.compiler.compile(&snippet.code, self.references)?;

        let verdict = if output.success {
            Verdict::Valid
        } else {
            let failures: Vec<Diagnostic> = output.failures().cloned().collect();
            classify_failures(failures, self.heuristic, &self.prefixes)
        };

        debug!(
            path = %snippet.path.display(),
            line = snippet.line,
            verdict = verdict.name(),
            "classified snippet"
        );
        Ok(verdict)
    }
}

/// All-or-nothing: a failed compile is expected only when every failing
/// diagnostic is an expected unresolved name. No failures at all is unknown.
pub fn classify_failures(
    failures: Vec<Diagnostic>,
    heuristic: &dyn UnresolvedSymbolHeuristic,
    prefixes: &[String],
) -> Verdict {
    let all_expected = !failures.is_empty()
        && failures
            .iter()
            .all(|d| heuristic.is_expected_unresolved(d.code_str(), &d.message, prefixes));

    if all_expected {
        Verdict::ExpectedUnresolved
    } else {
        Verdict::Unknown { failures }
    }
}
