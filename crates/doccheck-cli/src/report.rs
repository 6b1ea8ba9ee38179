// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Reporters for the human audit trail and the JSON report.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use doccheck_diagnostics::json::{to_json_diagnostics, JsonDiagnostic};
use doccheck_snippets::{Classification, Reporter, RunCounters, Snippet, Verdict};
use serde::Serialize;

use crate::output;

pub const SEPARATOR: &str = "==============================================";

/// Line-oriented output: notices and failure blocks on `out`, one
/// `CODE: message` line per failing diagnostic on `err`, summary on `out`.
///
/// Codes on `err` are only styled after `with_color(true)`; the caller
/// decides from whether `err` is a terminal.
pub struct HumanReporter<O: Write, E: Write> {
    out: O,
    err: E,
    color: bool,
}

impl<O: Write, E: Write> HumanReporter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err, color: false }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    #[cfg(test)]
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> Reporter for HumanReporter<O, E> {
    fn todo(&mut self, snippet: &Snippet) -> io::Result<()> {
        writeln!(self.out, "TODO: {}", snippet.path.display())
    }

    fn classified(&mut self, snippet: &Snippet, result: &Classification) -> io::Result<()> {
        let Verdict::Unknown { failures } = &result.verdict else {
            return Ok(());
        };

        writeln!(self.out, "{}", SEPARATOR)?;
        writeln!(self.out, "{}", snippet.path.display())?;
        self.out.flush()?;
        for diag in failures {
            if self.color {
                writeln!(self.err, "{}: {}", output::diagnostic_code(diag.code_str()), diag.message)?;
            } else {
                writeln!(self.err, "{}", diag)?;
            }
        }
        self.err.flush()
    }

    fn finish(&mut self, counters: &RunCounters) -> io::Result<()> {
        writeln!(self.out, "{}", counters)?;
        self.out.flush()
    }
}

/// A whole run as one JSON document.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Schema version for forward compatibility.
    pub version: u32,
    pub root: PathBuf,
    pub counters: RunCounters,
    pub snippets: Vec<SnippetReport>,
}

#[derive(Debug, Serialize)]
pub struct SnippetReport {
    pub file: PathBuf,
    pub line: usize,
    pub verdict: &'static str,
    pub todo: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<JsonDiagnostic>,
}

/// Collects snippet results and writes the report when the run finishes.
pub struct JsonReporter<O: Write> {
    out: O,
    root: PathBuf,
    snippets: Vec<SnippetReport>,
}

impl<O: Write> JsonReporter<O> {
    pub fn new(out: O, root: &Path) -> Self {
        Self {
            out,
            root: root.to_path_buf(),
            snippets: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> O {
        self.out
    }
}

impl<O: Write> Reporter for JsonReporter<O> {
    fn todo(&mut self, _snippet: &Snippet) -> io::Result<()> {
        Ok(())
    }

    fn classified(&mut self, snippet: &Snippet, result: &Classification) -> io::Result<()> {
        let diagnostics = match &result.verdict {
            Verdict::Unknown { failures } => to_json_diagnostics(failures),
            _ => Vec::new(),
        };
        self.snippets.push(SnippetReport {
            file: snippet.path.clone(),
            line: snippet.line,
            verdict: result.verdict.name(),
            todo: result.todo,
            diagnostics,
        });
        Ok(())
    }

    fn finish(&mut self, counters: &RunCounters) -> io::Result<()> {
        let report = RunReport {
            version: 1,
            root: self.root.clone(),
            counters: *counters,
            snippets: std::mem::take(&mut self.snippets),
        };
        serde_json::to_writer_pretty(&mut self.out, &report)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
