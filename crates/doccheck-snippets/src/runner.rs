// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Drive extraction and classification over files and tally the results.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io;
use std::ops::AddAssign;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classify::{Classification, Classifier, Verdict};
use crate::error::CheckError;
use crate::extract::{extract_snippets, ExtractConfig, Snippet};

/// Summary statistics for a check run.
///
/// `invalid == unresolved + unknown` always holds; `todo` counts flagged
/// snippets regardless of how they compiled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunCounters {
    pub valid: u64,
    pub invalid: u64,
    pub todo: u64,
    pub unresolved: u64,
    pub unknown: u64,
}

impl RunCounters {
    pub fn add(&mut self, result: &Classification) {
        if result.todo {
            self.todo += 1;
        }
        match result.verdict {
            Verdict::Valid => self.valid += 1,
            Verdict::ExpectedUnresolved => {
                self.invalid += 1;
                self.unresolved += 1;
            }
            Verdict::Unknown { .. } => {
                self.invalid += 1;
                self.unknown += 1;
            }
        }
    }

    /// Snippets compiled so far.
    pub fn total(&self) -> u64 {
        self.valid + self.invalid
    }
}

impl AddAssign for RunCounters {
    fn add_assign(&mut self, other: Self) {
        self.valid += other.valid;
        self.invalid += other.invalid;
        self.todo += other.todo;
        self.unresolved += other.unresolved;
        self.unknown += other.unknown;
    }
}

/// The summary line printed at the end of a run.
impl fmt::Display for RunCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Valid: {}, invalid: {}, todo: {}, unresolved: {}, unknown: {}",
            self.valid, self.invalid, self.todo, self.unresolved, self.unknown
        )
    }
}

/// Receives run events as they happen.
pub trait Reporter {
    /// A snippet carries the marker. Called before it is compiled.
    fn todo(&mut self, snippet: &Snippet) -> io::Result<()>;

    /// A snippet has been classified.
    fn classified(&mut self, snippet: &Snippet, result: &Classification) -> io::Result<()>;

    /// All files are done.
    fn finish(&mut self, counters: &RunCounters) -> io::Result<()>;
}

/// Runs the extract → classify pipeline, one file and one snippet at a time.
pub struct Checker<'a> {
    classifier: Classifier<'a>,
    extract: &'a ExtractConfig,
}

impl<'a> Checker<'a> {
    pub fn new(classifier: Classifier<'a>, extract: &'a ExtractConfig) -> Self {
        Self { classifier, extract }
    }

    /// Check every file and report the totals.
    pub fn check_files<I, P>(&self, paths: I, reporter: &mut dyn Reporter) -> Result<RunCounters, CheckError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut counters = RunCounters::default();
        let mut files = 0usize;
        for path in paths {
            counters += self.check_file(path.as_ref(), reporter)?;
            files += 1;
        }
        info!(files, snippets = counters.total(), "check finished");
        reporter.finish(&counters)?;
        Ok(counters)
    }

    /// Read one file and check its snippets. Bytes that are not valid
    /// UTF-8 are replaced, only I/O failures abort.
    pub fn check_file(&self, path: &Path, reporter: &mut dyn Reporter) -> Result<RunCounters, CheckError> {
        let bytes = fs::read(path).map_err(|source| CheckError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            warn!(path = %path.display(), "file is not valid UTF-8, invalid bytes replaced");
        }
        self.check_source(path, &content, reporter)
    }

    /// Check the snippets of already-loaded file content.
    pub fn check_source(
        &self,
        path: &Path,
        content: &str,
        reporter: &mut dyn Reporter,
    ) -> Result<RunCounters, CheckError> {
        let snippets = extract_snippets(path, content.lines(), self.extract);
        debug!(path = %path.display(), snippets = snippets.len(), "scanned file");

        let mut counters = RunCounters::default();
        for snippet in &snippets {
            let result = self.check_snippet(snippet, reporter)?;
            counters.add(&result);
        }
        Ok(counters)
    }

    fn check_snippet(&self, snippet: &Snippet, reporter: &mut dyn Reporter) -> Result<Classification, CheckError> {
        let todo = snippet.contains_marker(&self.extract.marker);
        if todo {
            reporter.todo(snippet)?;
        }

        let verdict = self.classifier.classify(snippet)?;
        let result = Classification { verdict, todo };
        reporter.classified(snippet, &result)?;
        Ok(result)
    }
}
