// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The check command: scan a tree, compile every documentation snippet.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use doccheck_compiler::{CscCompiler, ReferenceSet};
use doccheck_snippets::{Checker, Classifier, RunCounters};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::Config;
use crate::report::{HumanReporter, JsonReporter};
use crate::Format;

pub fn cmd_check(root: &Path, config: &Config, format: Format) -> Result<RunCounters> {
    if !root.exists() {
        bail!("source directory not found: {}", root.display());
    }

    debug!(platform_root = %config.platform_root().display(), "resolving references");
    let references = ReferenceSet::resolve(&config.references).context("resolving reference libraries")?;
    info!(references = references.len(), "reference set ready");

    let compiler = CscCompiler::new(&config.compiler)?;
    let classifier = Classifier::new(&compiler, &references, &config.heuristic);
    let checker = Checker::new(classifier, &config.extract);

    let files = collect_source_files(root, &config.scan.extension)?;
    info!(files = files.len(), root = %root.display(), compiler = compiler.program(), "scanning");

    let counters = match format {
        Format::Human => {
            let color = io::stderr().is_terminal();
            let mut reporter = HumanReporter::new(io::stdout().lock(), io::stderr().lock()).with_color(color);
            checker.check_files(&files, &mut reporter)?
        }
        Format::Json => {
            let mut reporter = JsonReporter::new(io::stdout().lock(), root);
            checker.check_files(&files, &mut reporter)?
        }
    };

    Ok(counters)
}

/// Recursively collect files with the given extension, sorted by path.
pub fn collect_source_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().map(|e| e == extension).unwrap_or(false) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
