// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Compiler infrastructure errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop the whole run. Broken snippets are never reported
/// through this type; they come back as diagnostics.
#[derive(Debug, Error)]
pub enum CompilerError {
    #[error("reference library not found: {}", path.display())]
    MissingReference { path: PathBuf },

    #[error("no compiler command configured")]
    NoCommand,

    #[error("failed to run compiler `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("compiler scratch space: {0}")]
    Scratch(#[from] io::Error),
}
