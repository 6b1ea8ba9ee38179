// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Errors that abort a check run.

use std::io;
use std::path::PathBuf;

use doccheck_compiler::CompilerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Compiler(#[from] CompilerError),

    #[error("writing report: {0}")]
    Report(#[from] io::Error),
}
