// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Checking code examples embedded in documentation comments.
//!
//! The pipeline has two stages:
//!
//! 1. [`extract`] pulls fenced code blocks out of `///` comments:
//!
//!    ```text
//!        /// ```csharp
//!        /// var bucket = new Aws.S3.Bucket("b");
//!        /// ```
//!    ```
//!
//! 2. [`classify`] compiles each block on its own against the fixed reference
//!    set and sorts failures into "expected" (the snippet names something that
//!    only exists in a full program) and "unknown" (a real problem).
//!
//! [`runner`] drives both stages over files and folds the outcomes into
//! [`RunCounters`].

pub mod classify;
pub mod error;
pub mod extract;
pub mod heuristic;
pub mod runner;

pub use classify::{Classification, Classifier, Verdict};
pub use error::CheckError;
pub use extract::{extract_snippets, ExtractConfig, Snippet};
pub use heuristic::{UndefinedNameHeuristic, UnresolvedSymbolHeuristic};
pub use runner::{Checker, Reporter, RunCounters};
