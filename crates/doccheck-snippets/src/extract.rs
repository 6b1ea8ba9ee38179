// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Extract code snippets from documentation comments.
//!
//! Scans for a fenced block written inside `///` comments:
//! ```text
//!     /// ```csharp
//!     /// var x = 1;
//!     /// ```
//! ```
//! Fence lines are matched exactly, whole line. Content lines lose a fixed
//! number of leading characters (the comment prefix) and get `&gt;`/`&lt;`
//! turned back into `>`/`<`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// How snippets are recognized inside a source file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Line that opens a snippet.
    pub open_fence: String,
    /// Line that closes a snippet.
    pub close_fence: String,
    /// Characters stripped from the start of every content line.
    pub prefix_width: usize,
    /// Substring that flags a snippet as unfinished.
    pub marker: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            open_fence: "    /// ```csharp".to_string(),
            close_fence: "    /// ```".to_string(),
            prefix_width: 8,
            marker: "TODO".to_string(),
        }
    }
}

/// A code block lifted out of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// File the snippet came from
    pub path: PathBuf,
    /// Line of the opening fence (1-indexed)
    pub line: usize,
    /// Content lines, each terminated by `\n`
    pub code: String,
}

impl Snippet {
    pub fn contains_marker(&self, marker: &str) -> bool {
        !marker.is_empty() && self.code.contains(marker)
    }
}

enum State {
    Outside,
    Inside { line: usize, code: String },
}

/// Extract every complete snippet from `lines`, in document order.
///
/// A block still open when the input ends is dropped. An opening fence seen
/// inside a block starts the block over.
pub fn extract_snippets<'a, I>(path: &Path, lines: I, config: &ExtractConfig) -> Vec<Snippet>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut snippets = Vec::new();
    let mut state = State::Outside;

    for (idx, line) in lines.into_iter().enumerate() {
        if line == config.open_fence {
            state = State::Inside {
                line: idx + 1,
                code: String::new(),
            };
            continue;
        }

        if let State::Inside { line: start, code } = &mut state {
            if line == config.close_fence {
                snippets.push(Snippet {
                    path: path.to_path_buf(),
                    line: *start,
                    code: std::mem::take(code),
                });
                state = State::Outside;
            } else {
                code.push_str(&unescape(strip_prefix(line, config.prefix_width)));
                code.push('\n');
            }
        }
    }

    snippets
}

/// Drop the first `width` characters; shorter lines become empty.
fn strip_prefix(line: &str, width: usize) -> &str {
    match line.char_indices().nth(width) {
        Some((i, _)) => &line[i..],
        None => "",
    }
}

fn unescape(text: &str) -> String {
    text.replace("&gt;", ">").replace("&lt;", "<")
}
