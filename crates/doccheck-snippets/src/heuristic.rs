// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Recognizing failures that are artifacts of compiling a snippet alone.
//!
//! Documentation examples reference resource identifiers (`aws_instance`),
//! implicit `data` blocks and the like that only resolve inside a complete
//! program. The matching is tied to one compiler's message wording, so it
//! sits behind [`UnresolvedSymbolHeuristic`].

use serde::Deserialize;

pub trait UnresolvedSymbolHeuristic {
    /// Whether a failing diagnostic is an expected unresolved name.
    fn is_expected_unresolved(&self, code: &str, message: &str, prefixes: &[String]) -> bool;
}

/// Matches the C# compiler's "name does not exist" error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UndefinedNameHeuristic {
    /// Diagnostic code for an undefined name.
    pub undefined_name_code: String,
    /// Text between a provider prefix and the rest of the identifier.
    pub prefix_separator: String,
    /// Names that are never resolvable in a standalone snippet.
    pub context_free_names: Vec<String>,
}

impl Default for UndefinedNameHeuristic {
    fn default() -> Self {
        Self {
            undefined_name_code: "CS0103".to_string(),
            prefix_separator: "_".to_string(),
            context_free_names: vec!["data".to_string(), "var".to_string()],
        }
    }
}

impl UnresolvedSymbolHeuristic for UndefinedNameHeuristic {
    fn is_expected_unresolved(&self, code: &str, message: &str, prefixes: &[String]) -> bool {
        if code != self.undefined_name_code {
            return false;
        }

        let Some(rest) = message.strip_prefix("The name '") else {
            return false;
        };

        if prefixes
            .iter()
            .any(|p| rest.strip_prefix(p.as_str()).is_some_and(|r| r.starts_with(&self.prefix_separator)))
        {
            return true;
        }

        self.context_free_names
            .iter()
            .any(|name| message == format!("The name '{}' does not exist in the current context", name))
    }
}
