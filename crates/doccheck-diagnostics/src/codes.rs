// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error code registry.
//!
//! Maps the C# compiler codes that documentation snippets commonly trip over
//! (CS0103, CS1002, etc.) to titles and categories. Used to group failures in
//! the JSON report.

use std::collections::HashMap;

/// Registry of known error codes.
pub struct ErrorCodeRegistry {
    codes: HashMap<&'static str, ErrorCodeInfo>,
}

/// Information about a single error code.
pub struct ErrorCodeInfo {
    pub code: &'static str,
    pub title: &'static str,
    pub category: ErrorCategory,
}

/// Error category for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Syntax,
    Resolution,
    Type,
    Reference,
    Target,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Syntax => write!(f, "Syntax"),
            ErrorCategory::Resolution => write!(f, "Resolution"),
            ErrorCategory::Type => write!(f, "Type"),
            ErrorCategory::Reference => write!(f, "Reference"),
            ErrorCategory::Target => write!(f, "Target"),
        }
    }
}

macro_rules! register_codes {
    ($($code:literal => ($title:literal, $cat:expr)),* $(,)?) => {{
        let mut map = HashMap::new();
        $(
            map.insert($code, ErrorCodeInfo {
                code: $code,
                title: $title,
                category: $cat,
            });
        )*
        map
    }};
}

impl Default for ErrorCodeRegistry {
    fn default() -> Self {
        use ErrorCategory::*;

        Self {
            codes: register_codes! {
                // Name lookup
                "CS0103" => ("name does not exist in the current context", Resolution),
                "CS0117" => ("type does not contain a definition", Resolution),
                "CS0234" => ("namespace member does not exist", Resolution),
                "CS0246" => ("type or namespace not found", Resolution),
                "CS1061" => ("member not found on type", Resolution),
                "CS0128" => ("local variable already defined", Resolution),

                // Parsing
                "CS1002" => ("; expected", Syntax),
                "CS1003" => ("syntax error", Syntax),
                "CS1022" => ("type or namespace definition, or end-of-file expected", Syntax),
                "CS1026" => (") expected", Syntax),
                "CS1513" => ("} expected", Syntax),
                "CS1514" => ("{ expected", Syntax),
                "CS1525" => ("invalid expression term", Syntax),
                "CS0116" => ("namespace cannot directly contain members", Syntax),

                // Typing
                "CS0029" => ("cannot implicitly convert type", Type),
                "CS0266" => ("cannot implicitly convert type (explicit conversion exists)", Type),
                "CS1503" => ("argument type mismatch", Type),
                "CS1729" => ("no constructor with that arity", Type),
                "CS7036" => ("missing required argument", Type),
                "CS0815" => ("cannot assign to implicitly-typed variable", Type),

                // Assembly references
                "CS0006" => ("metadata file could not be found", Reference),
                "CS0012" => ("type defined in an unreferenced assembly", Reference),

                // Output kind
                "CS8805" => ("top-level statements require an executable", Target),
                "CS5001" => ("program does not contain a static Main method", Target),
            },
        }
    }
}

impl ErrorCodeRegistry {
    pub fn get(&self, code: &str) -> Option<&ErrorCodeInfo> {
        self.codes.get(code)
    }
}
