// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Diagnostics reported by the compiler backend for a single snippet.
//!
//! The compiler backend turns whatever its frontend prints into `Diagnostic`
//! values; the classifier and the reporters only ever see this type, so a
//! different frontend can be plugged in without touching either of them.

pub mod codes;
pub mod json;

use std::fmt;

use serde::Serialize;

// ============================================================================
// Core Types
// ============================================================================

/// A single compiler message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: Option<ErrorCode>,
    pub message: String,
    pub location: Option<Location>,
    /// A warning the compiler promoted to an error (warn-as-error).
    pub escalated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A compiler error code like CS0103.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ErrorCode(pub String);

/// Position of a diagnostic inside the snippet (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

// ============================================================================
// Builder API
// ============================================================================

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            location: None,
            escalated: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(ErrorCode(code.into()));
        self
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.location = Some(Location { line, column });
        self
    }

    pub fn escalated(mut self) -> Self {
        self.escalated = true;
        self
    }

    /// True for diagnostics that make the compilation fail.
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Error || self.escalated
    }

    /// The code as a plain string, empty when the compiler gave none.
    pub fn code_str(&self) -> &str {
        self.code.as_ref().map(|c| c.0.as_str()).unwrap_or("")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// `CODE: message`, the shape used for per-diagnostic report lines.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message)
    }
}
