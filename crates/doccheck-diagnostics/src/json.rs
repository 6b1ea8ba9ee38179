// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! JSON diagnostic output for machine consumption.
//!
//! Use `--format json` to get a single report for the whole run instead of
//! the line-oriented audit trail.

use serde::Serialize;

use crate::{codes::ErrorCodeRegistry, Diagnostic};

/// A single diagnostic in JSON form.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    /// Severity: "error", "warning", or "info".
    pub severity: String,
    /// Error code (e.g., "CS0103").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Error category (e.g., "Resolution", "Syntax").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Short title of the code (e.g., "; expected").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub escalated: bool,
}

/// Convert diagnostics to their JSON form, resolving categories.
pub fn to_json_diagnostics(diagnostics: &[Diagnostic]) -> Vec<JsonDiagnostic> {
    let registry = ErrorCodeRegistry::default();
    diagnostics
        .iter()
        .map(|d| to_json_diagnostic(d, &registry))
        .collect()
}

fn to_json_diagnostic(diag: &Diagnostic, registry: &ErrorCodeRegistry) -> JsonDiagnostic {
    let code = diag.code.as_ref().map(|c| c.0.clone());
    let info = code.as_deref().and_then(|c| registry.get(c));

    JsonDiagnostic {
        severity: diag.severity.to_string(),
        code,
        category: info.map(|i| i.category.to_string()),
        title: info.map(|i| i.title.to_string()),
        message: diag.message.clone(),
        line: diag.location.map(|l| l.line),
        column: diag.location.map(|l| l.column),
        escalated: diag.escalated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_comes_from_registry() {
        let diags = vec![
            Diagnostic::error("The name 'foo' does not exist in the current context")
                .with_code("CS0103")
                .at(2, 5),
            Diagnostic::error("something new").with_code("CS4242"),
        ];
        let json = to_json_diagnostics(&diags);

        assert_eq!(json[0].category.as_deref(), Some("Resolution"));
        assert_eq!(json[0].title.as_deref(), Some("name does not exist in the current context"));
        assert_eq!(json[0].line, Some(2));
        assert_eq!(json[1].category, None);
        assert_eq!(json[1].title, None);
        assert_eq!(json[1].line, None);
    }

    #[test]
    fn serializes_without_empty_fields() {
        let json = to_json_diagnostics(&[Diagnostic::error("boom")]);
        let text = serde_json::to_string(&json[0]).unwrap();
        assert_eq!(text, r#"{"severity":"error","message":"boom"}"#);
    }
}
