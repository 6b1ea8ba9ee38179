// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Command-line C# compiler backend.
//!
//! Each call writes the snippet into a fresh scratch directory, runs the
//! configured compiler with `-target:library` against the reference set and
//! parses its `file(line,col): error CODE: message` output. The scratch
//! directory (source and emitted assembly) is removed when the call returns,
//! whichever way it returns.

use std::fs;
use std::process::Command;

use doccheck_diagnostics::{Diagnostic, Severity};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::{CompileOutput, Compiler, CompilerError, ReferenceSet};

const SOURCE_FILE_NAME: &str = "snippet.cs";
const ASSEMBLY_FILE_NAME: &str = "snippet.dll";

/// Code attached to a failure the compiler did not explain.
pub const UNEXPLAINED_FAILURE_CODE: &str = "CSC";

static DIAGNOSTIC_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?P<file>.+?)\((?P<line>\d+),(?P<col>\d+)(?:,\d+,\d+)?\):\s*)?(?P<sev>error|warning|info)\s+(?P<code>[A-Za-z]+\d+)\s*:\s?(?P<msg>.*?)\s*$",
    )
    .unwrap()
});

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CscConfig {
    /// Program and leading arguments, e.g. `["dotnet", "/usr/share/dotnet/sdk/3.1.0/Roslyn/bincore/csc.dll"]`.
    pub command: Vec<String>,
    /// Extra flags appended after the reference list.
    pub extra_args: Vec<String>,
}

impl Default for CscConfig {
    fn default() -> Self {
        Self {
            command: vec!["csc".to_string()],
            extra_args: Vec::new(),
        }
    }
}

/// Runs an external `csc` once per snippet.
#[derive(Debug, Clone)]
pub struct CscCompiler {
    program: String,
    leading_args: Vec<String>,
    extra_args: Vec<String>,
}

impl CscCompiler {
    pub fn new(config: &CscConfig) -> Result<Self, CompilerError> {
        let (program, leading_args) = config.command.split_first().ok_or(CompilerError::NoCommand)?;
        Ok(Self {
            program: program.clone(),
            leading_args: leading_args.to_vec(),
            extra_args: config.extra_args.clone(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Compiler for CscCompiler {
    fn compile(&self, source: &str, references: &ReferenceSet) -> Result<CompileOutput, CompilerError> {
        let scratch = tempfile::Builder::new().prefix("doccheck-").tempdir()?;
        let source_path = scratch.path().join(SOURCE_FILE_NAME);
        let assembly_path = scratch.path().join(ASSEMBLY_FILE_NAME);
        fs::write(&source_path, source)?;

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args)
            .args(["-nologo", "-noconfig", "-nostdlib+", "-target:library"])
            .arg(format!("-out:{}", assembly_path.display()));
        for path in references.paths() {
            cmd.arg(format!("-reference:{}", path.display()));
        }
        cmd.args(&self.extra_args).arg(&source_path);

        trace!(command = ?cmd, "running compiler");
        let output = cmd.output().map_err(|source| CompilerError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut diagnostics = parse_output(&stdout);
        diagnostics.extend(parse_output(&stderr));

        let has_errors = diagnostics.iter().any(Diagnostic::is_failure);
        let success = output.status.success() && !has_errors;

        if !success && !has_errors {
            let raw = format!("{}{}", stdout, stderr);
            let message = match raw.trim() {
                "" => format!("compiler exited with {}", output.status),
                text => text.to_string(),
            };
            diagnostics.push(Diagnostic::error(message).with_code(UNEXPLAINED_FAILURE_CODE));
        }

        debug!(
            status = %output.status,
            diagnostics = diagnostics.len(),
            success,
            "compiled snippet"
        );

        Ok(CompileOutput { success, diagnostics })
    }
}

/// Parse compiler output into diagnostics. Lines that are not diagnostics
/// (banners, blank lines) are skipped.
pub fn parse_output(text: &str) -> Vec<Diagnostic> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<Diagnostic> {
    let caps = DIAGNOSTIC_LINE.captures(line.trim_start())?;

    let severity = match &caps["sev"] {
        "error" => Severity::Error,
        "warning" => Severity::Warning,
        _ => Severity::Info,
    };
    let mut diag = Diagnostic::new(severity, &caps["msg"]).with_code(&caps["code"]);

    if let (Some(line), Some(col)) = (caps.name("line"), caps.name("col")) {
        if let (Ok(line), Ok(col)) = (line.as_str().parse(), col.as_str().parse()) {
            diag = diag.at(line, col);
        }
    }

    Some(diag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use doccheck_diagnostics::Location;
    use std::path::Path;

    #[test]
    fn parses_located_error() {
        let diags = parse_output(
            "/tmp/doccheck-x/snippet.cs(12,9): error CS0103: The name 'aws_instance' does not exist in the current context",
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].code_str(), "CS0103");
        assert_eq!(diags[0].message, "The name 'aws_instance' does not exist in the current context");
        assert_eq!(diags[0].location, Some(Location { line: 12, column: 9 }));
    }

    #[test]
    fn parses_unlocated_and_skips_noise() {
        let text = "\
Microsoft (R) Visual C# Compiler version 3.4.0
warning CS2008: No source files specified.
error CS0006: Metadata file '/missing/Pulumi.dll' could not be found

";
        let diags = parse_output(text);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].location, None);
        assert_eq!(diags[1].code_str(), "CS0006");
        assert!(diags[1].is_failure());
    }

    #[test]
    fn keeps_colons_inside_message() {
        let diags = parse_output("a.cs(1,1): error CS1503: Argument 1: cannot convert from 'int' to 'string'");
        assert_eq!(diags[0].message, "Argument 1: cannot convert from 'int' to 'string'");
    }

    #[test]
    fn empty_command_is_rejected() {
        let config = CscConfig {
            command: Vec::new(),
            extra_args: Vec::new(),
        };
        assert!(matches!(CscCompiler::new(&config), Err(CompilerError::NoCommand)));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let compiler = CscCompiler::new(&CscConfig {
            command: vec!["/nonexistent/doccheck-csc".into()],
            extra_args: Vec::new(),
        })
        .unwrap();
        let err = compiler.compile("class A {}", &ReferenceSet::default()).unwrap_err();
        assert!(matches!(err, CompilerError::Spawn { .. }));
    }

    #[cfg(unix)]
    fn shell_compiler(script: &str) -> CscCompiler {
        CscCompiler::new(&CscConfig {
            command: vec!["sh".into(), "-c".into(), script.into()],
            extra_args: Vec::new(),
        })
        .unwrap()
    }

    #[cfg(unix)]
    #[test]
    fn clean_exit_is_success() {
        let out = shell_compiler("exit 0").compile("class A {}", &ReferenceSet::default()).unwrap();
        assert!(out.success);
        assert!(out.diagnostics.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn reported_errors_fail_the_compile() {
        let script = r#"for last; do :; done; echo "$last(1,1): error CS0103: The name 'aws_s3_bucket' does not exist in the current context"; exit 1"#;
        let out = shell_compiler(script).compile("aws_s3_bucket", &ReferenceSet::default()).unwrap();
        assert!(!out.success);
        assert_eq!(out.failures().count(), 1);
        assert_eq!(out.diagnostics[0].code_str(), "CS0103");
    }

    #[cfg(unix)]
    #[test]
    fn unexplained_failure_is_synthesized() {
        let out = shell_compiler("echo 'fatal: out of memory' >&2; exit 3")
            .compile("class A {}", &ReferenceSet::default())
            .unwrap();
        assert!(!out.success);
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].code_str(), UNEXPLAINED_FAILURE_CODE);
        assert_eq!(out.diagnostics[0].message, "fatal: out of memory");
    }

    #[cfg(unix)]
    #[test]
    fn scratch_directory_is_removed_after_compile() {
        // The stand-in compiler reports the source path it was given.
        let script = r#"for last; do :; done; echo "error CS9999: $last"; exit 1"#;
        let out = shell_compiler(script).compile("class A {}", &ReferenceSet::default()).unwrap();
        let source_path = out.diagnostics[0].message.clone();
        assert!(source_path.ends_with(SOURCE_FILE_NAME));
        assert!(!Path::new(&source_path).exists());
    }
}
