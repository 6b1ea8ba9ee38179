// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! `doccheck.toml` configuration.
//!
//! Every section is optional; anything left out keeps the built-in defaults,
//! which target the Pulumi .NET SDKs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use doccheck_compiler::{CscConfig, ReferencesConfig};
use doccheck_snippets::{ExtractConfig, UndefinedNameHeuristic};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub references: ReferencesConfig,
    pub extract: ExtractConfig,
    pub compiler: CscConfig,
    pub heuristic: UndefinedNameHeuristic,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Extension of the files to scan, without the dot.
    pub extension: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: "cs".to_string(),
        }
    }
}

impl Config {
    /// Load `path`, or fall back to the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, extension: Option<String>, compiler: Option<String>) -> Self {
        if let Some(ext) = extension {
            self.scan.extension = ext.trim_start_matches('.').to_string();
        }
        if let Some(cmd) = compiler {
            self.compiler.command = cmd.split_whitespace().map(str::to_string).collect();
        }
        self
    }

    /// Platform root, for log messages.
    pub fn platform_root(&self) -> &PathBuf {
        &self.references.platform_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.scan.extension, "cs");
        assert_eq!(config.extract, ExtractConfig::default());
        assert_eq!(config.compiler.command, vec!["csc"]);
        assert_eq!(config.heuristic.undefined_name_code, "CS0103");
        assert_eq!(config.references.dependencies.len(), 6);
    }

    #[test]
    fn sections_override_independently() {
        let config = Config::parse(
            r#"
            [compiler]
            command = ["dotnet", "/sdk/Roslyn/bincore/csc.dll"]

            [heuristic]
            context_free_names = ["data"]

            [references]
            platform_root = "/opt/dotnet/shared/Microsoft.NETCore.App/3.1.0"
            "#,
        )
        .unwrap();

        assert_eq!(config.compiler.command, vec!["dotnet", "/sdk/Roslyn/bincore/csc.dll"]);
        assert_eq!(config.heuristic.context_free_names, vec!["data"]);
        assert_eq!(config.heuristic.prefix_separator, "_");
        assert_eq!(
            config.platform_root(),
            &PathBuf::from("/opt/dotnet/shared/Microsoft.NETCore.App/3.1.0")
        );
        assert_eq!(config.references.platform_libraries.len(), 7);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Config::parse("[scan\nextension = 1").is_err());
        assert!(Config::parse("[scan]\nextension = 1").is_err());
    }

    #[test]
    fn cli_overrides_win() {
        let config = Config::default().with_overrides(Some(".csx".into()), Some("mono /opt/csc.exe".into()));
        assert_eq!(config.scan.extension, "csx");
        assert_eq!(config.compiler.command, vec!["mono", "/opt/csc.exe"]);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/doccheck.toml"))).unwrap_err();
        assert!(err.to_string().contains("reading config"));
        assert!(Config::load(None).is_ok());
    }
}
