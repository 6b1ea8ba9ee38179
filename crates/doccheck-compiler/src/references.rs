// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The fixed set of libraries every snippet is compiled against.
//!
//! Order matters: platform runtime libraries first, then the base framework
//! library, then each dependency library in configuration order. The set is
//! built once per run and shared by every compilation.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::CompilerError;

/// Where the reference libraries live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReferencesConfig {
    /// Directory holding the platform runtime libraries.
    pub platform_root: PathBuf,
    /// File names under `platform_root`, in reference order.
    pub platform_libraries: Vec<String>,
    /// The base framework library. Relative paths resolve against `dependency_root`.
    pub framework_library: PathBuf,
    /// Directory containing one checkout per dependency.
    pub dependency_root: PathBuf,
    /// Build output directory inside each dependency checkout.
    pub dependency_library_dir: PathBuf,
    pub dependencies: Vec<DependencyConfig>,
}

/// One dependency library and the identifier prefix its resources use.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DependencyConfig {
    pub name: String,
    pub library: String,
    pub prefix: String,
}

impl DependencyConfig {
    pub fn new(name: &str, library: &str, prefix: &str) -> Self {
        Self {
            name: name.to_string(),
            library: library.to_string(),
            prefix: prefix.to_string(),
        }
    }
}

impl Default for ReferencesConfig {
    fn default() -> Self {
        Self {
            platform_root: PathBuf::from("/usr/local/share/dotnet/shared/Microsoft.NETCore.App/3.1.0"),
            platform_libraries: [
                "Microsoft.CSharp.dll",
                "System.Collections.dll",
                "System.Collections.Immutable.dll",
                "System.IO.FileSystem.dll",
                "System.Private.CoreLib.dll",
                "System.Runtime.dll",
                "System.Text.Json.dll",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            framework_library: PathBuf::from("pulumi/sdk/dotnet/Pulumi/bin/Debug/netcoreapp3.1/Pulumi.dll"),
            dependency_root: PathBuf::from("."),
            dependency_library_dir: PathBuf::from("sdk/dotnet/bin/Debug/netcoreapp3.1"),
            dependencies: vec![
                DependencyConfig::new("pulumi-azure", "Pulumi.Azure.dll", "azurerm"),
                DependencyConfig::new("pulumi-azuread", "Pulumi.AzureAD.dll", "azuread"),
                DependencyConfig::new("pulumi-aws", "Pulumi.Aws.dll", "aws"),
                DependencyConfig::new("pulumi-gcp", "Pulumi.Gcp.dll", "google"),
                DependencyConfig::new("pulumi-random", "Pulumi.Random.dll", "random"),
                DependencyConfig::new("pulumi-tls", "Pulumi.Tls.dll", "tls"),
            ],
        }
    }
}

impl ReferencesConfig {
    /// Expand the configuration into reference entries, in compile order.
    pub fn entries(&self) -> Vec<Reference> {
        let mut entries = Vec::with_capacity(self.platform_libraries.len() + 1 + self.dependencies.len());

        for lib in &self.platform_libraries {
            entries.push(Reference {
                path: self.platform_root.join(lib),
                kind: ReferenceKind::Platform,
            });
        }

        entries.push(Reference {
            path: self.dependency_root.join(&self.framework_library),
            kind: ReferenceKind::Framework,
        });

        for dep in &self.dependencies {
            entries.push(Reference {
                path: self
                    .dependency_root
                    .join(&dep.name)
                    .join(&self.dependency_library_dir)
                    .join(&dep.library),
                kind: ReferenceKind::Dependency {
                    name: dep.name.clone(),
                    prefix: dep.prefix.clone(),
                },
            });
        }

        entries
    }
}

/// A single library handed to the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub path: PathBuf,
    pub kind: ReferenceKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceKind {
    Platform,
    Framework,
    Dependency { name: String, prefix: String },
}

/// Ordered, run-wide list of reference libraries.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    entries: Vec<Reference>,
}

impl ReferenceSet {
    /// Build a set without touching the filesystem.
    pub fn new(entries: Vec<Reference>) -> Self {
        Self { entries }
    }

    /// Build the set from configuration, failing on the first library that
    /// does not exist.
    pub fn resolve(config: &ReferencesConfig) -> Result<Self, CompilerError> {
        let entries = config.entries();
        for entry in &entries {
            if !entry.path.is_file() {
                return Err(CompilerError::MissingReference {
                    path: entry.path.clone(),
                });
            }
            debug!(path = %entry.path.display(), kind = ?entry.kind, "reference");
        }
        Ok(Self { entries })
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|e| e.path.as_path())
    }

    /// Identifier prefixes of the dependency libraries, in listed order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| match &e.kind {
            ReferenceKind::Dependency { prefix, .. } => Some(prefix.as_str()),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn small_config(root: &Path) -> ReferencesConfig {
        ReferencesConfig {
            platform_root: root.join("platform"),
            platform_libraries: vec!["System.Runtime.dll".into(), "System.Private.CoreLib.dll".into()],
            framework_library: PathBuf::from("framework/Pulumi.dll"),
            dependency_root: root.to_path_buf(),
            dependency_library_dir: PathBuf::from("bin"),
            dependencies: vec![
                DependencyConfig::new("pulumi-aws", "Pulumi.Aws.dll", "aws"),
                DependencyConfig::new("pulumi-gcp", "Pulumi.Gcp.dll", "google"),
            ],
        }
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn entries_follow_platform_framework_dependency_order() {
        let root = Path::new("/refs");
        let entries = small_config(root).entries();
        let paths: Vec<_> = entries.iter().map(|e| e.path.clone()).collect();

        assert_eq!(
            paths,
            vec![
                PathBuf::from("/refs/platform/System.Runtime.dll"),
                PathBuf::from("/refs/platform/System.Private.CoreLib.dll"),
                PathBuf::from("/refs/framework/Pulumi.dll"),
                PathBuf::from("/refs/pulumi-aws/bin/Pulumi.Aws.dll"),
                PathBuf::from("/refs/pulumi-gcp/bin/Pulumi.Gcp.dll"),
            ]
        );
        assert_eq!(entries[2].kind, ReferenceKind::Framework);
    }

    #[test]
    fn prefixes_come_from_dependencies_only() {
        let set = ReferenceSet::new(small_config(Path::new("/refs")).entries());
        let prefixes: Vec<_> = set.prefixes().collect();
        assert_eq!(prefixes, vec!["aws", "google"]);
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn default_config_carries_six_providers() {
        let config = ReferencesConfig::default();
        let set = ReferenceSet::new(config.entries());
        let prefixes: Vec<_> = set.prefixes().collect();
        assert_eq!(prefixes, vec!["azurerm", "azuread", "aws", "google", "random", "tls"]);
        assert_eq!(config.platform_libraries.len(), 7);
    }

    #[test]
    fn resolve_reports_first_missing_library() {
        let tmp = tempfile::tempdir().unwrap();
        let config = small_config(tmp.path());
        for entry in config.entries().iter().take(3) {
            touch(&entry.path);
        }

        match ReferenceSet::resolve(&config) {
            Err(CompilerError::MissingReference { path }) => {
                assert_eq!(path, tmp.path().join("pulumi-aws/bin/Pulumi.Aws.dll"));
            }
            other => panic!("expected missing reference, got {:?}", other),
        }
    }

    #[test]
    fn resolve_accepts_complete_set() {
        let tmp = tempfile::tempdir().unwrap();
        let config = small_config(tmp.path());
        for entry in config.entries() {
            touch(&entry.path);
        }
        let set = ReferenceSet::resolve(&config).unwrap();
        assert_eq!(set.paths().count(), 5);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ReferencesConfig = toml::from_str(
            r#"
            dependency_root = "/src/pulumi"

            [[dependencies]]
            name = "pulumi-aws"
            library = "Pulumi.Aws.dll"
            prefix = "aws"
            "#,
        )
        .unwrap();

        assert_eq!(config.dependency_root, PathBuf::from("/src/pulumi"));
        assert_eq!(config.dependencies, vec![DependencyConfig::new("pulumi-aws", "Pulumi.Aws.dll", "aws")]);
        assert_eq!(config.platform_libraries.len(), 7);
    }
}
