//! Manifest discovery and declared-dependency parsing
//!
//! One parser per supported manifest flavor; all of them produce the same
//! flat `Dependency` list so the usage engines never care where a
//! declaration came from.

pub mod cargo;
pub mod gomod;
pub mod node;
pub mod python;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::{Dependency, Ecosystem};

/// Manifest flavors heft understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    PackageJson,
    CargoToml,
    RequirementsTxt,
    PyprojectToml,
    GoMod,
}

impl ManifestKind {
    /// Recognizes a manifest by its file name.
    pub fn from_file_name(name: &str) -> Option<Self> {
        match name {
            "package.json" => Some(ManifestKind::PackageJson),
            "Cargo.toml" => Some(ManifestKind::CargoToml),
            "requirements.txt" => Some(ManifestKind::RequirementsTxt),
            "pyproject.toml" => Some(ManifestKind::PyprojectToml),
            "go.mod" => Some(ManifestKind::GoMod),
            _ => None,
        }
    }

    pub fn ecosystem(&self) -> Ecosystem {
        match self {
            ManifestKind::PackageJson => Ecosystem::Node,
            ManifestKind::CargoToml => Ecosystem::Rust,
            ManifestKind::RequirementsTxt | ManifestKind::PyprojectToml => Ecosystem::Python,
            ManifestKind::GoMod => Ecosystem::Go,
        }
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse manifest {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Reads and parses one manifest file into its declared dependencies.
pub fn parse_manifest(kind: ManifestKind, path: &Path) -> Result<Vec<Dependency>, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = match kind {
        ManifestKind::PackageJson => node::parse(&content),
        ManifestKind::CargoToml => cargo::parse(&content),
        ManifestKind::RequirementsTxt => python::parse_requirements(&content),
        ManifestKind::PyprojectToml => python::parse_pyproject(&content),
        ManifestKind::GoMod => gomod::parse(&content),
    };

    parsed.map_err(|e| ManifestError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Deduplicates declared dependencies by (ecosystem, name).
/// A runtime declaration wins over a dev-only one; the first requirement
/// string seen for the winning flavor is kept.
pub fn dedupe(declared: Vec<Dependency>) -> Vec<Dependency> {
    let mut seen: HashMap<(Ecosystem, String), Dependency> = HashMap::new();
    for dep in declared {
        let key = (dep.ecosystem, dep.name.clone());
        match seen.get(&key) {
            Some(existing) if !existing.dev || dep.dev => {}
            _ => {
                seen.insert(key, dep);
            }
        }
    }
    let mut out: Vec<Dependency> = seen.into_values().collect();
    out.sort_by(|a, b| (a.ecosystem, &a.name).cmp(&(b.ecosystem, &b.name)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_recognition() {
        assert_eq!(
            ManifestKind::from_file_name("package.json"),
            Some(ManifestKind::PackageJson)
        );
        assert_eq!(
            ManifestKind::from_file_name("Cargo.toml"),
            Some(ManifestKind::CargoToml)
        );
        assert_eq!(
            ManifestKind::from_file_name("go.mod"),
            Some(ManifestKind::GoMod)
        );
        assert_eq!(ManifestKind::from_file_name("cargo.toml"), None);
        assert_eq!(ManifestKind::from_file_name("setup.py"), None);
    }

    #[test]
    fn test_dedupe_prefers_runtime() {
        let deps = vec![
            Dependency {
                name: "serde".into(),
                requirement: "1.0".into(),
                ecosystem: Ecosystem::Rust,
                dev: true,
            },
            Dependency {
                name: "serde".into(),
                requirement: "1.0".into(),
                ecosystem: Ecosystem::Rust,
                dev: false,
            },
        ];
        let deduped = dedupe(deps);
        assert_eq!(deduped.len(), 1);
        assert!(!deduped[0].dev);
    }

    #[test]
    fn test_dedupe_keeps_distinct_ecosystems() {
        let deps = vec![
            Dependency {
                name: "toml".into(),
                requirement: "*".into(),
                ecosystem: Ecosystem::Rust,
                dev: false,
            },
            Dependency {
                name: "toml".into(),
                requirement: "*".into(),
                ecosystem: Ecosystem::Python,
                dev: false,
            },
        ];
        assert_eq!(dedupe(deps).len(), 2);
    }
}
