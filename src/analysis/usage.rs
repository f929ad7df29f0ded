//! Matching observed imports against declared dependencies
//!
//! Both engines produce raw import strings; this module normalizes them
//! into the form manifests declare (npm package, crate name, top-level
//! Python module, Go module path) and tallies hits per dependency.

use std::collections::{HashMap, HashSet};
use std::fs;

use crate::analysis::imports;
use crate::analysis::score::{self, DependencyScore};
use crate::analysis::textual;
use crate::core::types::{
    Dependency, DependencyUsage, Ecosystem, ProjectSnapshot, UnusedDependency, UsedDependency,
};

/// How import references are extracted from source files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageEngine {
    /// tree-sitter parse, falling back to text per file on parse failure.
    Ast,
    /// Regex scan only.
    Text,
}

impl UsageEngine {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ast" => Some(UsageEngine::Ast),
            "text" => Some(UsageEngine::Text),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UsageEngine::Ast => "ast",
            UsageEngine::Text => "text",
        }
    }
}

/// Per-project usage outcome.
#[derive(Debug, Clone, Default)]
pub struct UsageReport {
    /// Referenced dependencies, most references first.
    pub used: Vec<UsedDependency>,
    /// Declared but never referenced, name order.
    pub unused: Vec<UnusedDependency>,
    pub total_references: usize,
    /// Files where the AST engine had to fall back to text.
    pub fallback_files: usize,
}

impl UsageReport {
    /// Share of declared dependencies with at least one reference.
    pub fn usage_ratio(&self) -> f64 {
        let declared = self.used.len() + self.unused.len();
        if declared == 0 {
            return 0.0;
        }
        self.used.len() as f64 / declared as f64
    }
}

/// Canonicalizes a raw import string into the name a manifest would
/// declare. `None` means the reference can never match a dependency
/// (relative path, language builtin namespace, local module).
pub fn normalize_reference(raw: &str, ecosystem: Ecosystem) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match ecosystem {
        Ecosystem::Node => {
            if raw.starts_with('.') || raw.starts_with('/') || raw.starts_with("node:") {
                return None;
            }
            if let Some(rest) = raw.strip_prefix('@') {
                // Scoped packages keep two segments: @scope/name/deep -> @scope/name
                let mut parts = rest.splitn(3, '/');
                let scope = parts.next()?;
                let name = parts.next()?;
                return Some(format!("@{}/{}", scope, name));
            }
            let root = raw.split('/').next().unwrap_or(raw);
            Some(root.to_string())
        }
        Ecosystem::Rust => {
            let first = raw.trim_start_matches("::");
            let first = first.split("::").next().unwrap_or(first);
            let first = first.split_whitespace().next()?;
            if !first.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return None;
            }
            if matches!(
                first,
                "crate" | "self" | "super" | "std" | "core" | "alloc" | "proc_macro"
            ) {
                return None;
            }
            Some(first.replace('-', "_"))
        }
        Ecosystem::Python => {
            if raw.starts_with('.') {
                return None;
            }
            let root = raw.split('.').next().unwrap_or(raw);
            Some(root.to_lowercase().replace('-', "_"))
        }
        Ecosystem::Go => Some(raw.to_string()),
    }
}

/// The form a declared dependency is matched under.
fn declared_key(dep: &Dependency) -> String {
    match dep.ecosystem {
        Ecosystem::Node | Ecosystem::Go => dep.name.clone(),
        Ecosystem::Rust => dep.name.replace('-', "_"),
        Ecosystem::Python => dep.name.to_lowercase().replace('-', "_"),
    }
}

/// Go references carry the full import path; the declared module path is
/// a segment-boundary prefix of it. Longest declared prefix wins.
fn match_go(reference: &str, declared: &[(String, usize)]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (path, idx) in declared {
        let hit = reference == path
            || (reference.starts_with(path.as_str())
                && reference.as_bytes().get(path.len()) == Some(&b'/'));
        if hit && best.is_none_or(|(len, _)| path.len() > len) {
            best = Some((path.len(), *idx));
        }
    }
    best.map(|(_, idx)| idx)
}

/// Scans every retained source file and counts references per declared
/// dependency. I/O or parse trouble with one file never aborts the
/// project; the file is skipped or handed to the text engine.
pub fn analyze_usage(snapshot: &ProjectSnapshot, engine: UsageEngine) -> UsageReport {
    let mut exact: HashMap<(Ecosystem, String), usize> = HashMap::new();
    let mut go_paths: Vec<(String, usize)> = Vec::new();

    for (idx, dep) in snapshot.declared.iter().enumerate() {
        match dep.ecosystem {
            Ecosystem::Go => go_paths.push((dep.name.clone(), idx)),
            _ => {
                exact.entry((dep.ecosystem, declared_key(dep))).or_insert(idx);
            }
        }
    }

    let mut usage = vec![DependencyUsage::default(); snapshot.declared.len()];
    let mut total_references = 0usize;
    let mut fallback_files = 0usize;

    for source in &snapshot.sources {
        let content = match fs::read_to_string(&source.path) {
            Ok(c) => c,
            Err(e) => {
                log::debug!("skipping {}: {}", source.path.display(), e);
                continue;
            }
        };
        if crate::fs::is_binary(content.as_bytes()) {
            log::debug!("skipping binary-looking {}", source.path.display());
            continue;
        }

        let extension = source
            .path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let raw_refs = match engine {
            UsageEngine::Ast => match imports::extract_imports(&content, extension) {
                Some(refs) => refs,
                None => {
                    log::debug!(
                        "parse failed for {}, using text matching",
                        source.path.display()
                    );
                    fallback_files += 1;
                    textual::extract_references(&content, source.ecosystem)
                }
            },
            UsageEngine::Text => textual::extract_references(&content, source.ecosystem),
        };

        let mut hit_in_file: HashSet<usize> = HashSet::new();
        for raw in raw_refs {
            let Some(normalized) = normalize_reference(&raw, source.ecosystem) else {
                continue;
            };
            let idx = match source.ecosystem {
                Ecosystem::Go => match_go(&normalized, &go_paths),
                eco => exact.get(&(eco, normalized)).copied(),
            };
            if let Some(idx) = idx {
                usage[idx].references += 1;
                total_references += 1;
                hit_in_file.insert(idx);
            }
        }
        for idx in hit_in_file {
            usage[idx].files += 1;
        }
    }

    let mut used = Vec::new();
    let mut unused = Vec::new();
    for (dep, counts) in snapshot.declared.iter().zip(&usage) {
        if counts.references > 0 {
            used.push(UsedDependency {
                name: dep.name.clone(),
                ecosystem: dep.ecosystem,
                references: counts.references,
                files: counts.files,
                dev: dep.dev,
            });
        } else {
            unused.push(UnusedDependency {
                name: dep.name.clone(),
                ecosystem: dep.ecosystem,
                dev: dep.dev,
            });
        }
    }
    used.sort_by(|a, b| b.references.cmp(&a.references).then(a.name.cmp(&b.name)));
    unused.sort_by(|a, b| (a.ecosystem, &a.name).cmp(&(b.ecosystem, &b.name)));

    UsageReport {
        used,
        unused,
        total_references,
        fallback_files,
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct TallyEntry {
    references: usize,
    files: usize,
    projects: usize,
    /// Ecosystem source files across the projects that referenced the dep,
    /// the denominator for breadth.
    sources: usize,
}

/// In-memory cross-project accumulator for one invocation.
#[derive(Debug, Default)]
pub struct DependencyTally {
    entries: HashMap<(Ecosystem, String), TallyEntry>,
    projects_analyzed: usize,
}

impl DependencyTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_project(&mut self, snapshot: &ProjectSnapshot, report: &UsageReport) {
        self.projects_analyzed += 1;
        for used in &report.used {
            let entry = self
                .entries
                .entry((used.ecosystem, used.name.clone()))
                .or_default();
            entry.references += used.references;
            entry.files += used.files;
            entry.projects += 1;
            entry.sources += snapshot.sources_in(used.ecosystem);
        }
    }

    /// Folds the tally into the final leaderboard, highest score first.
    pub fn into_scores(self) -> Vec<DependencyScore> {
        let projects_analyzed = self.projects_analyzed;
        let mut scores: Vec<DependencyScore> = self
            .entries
            .into_iter()
            .map(|((ecosystem, name), entry)| {
                let breadth = if entry.sources > 0 {
                    (entry.files as f64 / entry.sources as f64).min(1.0)
                } else {
                    0.0
                };
                let value = score::score_dependency(
                    entry.references,
                    breadth,
                    entry.projects,
                    projects_analyzed,
                );
                DependencyScore {
                    name,
                    ecosystem,
                    score: value,
                    references: entry.references,
                    files: entry.files,
                    projects: entry.projects,
                }
            })
            .collect();
        scores.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::core::types::SourceFile;

    fn dep(name: &str, ecosystem: Ecosystem) -> Dependency {
        Dependency {
            name: name.into(),
            requirement: "*".into(),
            ecosystem,
            dev: false,
        }
    }

    #[test]
    fn test_normalize_node() {
        assert_eq!(
            normalize_reference("express", Ecosystem::Node),
            Some("express".into())
        );
        assert_eq!(
            normalize_reference("lodash/fp", Ecosystem::Node),
            Some("lodash".into())
        );
        assert_eq!(
            normalize_reference("@scope/pkg/deep", Ecosystem::Node),
            Some("@scope/pkg".into())
        );
        assert_eq!(normalize_reference("./local", Ecosystem::Node), None);
        assert_eq!(normalize_reference("node:fs", Ecosystem::Node), None);
    }

    #[test]
    fn test_normalize_rust() {
        assert_eq!(
            normalize_reference("serde::{Serialize, Deserialize}", Ecosystem::Rust),
            Some("serde".into())
        );
        assert_eq!(
            normalize_reference("anyhow as ah", Ecosystem::Rust),
            Some("anyhow".into())
        );
        assert_eq!(normalize_reference("crate::config", Ecosystem::Rust), None);
        assert_eq!(normalize_reference("std::fs", Ecosystem::Rust), None);
        assert_eq!(normalize_reference("{a, b}", Ecosystem::Rust), None);
    }

    #[test]
    fn test_normalize_python() {
        assert_eq!(
            normalize_reference("django.http", Ecosystem::Python),
            Some("django".into())
        );
        assert_eq!(
            normalize_reference("PIL.Image", Ecosystem::Python),
            Some("pil".into())
        );
        assert_eq!(normalize_reference(".relative", Ecosystem::Python), None);
    }

    #[test]
    fn test_go_prefix_match() {
        let declared = vec![
            ("github.com/spf13/cobra".to_string(), 0),
            ("github.com/spf13".to_string(), 1),
        ];
        assert_eq!(
            match_go("github.com/spf13/cobra/doc", &declared),
            Some(0)
        );
        assert_eq!(match_go("github.com/spf13/viper", &declared), Some(1));
        assert_eq!(match_go("github.com/spf13-other/x", &declared), None);
        assert_eq!(match_go("fmt", &declared), None);
    }

    #[test]
    fn test_analyze_counts_references_and_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("a.py"),
            "import flask\nfrom flask import Flask\nimport os\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("b.py"), "import flask\n").unwrap();

        let mut snapshot = ProjectSnapshot::new(dir.path().to_path_buf());
        snapshot.sources = vec![
            SourceFile {
                path: dir.path().join("a.py"),
                ecosystem: Ecosystem::Python,
            },
            SourceFile {
                path: dir.path().join("b.py"),
                ecosystem: Ecosystem::Python,
            },
        ];
        snapshot.declared = vec![dep("flask", Ecosystem::Python), dep("requests", Ecosystem::Python)];

        let report = analyze_usage(&snapshot, UsageEngine::Text);
        assert_eq!(report.used.len(), 1);
        assert_eq!(report.used[0].name, "flask");
        assert_eq!(report.used[0].references, 3);
        assert_eq!(report.used[0].files, 2);
        assert_eq!(report.unused.len(), 1);
        assert_eq!(report.unused[0].name, "requests");
        assert!((report.usage_ratio() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_ast_engine_matches_rust_crates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("main.rs"),
            "use serde::Serialize;\nuse lazy_static::lazy_static;\nfn main() {}\n",
        )
        .unwrap();

        let mut snapshot = ProjectSnapshot::new(dir.path().to_path_buf());
        snapshot.sources = vec![SourceFile {
            path: dir.path().join("main.rs"),
            ecosystem: Ecosystem::Rust,
        }];
        // Manifest writes lazy-static style names with hyphens sometimes.
        snapshot.declared = vec![
            dep("serde", Ecosystem::Rust),
            dep("lazy-static", Ecosystem::Rust),
        ];

        let report = analyze_usage(&snapshot, UsageEngine::Ast);
        assert_eq!(report.used.len(), 2);
        assert_eq!(report.fallback_files, 0);
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut snapshot = ProjectSnapshot::new(dir.path().to_path_buf());
        snapshot.sources = vec![SourceFile {
            path: dir.path().join("gone.py"),
            ecosystem: Ecosystem::Python,
        }];
        snapshot.declared = vec![dep("flask", Ecosystem::Python)];

        let report = analyze_usage(&snapshot, UsageEngine::Text);
        assert!(report.used.is_empty());
        assert_eq!(report.unused.len(), 1);
    }

    #[test]
    fn test_tally_across_projects() {
        let mut tally = DependencyTally::new();

        let mut snap_a = ProjectSnapshot::new(PathBuf::from("/a"));
        snap_a.sources = vec![SourceFile {
            path: PathBuf::from("/a/x.py"),
            ecosystem: Ecosystem::Python,
        }];
        let report_a = UsageReport {
            used: vec![UsedDependency {
                name: "flask".into(),
                ecosystem: Ecosystem::Python,
                references: 4,
                files: 1,
                dev: false,
            }],
            ..Default::default()
        };

        let mut snap_b = ProjectSnapshot::new(PathBuf::from("/b"));
        snap_b.sources = vec![
            SourceFile {
                path: PathBuf::from("/b/x.py"),
                ecosystem: Ecosystem::Python,
            },
            SourceFile {
                path: PathBuf::from("/b/y.py"),
                ecosystem: Ecosystem::Python,
            },
        ];
        let report_b = UsageReport {
            used: vec![UsedDependency {
                name: "flask".into(),
                ecosystem: Ecosystem::Python,
                references: 2,
                files: 2,
                dev: false,
            }],
            ..Default::default()
        };

        tally.record_project(&snap_a, &report_a);
        tally.record_project(&snap_b, &report_b);

        let scores = tally.into_scores();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].name, "flask");
        assert_eq!(scores[0].references, 6);
        assert_eq!(scores[0].files, 3);
        assert_eq!(scores[0].projects, 2);
        assert!(scores[0].score > 0.0);
    }

    #[test]
    fn test_engine_names() {
        assert_eq!(UsageEngine::from_name("ast"), Some(UsageEngine::Ast));
        assert_eq!(UsageEngine::from_name("text"), Some(UsageEngine::Text));
        assert_eq!(UsageEngine::from_name("magic"), None);
        assert_eq!(UsageEngine::Ast.name(), "ast");
    }
}
