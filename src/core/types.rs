//! Core types shared across heft modules

use std::path::PathBuf;

use serde::Serialize;

use crate::analysis::score::{DependencyScore, DirectoryScore};

/// Packaging ecosystem a manifest or source file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Node,
    Rust,
    Python,
    Go,
}

impl Ecosystem {
    /// Classifies a source file by extension. Returns `None` for files
    /// that no supported manifest ecosystem can declare dependencies for.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" => Some(Ecosystem::Node),
            "rs" => Some(Ecosystem::Rust),
            "py" => Some(Ecosystem::Python),
            "go" => Some(Ecosystem::Go),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Ecosystem::Node => "node",
            Ecosystem::Rust => "cargo",
            Ecosystem::Python => "python",
            Ecosystem::Go => "go",
        }
    }
}

/// A dependency declared in some manifest.
#[derive(Debug, Clone, Serialize)]
pub struct Dependency {
    pub name: String,
    /// Version requirement as written in the manifest ("*" when absent).
    pub requirement: String,
    pub ecosystem: Ecosystem,
    /// Dev-only (devDependencies, dev-dependencies, `// indirect`, ...).
    pub dev: bool,
}

/// A source file retained for usage scanning.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub ecosystem: Ecosystem,
}

/// Filesystem facts about one project directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirStats {
    /// All files seen by the walk.
    pub file_count: usize,
    /// Files classified into a supported ecosystem.
    pub source_files: usize,
    pub total_bytes: u64,
    /// Oldest file modification time, seconds since the Unix epoch.
    pub oldest_mtime: Option<u64>,
    /// Newest file modification time, seconds since the Unix epoch.
    pub newest_mtime: Option<u64>,
}

const DAY_SECS: f64 = 86_400.0;

impl DirStats {
    /// Fold one file's facts into the stats.
    pub fn record_file(&mut self, bytes: u64, mtime: Option<u64>) {
        self.file_count += 1;
        self.total_bytes += bytes;
        if let Some(t) = mtime {
            self.oldest_mtime = Some(self.oldest_mtime.map_or(t, |o| o.min(t)));
            self.newest_mtime = Some(self.newest_mtime.map_or(t, |n| n.max(t)));
        }
    }

    /// Days since the oldest file was written. 0 for empty directories.
    pub fn age_days(&self, now_secs: u64) -> f64 {
        match self.oldest_mtime {
            Some(t) => (now_secs.saturating_sub(t)) as f64 / DAY_SECS,
            None => 0.0,
        }
    }

    /// Days since anything in the directory changed.
    pub fn idle_days(&self, now_secs: u64) -> f64 {
        match self.newest_mtime {
            Some(t) => (now_secs.saturating_sub(t)) as f64 / DAY_SECS,
            None => 0.0,
        }
    }
}

/// Raw facts gathered by one scan pass, before any scoring.
#[derive(Debug, Clone)]
pub struct ProjectSnapshot {
    pub root: PathBuf,
    pub name: String,
    pub stats: DirStats,
    pub sources: Vec<SourceFile>,
    pub declared: Vec<Dependency>,
}

impl ProjectSnapshot {
    pub fn new(root: PathBuf) -> Self {
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.display().to_string());
        Self {
            root,
            name,
            stats: DirStats::default(),
            sources: Vec::new(),
            declared: Vec::new(),
        }
    }

    /// Source-file count for one ecosystem (breadth denominators).
    pub fn sources_in(&self, ecosystem: Ecosystem) -> usize {
        self.sources
            .iter()
            .filter(|s| s.ecosystem == ecosystem)
            .count()
    }
}

/// Usage counts for one declared dependency within one project.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DependencyUsage {
    /// Matched import/use statements across the project.
    pub references: usize,
    /// Distinct files with at least one reference.
    pub files: usize,
}

/// A declared dependency with its observed usage, as reported per project.
#[derive(Debug, Clone, Serialize)]
pub struct UsedDependency {
    pub name: String,
    pub ecosystem: Ecosystem,
    pub references: usize,
    pub files: usize,
    pub dev: bool,
}

/// A declared dependency with zero observed references.
#[derive(Debug, Clone, Serialize)]
pub struct UnusedDependency {
    pub name: String,
    pub ecosystem: Ecosystem,
    pub dev: bool,
}

/// Per-project outcome in the final report.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectReport {
    pub path: PathBuf,
    pub name: String,
    /// Registered but absent on disk; scores zero instead of failing.
    pub missing: bool,
    pub stats: DirStats,
    pub declared_count: usize,
    pub score: DirectoryScore,
    /// Referenced dependencies, most-referenced first.
    pub used: Vec<UsedDependency>,
    /// Declared but never referenced.
    pub unused: Vec<UnusedDependency>,
}

impl ProjectReport {
    /// Placeholder entry for a registered directory that no longer exists.
    pub fn missing(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path,
            name,
            missing: true,
            stats: DirStats::default(),
            declared_count: 0,
            score: DirectoryScore::default(),
            used: Vec::new(),
            unused: Vec::new(),
        }
    }
}

/// Everything one `analyze` invocation produced.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    /// Highest score first.
    pub projects: Vec<ProjectReport>,
    /// Cross-project dependency leaderboard, highest score first.
    pub dependencies: Vec<DependencyScore>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_classification() {
        assert_eq!(Ecosystem::from_extension("ts"), Some(Ecosystem::Node));
        assert_eq!(Ecosystem::from_extension("cjs"), Some(Ecosystem::Node));
        assert_eq!(Ecosystem::from_extension("rs"), Some(Ecosystem::Rust));
        assert_eq!(Ecosystem::from_extension("py"), Some(Ecosystem::Python));
        assert_eq!(Ecosystem::from_extension("go"), Some(Ecosystem::Go));
        assert_eq!(Ecosystem::from_extension("md"), None);
    }

    #[test]
    fn test_stats_fold() {
        let mut stats = DirStats::default();
        stats.record_file(100, Some(1_000));
        stats.record_file(50, Some(5_000));
        stats.record_file(25, None);

        assert_eq!(stats.file_count, 3);
        assert_eq!(stats.total_bytes, 175);
        assert_eq!(stats.oldest_mtime, Some(1_000));
        assert_eq!(stats.newest_mtime, Some(5_000));
    }

    #[test]
    fn test_age_arithmetic() {
        let stats = DirStats {
            oldest_mtime: Some(0),
            newest_mtime: Some(86_400),
            ..Default::default()
        };
        let now = 86_400 * 3;
        assert!((stats.age_days(now) - 3.0).abs() < 1e-9);
        assert!((stats.idle_days(now) - 2.0).abs() < 1e-9);

        // Clock skew ahead of "now" clamps to zero rather than going negative.
        assert_eq!(stats.idle_days(0), 0.0);
    }
}
