use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analysis::score::Weights;

/// Main configuration for heft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeftConfig {
    /// Import extraction engine ("ast" or "text")
    pub engine: String,
    /// Report format ("plain", "json", "md")
    pub format: String,
    /// Number of entries in the dependency leaderboard
    pub top: usize,
    /// Glob patterns to ignore in every project walk (e.g. "*.log")
    pub ignore_patterns: Vec<String>,
    /// Maximum file size to content-scan, in bytes
    pub max_file_size: u64,
    /// Maximum directory depth to traverse
    pub max_depth: Option<usize>,
    /// Relative weights of the directory score signals
    pub weights: Weights,
    /// Enable verbose logging to stderr
    pub verbose: bool,
}

impl HeftConfig {
    /// Validates the configuration before any scanning starts.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !matches!(self.engine.as_str(), "ast" | "text") {
            anyhow::bail!("unknown engine '{}' (expected ast or text)", self.engine);
        }
        if !matches!(self.format.as_str(), "plain" | "json" | "md") {
            anyhow::bail!("unknown format '{}' (expected plain, json or md)", self.format);
        }
        if self.max_file_size == 0 {
            anyhow::bail!("max_file_size must be greater than zero");
        }
        let w = &self.weights;
        for (name, value) in [
            ("files", w.files),
            ("size", w.size),
            ("maturity", w.maturity),
            ("freshness", w.freshness),
            ("usage", w.usage),
            ("activity", w.activity),
        ] {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("weight '{}' must be a non-negative number", name);
            }
        }
        Ok(())
    }

    /// Attempts to load configuration from `heft.toml` in the current
    /// directory, then from the per-user config directory.
    pub fn load_from_file() -> Option<Self> {
        let mut candidates = vec![PathBuf::from("heft.toml")];
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("heft").join("config.toml"));
        }
        for path in candidates {
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            match toml::from_str(&content) {
                Ok(config) => return Some(config),
                Err(e) => {
                    log::warn!("ignoring malformed config {}: {}", path.display(), e);
                }
            }
        }
        None
    }
}

impl Default for HeftConfig {
    fn default() -> Self {
        let defaults = vec![
            // Version Control
            ".git",
            ".hg",
            ".svn",
            ".bzr",
            // IDEs
            ".idea",
            ".vscode",
            ".vs",
            "*.swp",
            "*.swo",
            // Build / Dependency
            "node_modules",
            "target",
            "dist",
            "build",
            "out",
            "vendor",
            "venv",
            ".venv",
            ".tox",
            "__pycache__",
            "*.pyc",
            "*.class",
            "*.o",
            // Lockfiles
            "package-lock.json",
            "yarn.lock",
            "pnpm-lock.yaml",
            "Cargo.lock",
            "go.sum",
            // System
            ".DS_Store",
            "Thumbs.db",
            // Logs
            "*.log",
        ];

        Self {
            engine: "ast".to_string(),
            format: "plain".to_string(),
            top: 10,
            ignore_patterns: defaults.into_iter().map(String::from).collect(),
            max_file_size: 1024 * 1024,
            max_depth: None,
            weights: Weights::default(),
            verbose: false,
        }
    }
}
