//! Project scanner
//!
//! One synchronous walk per project collects everything later stages
//! need: directory stats, the source files worth content-scanning, and
//! every dependency manifest along the way.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::HeftConfig;
use crate::core::types::{Ecosystem, ProjectSnapshot, SourceFile};
use crate::fs::{self, WalkOptions};
use crate::manifest::{self, ManifestKind};

/// Walks one project directory into a snapshot. Fails only when the
/// directory itself cannot be opened; everything below that degrades
/// per file.
pub fn scan_project(root: &Path, config: &HeftConfig) -> Result<ProjectSnapshot> {
    let root = root
        .canonicalize()
        .with_context(|| format!("failed to open project directory {}", root.display()))?;

    // .heftignore patterns stack on top of the configured set.
    let mut patterns = config.ignore_patterns.clone();
    patterns.extend(fs::load_heftignore(&root));

    let options = WalkOptions {
        ignore_patterns: &patterns,
        max_depth: config.max_depth,
    };
    let files = fs::walk_directory(&root, &options)?;

    let mut snapshot = ProjectSnapshot::new(root);

    for path in files {
        let size = fs::file_size(&path);
        let mtime = fs::modified_secs(&path);
        snapshot.stats.record_file(size, mtime);

        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if let Some(kind) = ManifestKind::from_file_name(file_name) {
            match manifest::parse_manifest(kind, &path) {
                Ok(deps) => snapshot.declared.extend(deps),
                Err(e) => log::warn!("{:#}", anyhow::Error::new(e)),
            }
            continue;
        }

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(ecosystem) = Ecosystem::from_extension(extension) {
            if size > config.max_file_size {
                log::debug!(
                    "not scanning {} ({} bytes over limit)",
                    path.display(),
                    size
                );
                continue;
            }
            snapshot.stats.source_files += 1;
            snapshot.sources.push(SourceFile { path, ecosystem });
        }
    }

    // Nested manifests (workspaces, monorepos) all contribute; duplicates
    // collapse per (ecosystem, name).
    snapshot.declared = manifest::dedupe(std::mem::take(&mut snapshot.declared));
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std_fs::create_dir_all(parent).unwrap();
        }
        std_fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_collects_sources_and_manifests() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(
            root,
            "package.json",
            r#"{ "dependencies": { "express": "^4.0.0" } }"#,
        );
        write(root, "index.js", "const express = require('express');\n");
        write(root, "src/app.ts", "import express from 'express';\n");
        write(root, "README.md", "# demo\n");

        let snapshot = scan_project(root, &HeftConfig::default()).unwrap();

        assert_eq!(snapshot.stats.file_count, 4);
        assert_eq!(snapshot.stats.source_files, 2);
        assert_eq!(snapshot.sources.len(), 2);
        assert_eq!(snapshot.declared.len(), 1);
        assert_eq!(snapshot.declared[0].name, "express");
        assert!(snapshot.stats.total_bytes > 0);
        assert!(snapshot.stats.newest_mtime.is_some());
    }

    #[test]
    fn test_nested_manifests_merge() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(
            root,
            "package.json",
            r#"{ "dependencies": { "express": "1" } }"#,
        );
        write(
            root,
            "backend/Cargo.toml",
            "[dependencies]\nserde = \"1\"\n",
        );
        write(root, "backend/src/main.rs", "fn main() {}\n");

        let snapshot = scan_project(root, &HeftConfig::default()).unwrap();

        let names: Vec<&str> = snapshot.declared.iter().map(|d| d.name.as_str()).collect();
        assert!(names.contains(&"express"));
        assert!(names.contains(&"serde"));
    }

    #[test]
    fn test_heftignore_excludes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, ".heftignore", "generated/\n");
        write(root, "generated/bundle.js", "var x = 1;\n");
        write(root, "main.js", "var y = 2;\n");

        let snapshot = scan_project(root, &HeftConfig::default()).unwrap();
        assert_eq!(snapshot.sources.len(), 1);
        assert!(snapshot.sources[0].path.ends_with("main.js"));
    }

    #[test]
    fn test_default_ignores_skip_node_modules() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "node_modules/pkg/index.js", "module.exports = {};\n");
        write(root, "app.js", "var z = 3;\n");

        let snapshot = scan_project(root, &HeftConfig::default()).unwrap();
        assert_eq!(snapshot.sources.len(), 1);
        assert_eq!(snapshot.stats.file_count, 1);
    }

    #[test]
    fn test_oversized_sources_not_retained() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "big.py", &"# filler\n".repeat(100));
        write(root, "small.py", "import os\n");

        let config = HeftConfig {
            max_file_size: 64,
            ..Default::default()
        };
        let snapshot = scan_project(root, &config).unwrap();

        // Counted in stats, excluded from content scanning.
        assert_eq!(snapshot.stats.file_count, 2);
        assert_eq!(snapshot.sources.len(), 1);
        assert!(snapshot.sources[0].path.ends_with("small.py"));
    }

    #[test]
    fn test_broken_manifest_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "package.json", "{ not json");
        write(root, "ok.js", "var a = 1;\n");

        let snapshot = scan_project(root, &HeftConfig::default()).unwrap();
        assert!(snapshot.declared.is_empty());
        assert_eq!(snapshot.sources.len(), 1);
    }

    #[test]
    fn test_missing_directory_errors() {
        let result = scan_project(Path::new("/no/such/dir"), &HeftConfig::default());
        assert!(result.is_err());
    }
}
