//! Command orchestration for the heft CLI

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::analysis::activity::activity_signal;
use crate::analysis::score::score_directory;
use crate::analysis::usage::{analyze_usage, DependencyTally, UsageEngine};
use crate::config::HeftConfig;
use crate::core::scanner::scan_project;
use crate::core::types::{AnalysisReport, ProjectReport};
use crate::format::{RenderOptions, create_formatter};
use crate::registry::Registry;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Scores every directory and folds the cross-invocation dependency
/// tally. Never fails: unreachable directories become flagged zero-score
/// entries and everything else degrades per file.
pub fn run_analysis(directories: &[PathBuf], config: &HeftConfig) -> AnalysisReport {
    let engine = UsageEngine::from_name(&config.engine).unwrap_or(UsageEngine::Ast);
    let now = now_secs();
    let mut tally = DependencyTally::new();
    let mut projects = Vec::with_capacity(directories.len());

    // Draws to stderr and hides itself when that is not a terminal.
    let progress = ProgressBar::new(directories.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    for dir in directories {
        progress.set_message(
            dir.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );

        if !dir.is_dir() {
            log::warn!("{} is registered but does not exist", dir.display());
            projects.push(ProjectReport::missing(dir.clone()));
            progress.inc(1);
            continue;
        }

        let snapshot = match scan_project(dir, config) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("skipping {}: {:#}", dir.display(), e);
                projects.push(ProjectReport::missing(dir.clone()));
                progress.inc(1);
                continue;
            }
        };

        let usage = analyze_usage(&snapshot, engine);
        if usage.fallback_files > 0 {
            log::debug!(
                "{}: {} file(s) fell back to text matching",
                snapshot.name,
                usage.fallback_files
            );
        }
        let activity = activity_signal(&snapshot.root, now);
        let score = score_directory(
            &snapshot.stats,
            usage.usage_ratio(),
            activity,
            now,
            &config.weights,
        );

        tally.record_project(&snapshot, &usage);
        projects.push(ProjectReport {
            path: snapshot.root.clone(),
            name: snapshot.name.clone(),
            missing: false,
            stats: snapshot.stats.clone(),
            declared_count: snapshot.declared.len(),
            score,
            used: usage.used,
            unused: usage.unused,
        });
        progress.inc(1);
    }
    progress.finish_and_clear();

    projects.sort_by(|a, b| {
        b.score
            .total
            .partial_cmp(&a.score.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    AnalysisReport {
        generated_at: Utc::now(),
        projects,
        dependencies: tally.into_scores(),
    }
}

/// `heft analyze`: score directories and render to stdout.
pub fn run_analyze(directories: &[PathBuf], config: &HeftConfig) -> Result<()> {
    if directories.is_empty() {
        println!("Nothing to analyze. Run `heft` or `heft add <path>` to register a directory.");
        return Ok(());
    }

    let report = run_analysis(directories, config);

    let mut formatter = create_formatter(&config.format)
        .ok_or_else(|| anyhow::anyhow!("unknown format '{}'", config.format))?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let options = RenderOptions {
        top: config.top,
        verbose: config.verbose,
    };
    formatter.write_report(&mut out, &report, &options)?;
    Ok(())
}

/// `heft list`: print the registry, flagging gone directories.
pub fn run_list(registry: &Registry) -> Result<()> {
    if registry.is_empty() {
        println!("No directories registered. Run `heft` or `heft add <path>` to register one.");
        return Ok(());
    }
    println!("Registered directories ({}):", registry.len());
    for dir in &registry.directories {
        if dir.is_dir() {
            println!("  {}", dir.display());
        } else {
            println!("  {} {}", dir.display(), "(missing)".red());
        }
    }
    Ok(())
}

/// `heft add`: register one directory and persist the registry.
pub fn run_add(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("cannot register {}", path.display()))?;
    if !metadata.is_dir() {
        anyhow::bail!("{} is not a directory", path.display());
    }

    let location = Registry::location();
    let mut registry = Registry::load_or_default(&location);
    if registry.add(path.to_path_buf()) {
        registry.save(&location).context("failed to save registry")?;
        println!("Registered {}", path.display());
    } else {
        println!("{} is already registered", path.display());
    }
    Ok(())
}

/// `heft remove`: drop one directory from the registry.
pub fn run_remove(path: &Path) -> Result<()> {
    let location = Registry::location();
    let mut registry = Registry::load_or_default(&location);
    if registry.remove(path) {
        registry.save(&location).context("failed to save registry")?;
        println!("Removed {}", path.display());
    } else {
        println!("{} was not registered", path.display());
    }
    Ok(())
}
