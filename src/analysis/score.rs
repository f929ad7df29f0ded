//! Heuristic importance scoring
//!
//! Every signal is clamped to 0.0..=1.0 before weighting, so one huge
//! directory cannot drown the rest of the report. Totals are presented
//! on a 0-100 scale.

use serde::{Deserialize, Serialize};

use crate::core::types::{DirStats, Ecosystem};

/// File count where the size signal stops growing.
const FILES_SATURATION: f64 = 400.0;
/// Total bytes where the footprint signal stops growing (50 MiB).
const SIZE_SATURATION: f64 = 50.0 * 1024.0 * 1024.0;
/// Age in days for a fully mature directory (two years).
const MATURITY_SATURATION_DAYS: f64 = 730.0;
/// A directory idle this long scores zero freshness.
const IDLE_HORIZON_DAYS: f64 = 365.0;
/// References at which the dependency volume signal reaches one half.
const REFERENCE_MIDPOINT: f64 = 20.0;

/// Relative weight of each directory signal. Raw values are normalized
/// over their sum, so configs only need to express proportions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub files: f64,
    pub size: f64,
    pub maturity: f64,
    pub freshness: f64,
    pub usage: f64,
    pub activity: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            files: 0.20,
            size: 0.10,
            maturity: 0.15,
            freshness: 0.20,
            usage: 0.25,
            activity: 0.10,
        }
    }
}

impl Weights {
    fn sum(&self) -> f64 {
        self.files + self.size + self.maturity + self.freshness + self.usage + self.activity
    }

    /// Scales the weights to sum to 1.0. All-zero or negative-sum weights
    /// fall back to the defaults rather than dividing by zero.
    pub fn normalized(&self) -> Self {
        let sum = self.sum();
        if sum <= 0.0 {
            return Self::default();
        }
        Self {
            files: self.files / sum,
            size: self.size / sum,
            maturity: self.maturity / sum,
            freshness: self.freshness / sum,
            usage: self.usage / sum,
            activity: self.activity / sum,
        }
    }
}

/// A directory's score with its component signals (each 0.0..=1.0).
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DirectoryScore {
    /// Weighted total on a 0-100 scale.
    pub total: f64,
    pub files: f64,
    pub size: f64,
    pub maturity: f64,
    pub freshness: f64,
    pub usage: f64,
    pub activity: f64,
}

/// Cross-project importance of one dependency.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyScore {
    pub name: String,
    pub ecosystem: Ecosystem,
    /// 0-100 scale.
    pub score: f64,
    pub references: usize,
    pub files: usize,
    pub projects: usize,
}

/// Combines filesystem facts, dependency usage and repository activity
/// into one directory score.
pub fn score_directory(
    stats: &DirStats,
    usage_ratio: f64,
    activity: f64,
    now_secs: u64,
    weights: &Weights,
) -> DirectoryScore {
    let weights = weights.normalized();

    let files = (stats.file_count as f64 / FILES_SATURATION).min(1.0);
    let size = (stats.total_bytes as f64 / SIZE_SATURATION).min(1.0);
    let maturity = (stats.age_days(now_secs) / MATURITY_SATURATION_DAYS).min(1.0);
    // Empty directories have no timestamps and earn no freshness credit.
    let freshness = match stats.newest_mtime {
        Some(_) => (1.0 - stats.idle_days(now_secs) / IDLE_HORIZON_DAYS).max(0.0),
        None => 0.0,
    };
    let usage = usage_ratio.clamp(0.0, 1.0);
    let activity = activity.clamp(0.0, 1.0);

    let total = (files * weights.files
        + size * weights.size
        + maturity * weights.maturity
        + freshness * weights.freshness
        + usage * weights.usage
        + activity * weights.activity)
        * 100.0;

    DirectoryScore {
        total,
        files,
        size,
        maturity,
        freshness,
        usage,
        activity,
    }
}

/// Dependency importance: mostly raw reference volume, tempered by how
/// widely the dependency spreads through files and projects.
pub fn score_dependency(
    references: usize,
    breadth: f64,
    projects: usize,
    projects_analyzed: usize,
) -> f64 {
    let volume = references as f64 / (references as f64 + REFERENCE_MIDPOINT);
    let spread = if projects_analyzed > 0 {
        (projects as f64 / projects_analyzed as f64).min(1.0)
    } else {
        0.0
    };
    (0.6 * volume + 0.3 * breadth.clamp(0.0, 1.0) + 0.1 * spread) * 100.0
}
