//! Repository activity signal
//!
//! Blends commit recency with commit volume from the directory's git
//! history. Directories that are not repositories, or repositories with
//! an unborn HEAD, score zero instead of erroring.

use std::path::Path;

use git2::Repository;

/// Days after the last commit over which recency decays to zero.
const RECENCY_HORIZON_DAYS: f64 = 180.0;
/// Commit count where the volume signal saturates.
const COMMIT_VOLUME_CAP: f64 = 200.0;
/// Hard cap on history walked, for performance safety on massive repos.
const COMMIT_WALK_LIMIT: usize = 1000;

const DAY_SECS: f64 = 86_400.0;

/// Activity in 0.0..=1.0 for the repository rooted at `root`.
pub fn activity_signal(root: &Path, now_secs: u64) -> f64 {
    let repo = match Repository::open(root) {
        Ok(r) => r,
        Err(_) => return 0.0, // Not a git repo
    };

    let mut revwalk = match repo.revwalk() {
        Ok(rw) => rw,
        Err(_) => return 0.0,
    };

    // Unborn HEAD means no commits yet.
    if revwalk.push_head().is_err() {
        return 0.0;
    }

    revwalk.set_sorting(git2::Sort::TIME).ok();

    let mut commit_count = 0usize;
    let mut newest: Option<i64> = None;

    for oid in revwalk.take(COMMIT_WALK_LIMIT) {
        let oid = match oid {
            Ok(o) => o,
            Err(_) => continue,
        };
        let commit = match repo.find_commit(oid) {
            Ok(c) => c,
            Err(_) => continue,
        };
        let seconds = commit.time().seconds();
        newest = Some(newest.map_or(seconds, |n| n.max(seconds)));
        commit_count += 1;
    }

    let Some(newest) = newest else {
        return 0.0;
    };

    let days_since = (now_secs as i64 - newest).max(0) as f64 / DAY_SECS;
    let recency = (1.0 - days_since / RECENCY_HORIZON_DAYS).max(0.0);
    let volume = (commit_count as f64 / COMMIT_VOLUME_CAP).min(1.0);

    0.6 * recency + 0.4 * volume
}
