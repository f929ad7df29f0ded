use anyhow::Result;
use ignore::WalkBuilder;
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

/// Walk limits and filters, assembled by the scanner.
#[derive(Debug, Default)]
pub struct WalkOptions<'a> {
    /// Glob patterns to exclude (e.g. "node_modules", "*.log").
    pub ignore_patterns: &'a [String],
    pub max_depth: Option<usize>,
}

/// Collects every regular file under `path`, honoring gitignore plus the
/// given ignore patterns. Unreadable entries are logged and skipped.
pub fn walk_directory(path: &Path, opts: &WalkOptions) -> Result<Vec<PathBuf>> {
    let mut builder = WalkBuilder::new(path);

    // In the override builder "pattern" whitelists and "!pattern" ignores,
    // the inverse of gitignore. Callers hand us globs-to-ignore.
    let mut override_builder = ignore::overrides::OverrideBuilder::new(path);
    for pattern in opts.ignore_patterns {
        override_builder.add(&format!("!{}", pattern))?;
    }
    let overrides = override_builder.build()?;

    builder.overrides(overrides);
    builder.standard_filters(true);
    builder.max_depth(opts.max_depth);

    let walker = builder.build();
    let mut files = Vec::new();

    for result in walker {
        match result {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file()) {
                    files.push(entry.into_path());
                }
            }
            Err(err) => warn!("error walking directory: {}", err),
        }
    }

    files.sort();
    Ok(files)
}

/// Load ignore patterns from a .heftignore file in the project root.
/// Returns an empty vec if the file doesn't exist.
pub fn load_heftignore(root: &Path) -> Vec<String> {
    let ignore_file = root.join(".heftignore");
    if !ignore_file.exists() {
        return Vec::new();
    }

    fs::read_to_string(ignore_file)
        .unwrap_or_default()
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|line| line.trim().to_string())
        .collect()
}

/// Checks if the buffer contains binary data.
/// Uses a simple heuristic: looks for null bytes in the first 8KB.
pub fn is_binary(content: &[u8]) -> bool {
    let check_len = content.len().min(8192);
    content[..check_len].contains(&0)
}

/// File modification time in seconds since the Unix epoch.
pub fn modified_secs(path: &Path) -> Option<u64> {
    fs::metadata(path)
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
}

/// File size in bytes, 0 when the metadata cannot be read.
pub fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
