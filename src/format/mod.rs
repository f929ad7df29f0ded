//! Report output formats for heft

pub mod json;
pub mod markdown;
pub mod plain;

use std::io::Write;

use anyhow::Result;

use crate::core::types::AnalysisReport;

/// Rendering knobs shared by all formats.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Entries shown in the dependency leaderboard.
    pub top: usize,
    /// Include the per-signal score breakdown.
    pub verbose: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            top: 10,
            verbose: false,
        }
    }
}

pub trait Formatter {
    fn write_report(
        &mut self,
        output: &mut dyn Write,
        report: &AnalysisReport,
        options: &RenderOptions,
    ) -> Result<()>;
}

pub fn create_formatter(format: &str) -> Option<Box<dyn Formatter>> {
    match format {
        "plain" => Some(Box::new(plain::PlainFormatter)),
        "json" => Some(Box::new(json::JsonFormatter)),
        "md" | "markdown" => Some(Box::new(markdown::MarkdownFormatter)),
        _ => None,
    }
}
