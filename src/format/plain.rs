//! Plain text report rendering with console bar charts

use std::io::Write;

use anyhow::Result;
use colored::Colorize;

use crate::core::types::{AnalysisReport, ProjectReport};

use super::{Formatter, RenderOptions};

const BAR_WIDTH: usize = 40;
/// Per-project dependency lines before the rest is folded into a count.
const DEPS_SHOWN: usize = 5;

pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn write_report(
        &mut self,
        output: &mut dyn Write,
        report: &AnalysisReport,
        options: &RenderOptions,
    ) -> Result<()> {
        writeln!(
            output,
            "{}",
            format!(
                "heft report: {} project(s), {}",
                report.projects.len(),
                report.generated_at.format("%Y-%m-%d %H:%M UTC")
            )
            .bold()
        )?;
        writeln!(output)?;

        for (i, project) in report.projects.iter().enumerate() {
            self.write_project(output, i + 1, project, options)?;
        }

        if !report.dependencies.is_empty() {
            writeln!(output, "{}", "Dependency leaderboard".bold())?;
            for (i, dep) in report.dependencies.iter().take(options.top).enumerate() {
                writeln!(
                    output,
                    "  {:>3}. {:<28} {}  {:<6} {} refs, {} file(s), {} project(s)",
                    i + 1,
                    dep.name,
                    colorize_score(dep.score),
                    dep.ecosystem.label(),
                    dep.references,
                    dep.files,
                    dep.projects,
                )?;
            }
            let hidden = report.dependencies.len().saturating_sub(options.top);
            if hidden > 0 {
                writeln!(output, "  ... and {} more", hidden)?;
            }
            writeln!(output)?;
        }

        Ok(())
    }
}

impl PlainFormatter {
    fn write_project(
        &self,
        output: &mut dyn Write,
        rank: usize,
        project: &ProjectReport,
        options: &RenderOptions,
    ) -> Result<()> {
        if project.missing {
            writeln!(
                output,
                "  {:>3}. {:<24} {}  {}",
                rank,
                truncate(&project.name, 24),
                colorize_score(0.0),
                "(missing)".red()
            )?;
            writeln!(output, "       {}", project.path.display().to_string().dimmed())?;
            writeln!(output)?;
            return Ok(());
        }

        writeln!(
            output,
            "  {:>3}. {:<24} {}  {}",
            rank,
            truncate(&project.name, 24),
            colorize_score(project.score.total),
            bar(project.score.total / 100.0),
        )?;
        writeln!(output, "       {}", project.path.display().to_string().dimmed())?;
        writeln!(
            output,
            "       {} files, {}, {} dep(s) declared, {} used",
            project.stats.file_count,
            format_bytes(project.stats.total_bytes),
            project.declared_count,
            project.used.len(),
        )?;

        if options.verbose {
            let s = &project.score;
            writeln!(
                output,
                "       signals: files {:.2} size {:.2} maturity {:.2} freshness {:.2} usage {:.2} activity {:.2}",
                s.files, s.size, s.maturity, s.freshness, s.usage, s.activity
            )?;
        }

        if !project.used.is_empty() {
            let listed: Vec<String> = project
                .used
                .iter()
                .take(DEPS_SHOWN)
                .map(|d| format!("{} ({})", d.name, d.references))
                .collect();
            let mut line = listed.join(", ");
            if project.used.len() > DEPS_SHOWN {
                line.push_str(&format!(", +{} more", project.used.len() - DEPS_SHOWN));
            }
            writeln!(output, "       top deps: {}", line)?;
        }
        if !project.unused.is_empty() {
            let listed: Vec<String> = project
                .unused
                .iter()
                .map(|d| {
                    if d.dev {
                        format!("{} (dev)", d.name)
                    } else {
                        d.name.clone()
                    }
                })
                .collect();
            writeln!(output, "       {} {}", "unused:".yellow(), listed.join(", "))?;
        }
        writeln!(output)?;
        Ok(())
    }
}

/// A 0.0..=1.0 value as a fixed-width block bar.
fn bar(value: f64) -> String {
    let filled = (value.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    let mut out = String::with_capacity(BAR_WIDTH * 3);
    for _ in 0..filled {
        out.push('█');
    }
    for _ in filled..BAR_WIDTH {
        out.push('░');
    }
    out
}

fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{:>5.1}", score);
    if score >= 70.0 {
        text.green()
    } else if score >= 40.0 {
        text.yellow()
    } else {
        text.red()
    }
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let mut out: String = name.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;
    const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
    let b = bytes as f64;
    if b >= GIB {
        format!("{:.1} GiB", b / GIB)
    } else if b >= MIB {
        format!("{:.1} MiB", b / MIB)
    } else if b >= KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{} B", bytes)
    }
}
