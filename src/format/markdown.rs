//! Markdown report rendering

use std::io::Write;

use anyhow::Result;

use crate::core::types::AnalysisReport;

use super::{Formatter, RenderOptions};
use crate::format::plain::format_bytes;

pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn write_report(
        &mut self,
        output: &mut dyn Write,
        report: &AnalysisReport,
        options: &RenderOptions,
    ) -> Result<()> {
        writeln!(output, "# heft report")?;
        writeln!(output)?;
        writeln!(output, "Generated: {}", report.generated_at.to_rfc3339())?;
        writeln!(output)?;

        writeln!(output, "## Projects")?;
        writeln!(output)?;
        writeln!(output, "| # | Project | Score | Files | Size | Deps used |")?;
        writeln!(output, "|--:|---------|------:|------:|-----:|----------:|")?;
        for (i, project) in report.projects.iter().enumerate() {
            if project.missing {
                writeln!(
                    output,
                    "| {} | {} (missing) | 0.0 | - | - | - |",
                    i + 1,
                    project.name
                )?;
            } else {
                writeln!(
                    output,
                    "| {} | {} | {:.1} | {} | {} | {}/{} |",
                    i + 1,
                    project.name,
                    project.score.total,
                    project.stats.file_count,
                    format_bytes(project.stats.total_bytes),
                    project.used.len(),
                    project.declared_count,
                )?;
            }
        }
        writeln!(output)?;

        for project in report.projects.iter().filter(|p| !p.missing) {
            if project.used.is_empty() && project.unused.is_empty() {
                continue;
            }
            writeln!(output, "### {}", project.name)?;
            writeln!(output)?;
            if !project.used.is_empty() {
                writeln!(output, "| Dependency | Ecosystem | References | Files |")?;
                writeln!(output, "|------------|-----------|-----------:|------:|")?;
                for dep in &project.used {
                    writeln!(
                        output,
                        "| {} | {} | {} | {} |",
                        dep.name,
                        dep.ecosystem.label(),
                        dep.references,
                        dep.files
                    )?;
                }
                writeln!(output)?;
            }
            if !project.unused.is_empty() {
                let listed: Vec<String> = project
                    .unused
                    .iter()
                    .map(|d| {
                        if d.dev {
                            format!("`{}` (dev)", d.name)
                        } else {
                            format!("`{}`", d.name)
                        }
                    })
                    .collect();
                writeln!(output, "Unused: {}", listed.join(", "))?;
                writeln!(output)?;
            }
        }

        if !report.dependencies.is_empty() {
            writeln!(output, "## Dependency leaderboard")?;
            writeln!(output)?;
            writeln!(
                output,
                "| # | Dependency | Ecosystem | Score | References | Files | Projects |"
            )?;
            writeln!(
                output,
                "|--:|------------|-----------|------:|-----------:|------:|---------:|"
            )?;
            for (i, dep) in report.dependencies.iter().take(options.top).enumerate() {
                writeln!(
                    output,
                    "| {} | {} | {} | {:.1} | {} | {} | {} |",
                    i + 1,
                    dep.name,
                    dep.ecosystem.label(),
                    dep.score,
                    dep.references,
                    dep.files,
                    dep.projects
                )?;
            }
            writeln!(output)?;
        }

        Ok(())
    }
}
