//! JSON report rendering

use std::io::Write;

use anyhow::Result;

use crate::core::types::AnalysisReport;

use super::{Formatter, RenderOptions};

/// Serializes the whole report; `top` does not apply, machine consumers
/// get everything.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn write_report(
        &mut self,
        output: &mut dyn Write,
        report: &AnalysisReport,
        _options: &RenderOptions,
    ) -> Result<()> {
        serde_json::to_writer_pretty(&mut *output, report)?;
        writeln!(output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use chrono::Utc;

    use crate::core::types::ProjectReport;

    #[test]
    fn test_json_is_parseable() {
        let report = AnalysisReport {
            generated_at: Utc::now(),
            projects: vec![ProjectReport::missing(PathBuf::from("/gone"))],
            dependencies: vec![],
        };

        let mut output = Vec::new();
        JsonFormatter
            .write_report(&mut output, &report, &RenderOptions::default())
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert!(value["projects"][0]["missing"].as_bool().unwrap());
        assert_eq!(value["projects"][0]["score"]["total"], 0.0);
        assert!(value["dependencies"].as_array().unwrap().is_empty());
    }
}
