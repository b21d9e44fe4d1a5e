//! Output formatting shared by the commands.

use clap::ValueEnum;
use serde::Serialize;

use seikyu_core::models::config::SeikyuConfig;
use seikyu_core::{FieldRecord, ScanReport};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// The explicit choice, else the configured default, else JSON.
    pub fn resolve(explicit: Option<OutputFormat>, config: &SeikyuConfig) -> Self {
        explicit
            .or_else(|| OutputFormat::from_str(&config.output.format, true).ok())
            .unwrap_or(OutputFormat::Json)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

#[derive(Serialize)]
struct FieldsWithTargets<'a> {
    fields: &'a FieldRecord,
    targets: &'a [String],
}

/// Format extracted fields, optionally with their highlight targets.
pub fn format_fields(
    record: &FieldRecord,
    targets: Option<&[String]>,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => match targets {
            Some(targets) => Ok(serde_json::to_string_pretty(&FieldsWithTargets {
                fields: record,
                targets,
            })?),
            None => Ok(serde_json::to_string_pretty(record)?),
        },
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => {
            let mut output = format_text(record);
            if let Some(targets) = targets {
                output.push_str(&format_targets(targets));
            }
            Ok(output)
        }
    }
}

/// Format a full scan report.
pub fn format_report(report: &ScanReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(&report.fields),
        OutputFormat::Text => {
            let mut output = format_text(&report.fields);
            output.push_str(&format_targets(&report.targets));
            output.push_str(&format!("\nHighlights: {}\n", report.boxes.len()));
            for (i, b) in report.boxes.iter().enumerate() {
                let (x0, y0, x1, y1) = b.rect();
                output.push_str(&format!("  {:>2}. ({}, {}) - ({}, {})\n", i + 1, x0, y0, x1, y1));
            }
            if let Some(text) = &report.raw_text {
                output.push_str("\nOCR text:\n");
                output.push_str(text);
                if !text.ends_with('\n') {
                    output.push('\n');
                }
            }
            Ok(output)
        }
    }
}

fn format_csv(record: &FieldRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(FieldRecord::KEYS)?;
    wtr.write_record(record.values())?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &FieldRecord) -> String {
    let mut output = String::new();

    for (label, value) in FieldRecord::LABELS.iter().zip(record.values()) {
        output.push_str(&format!("{}: {}\n", label, value));
    }

    output
}

fn format_targets(targets: &[String]) -> String {
    let mut output = String::from("\nTargets:\n");
    for target in targets {
        output.push_str(&format!("  - {}\n", target));
    }
    output
}
