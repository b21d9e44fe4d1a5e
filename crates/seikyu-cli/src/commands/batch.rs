//! Batch processing command for multiple invoice images.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use seikyu_core::models::invoice::elapsed_ms;
use seikyu_core::ScanReport;

use super::load_config;
use super::output::{format_report, OutputFormat};
use super::scan::{scan_file, ScanOptions};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input images
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of concurrent OCR requests
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Draw highlight overlays next to each report
    #[arg(long)]
    overlay: bool,

    /// Directory of saved responses named `<image stem>.json`
    #[arg(long)]
    responses: Option<PathBuf>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    report: Option<ScanReport>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let format = OutputFormat::resolve(args.format, &config);

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Create output directory if specified
    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut pending = stream::iter(files.iter().cloned())
        .map(|path| {
            let options = scan_options(&path, &args);
            let config = &config;
            async move {
                let file_start = Instant::now();
                let result = scan_file(&path, config, &options).await;
                (path, result, elapsed_ms(file_start.elapsed()))
            }
        })
        .buffered(args.jobs.max(1));

    let mut results = Vec::with_capacity(files.len());

    while let Some((path, result, processing_time_ms)) = pending.next().await {
        match result {
            Ok(report) => {
                results.push(ProcessResult {
                    path,
                    report: Some(report),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        report: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    overall_pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    // Write outputs
    let successful: Vec<_> = results.iter().filter(|r| r.report.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        if let (Some(report), Some(output_dir)) = (&result.report, &args.output_dir) {
            let output_path = output_dir.join(format!("{}.{}", file_stem(&result.path), format.extension()));

            fs::write(&output_path, format_report(report, format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?} (finished {})",
        style("✓").green(),
        results.len(),
        start.elapsed(),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn is_supported(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(
        ext.to_lowercase().as_str(),
        "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" | "tif" | "tiff"
    )
}

fn file_stem(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("invoice")
}

fn scan_options(path: &Path, args: &BatchArgs) -> ScanOptions {
    let stem = file_stem(path);

    ScanOptions {
        response: args.responses.as_ref().map(|dir| dir.join(format!("{}.json", stem))),
        save_response: None,
        overlay: match (&args.output_dir, args.overlay) {
            (Some(dir), true) => Some(dir.join(format!("{}.overlay.png", stem))),
            _ => None,
        },
        raw_text: false,
    }
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(seikyu_core::FieldRecord::KEYS);
    header.extend(["highlights", "processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let time = result.processing_time_ms.to_string();

        let mut row: Vec<String> = vec![filename.to_string()];
        match &result.report {
            Some(report) => {
                row.push("success".to_string());
                row.extend(report.fields.values().iter().map(|v| v.to_string()));
                row.push(report.boxes.len().to_string());
                row.push(time);
                row.push(String::new());
            }
            None => {
                row.push("error".to_string());
                row.extend(std::iter::repeat_n(String::new(), 7));
                row.push(time);
                row.push(result.error.clone().unwrap_or_default());
            }
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
