//! Scan command - OCR an invoice image, extract fields, and locate highlights.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use seikyu_core::models::config::SeikyuConfig;
use seikyu_core::{draw_highlights, HighlightStyle, InvoiceParser, OcrResult, ScanReport};

use super::load_config;
use super::output::{format_report, OutputFormat};
use crate::vision::shared_client;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Invoice image (PNG, JPEG, ...) or a text file holding a data URL
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the image with highlight boxes drawn on it
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Use a saved annotate response instead of calling the OCR provider
    #[arg(long)]
    response: Option<PathBuf>,

    /// Save the raw annotate response for later offline runs
    #[arg(long)]
    save_response: Option<PathBuf>,

    /// Include the full recognized text in the report
    #[arg(long)]
    raw_text: bool,
}

/// Per-image options shared with the batch command.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub response: Option<PathBuf>,
    pub save_response: Option<PathBuf>,
    pub overlay: Option<PathBuf>,
    pub raw_text: bool,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let format = OutputFormat::resolve(args.format, &config);

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Scanning file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(if args.response.is_some() {
        "Reading saved response..."
    } else {
        "Running OCR..."
    });
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let options = ScanOptions {
        response: args.response.clone(),
        save_response: args.save_response.clone(),
        overlay: args.overlay.clone(),
        raw_text: args.raw_text,
    };
    let result = scan_file(&args.input, &config, &options).await;
    pb.finish_and_clear();
    let report = result?;

    let output = format_report(&report, format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    if let Some(overlay) = &args.overlay {
        eprintln!(
            "{} Overlay with {} highlights written to {}",
            style("✓").green(),
            report.boxes.len(),
            overlay.display()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// OCR one image (or load its saved response) and build the report.
pub async fn scan_file(path: &Path, config: &SeikyuConfig, options: &ScanOptions) -> anyhow::Result<ScanReport> {
    let ocr = match &options.response {
        Some(response_path) => {
            debug!("Loading saved response from {}", response_path.display());
            let body = fs::read_to_string(response_path)?;
            OcrResult::from_response_json(&body)?
        }
        None => {
            let bytes = fs::read(path)?;
            let client = shared_client(&config.ocr)?;
            let annotation = client.annotate(&bytes).await?;

            if let Some(save_path) = &options.save_response {
                fs::write(save_path, &annotation.body)?;
                debug!("Saved raw response to {}", save_path.display());
            }

            annotation.result
        }
    };

    if ocr.text.trim().is_empty() {
        warn!("No text recognized in {}", path.display());
    }

    let parser = InvoiceParser::new().with_raw_text(options.raw_text || config.output.include_raw_text);
    let mut report = parser.analyze(&ocr);

    report.metadata.source = path.file_name().and_then(|n| n.to_str()).map(str::to_string);
    if report.metadata.image_size.is_none() {
        report.metadata.image_size = image::image_dimensions(path).ok();
    }

    if let Some(overlay_path) = &options.overlay {
        write_overlay(path, overlay_path, &report, config)?;
    }

    Ok(report)
}

fn write_overlay(
    source: &Path,
    target: &Path,
    report: &ScanReport,
    config: &SeikyuConfig,
) -> anyhow::Result<()> {
    let style = HighlightStyle::from_config(&config.highlight)?;
    let mut image = image::open(source)?.to_rgba8();

    draw_highlights(&mut image, &report.boxes, &style)?;
    image.save(target)?;

    debug!(
        "Drew {} highlights on {}x{} image",
        report.boxes.len(),
        image.width(),
        image.height()
    );

    Ok(())
}
