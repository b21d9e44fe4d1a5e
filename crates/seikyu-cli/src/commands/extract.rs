//! Extract command - run the field rules over already-recognized text.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use seikyu_core::InvoiceParser;

use super::load_config;
use super::output::{format_fields, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Text file with OCR output ("-" for stdin)
    #[arg(default_value = "-")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Also print the raw matched substrings used for highlighting
    #[arg(long)]
    targets: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let format = OutputFormat::resolve(args.format, &config);

    let text = if args.input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        let path = PathBuf::from(&args.input);
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        info!("Extracting fields from {}", path.display());
        fs::read_to_string(&path)?
    };

    debug!("Read {} chars of text", text.chars().count());

    let extraction = InvoiceParser::new().parse(&text);
    let targets = args.targets.then_some(extraction.targets.as_slice());
    let output = format_fields(&extraction.record, targets, format)?;

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

    Ok(())
}
