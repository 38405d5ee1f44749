//! Batch processing command for multiple OCR output files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use cardex_core::document::extract_with;
use cardex_core::{CardParser, DocumentFamily, ExtractionOutcome};

use super::config::load_config;
use super::process::{format_outcome, read_side, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching OCR output files (.json or .txt)
    #[arg(required = true)]
    input: String,

    /// Output directory for per-card results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Document family: auto, national or general
    #[arg(long, default_value = "auto")]
    family: DocumentFamily,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    outcome: ExtractionOutcome,
    processing_time_ms: u64,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "json" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = CardParser::new()
        .with_config(config)
        .with_family(args.family);

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let outcome = extract_with(&parser, &read_side(&path), None);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        if let ExtractionOutcome::Error { error } = &outcome {
            warn!("No record for {}: {}", path.display(), error);
        }

        if let Some(output_dir) = &args.output_dir {
            write_output(output_dir, &path, &outcome, args.format)?;
        }

        results.push(ProcessResult {
            path,
            outcome,
            processing_time_ms,
        });
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

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

    let failed = results.iter().filter(|r| r.outcome.is_error()).count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!("  Records: {}", style(results.len() - failed).green());
    if failed > 0 {
        println!("  Errors:  {}", style(failed).red());
    }

    Ok(())
}

fn write_output(
    output_dir: &Path,
    input: &Path,
    outcome: &ExtractionOutcome,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let output_name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("card");

    let extension = match format {
        OutputFormat::Json => "json",
        OutputFormat::Text => "txt",
    };

    let output_path = output_dir.join(format!("{}.{}", output_name, extension));
    fs::write(&output_path, format_outcome(outcome, format)?)?;
    debug!("Wrote output to {}", output_path.display());

    Ok(())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "type",
        "name",
        "id_number",
        "missing_fields",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time = result.processing_time_ms.to_string();

        match &result.outcome {
            ExtractionOutcome::Record(record) => {
                let name = record.get("name").or(record.get("full_name")).unwrap_or("");
                let id = record.get("id_number").or(record.get("voter_id")).unwrap_or("");
                wtr.write_record([
                    filename,
                    "success",
                    record.kind().label(),
                    name,
                    id,
                    &record.missing_fields().join(";"),
                    &time,
                    "",
                ])?;
            }
            ExtractionOutcome::Error { error } => {
                wtr.write_record([filename, "error", "", "", "", "", &time, error])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
