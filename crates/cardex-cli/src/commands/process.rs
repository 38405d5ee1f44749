//! Process command - extract fields from a single card.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use cardex_core::{CardParser, DocumentFamily, ExtractionOutcome, OcrOutput};
use cardex_core::document::extract_with;

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// OCR output for the front side (.json, or plain text with one fragment per line)
    #[arg(required = true)]
    front: PathBuf,

    /// OCR output for the back side
    #[arg(short, long)]
    back: Option<PathBuf>,

    /// Document family: auto, national or general
    #[arg(long, default_value = "auto")]
    family: DocumentFamily,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let parser = CardParser::new()
        .with_config(config)
        .with_family(args.family);

    info!("Processing card: {}", args.front.display());

    let front = read_side(&args.front);
    let back = args.back.as_deref().map(read_side);

    let outcome = extract_with(&parser, &front, back.as_ref());
    let output = format_outcome(&outcome, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read one side's OCR output. Unreadable files become a failed side so the
/// caller still gets a JSON error object.
pub fn read_side(path: &Path) -> OcrOutput {
    if !path.exists() {
        warn!("OCR output not found: {}", path.display());
        return OcrOutput::failed("File not found");
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return OcrOutput::failed(format!("Failed to read {}: {}", path.display(), e));
        }
    };

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if !is_json {
        return OcrOutput::from_text(&content);
    }

    match OcrOutput::from_json(&content) {
        Ok(output) => output,
        Err(e) => {
            warn!("Invalid OCR output in {}: {}", path.display(), e);
            OcrOutput::failed(format!("Invalid OCR output: {}", e))
        }
    }
}

pub fn format_outcome(outcome: &ExtractionOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&outcome.to_json())?),
        OutputFormat::Text => Ok(format_outcome_text(outcome)),
    }
}

fn format_outcome_text(outcome: &ExtractionOutcome) -> String {
    let record = match outcome {
        ExtractionOutcome::Record(record) => record,
        ExtractionOutcome::Error { error } => return format!("Error: {}\n", error),
    };

    let mut output = String::new();
    output.push_str(&format!("Type: {}\n", record.kind()));

    for (field, value) in record.fields() {
        output.push_str(&format!("{:<22}{}\n", format!("{}:", field), value.unwrap_or("-")));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardex_core::{ExtractedRecord, VoterIdRecord};

    #[test]
    fn test_text_format() {
        let outcome = ExtractionOutcome::Record(ExtractedRecord::Voter(VoterIdRecord {
            voter_id: Some("ABC1234567".to_string()),
            ..Default::default()
        }));
        let text = format_outcome(&outcome, OutputFormat::Text).unwrap();

        assert!(text.starts_with("Type: Voter ID\n"));
        assert!(text.contains("voter_id:             ABC1234567\n"));
        assert!(text.contains("father_name:          -\n"));
    }

    #[test]
    fn test_missing_side() {
        assert_eq!(
            read_side(Path::new("/nonexistent/front.json")),
            OcrOutput::failed("File not found")
        );
    }
}
