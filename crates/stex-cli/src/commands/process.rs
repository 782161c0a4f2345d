//! Process command - extract fields from a single statement file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::{info, warn};

use stex_core::models::config::StexConfig;
use stex_core::pdf::{PageTextSource, PdfExtractor};
use stex_core::statement::StatementParser;
use stex_core::{RecordStatus, StatementRecord};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input statement PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let filename = args
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    let pages = read_page_texts(&args.input);

    let parser = StatementParser::new().with_config(config.extraction.clone());
    let record = parser.process(&filename, &pages);

    let output = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!("{} Wrote {}", style("✓").green(), output_path.display());
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Read per-page text for a document. An unreadable document degrades to
/// zero pages so every page-dependent field resolves to absent and the
/// document lands in the needs-review bucket instead of aborting the run.
pub(crate) fn read_page_texts(path: &Path) -> Vec<Option<String>> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            warn!("{}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let mut extractor = PdfExtractor::new();
    if let Err(e) = extractor.load(&data) {
        warn!("{}: {}", path.display(), e);
        return Vec::new();
    }

    match extractor.page_texts() {
        Ok(pages) => pages,
        Err(e) => {
            warn!("{}: {}", path.display(), e);
            Vec::new()
        }
    }
}

pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<StexConfig> {
    Ok(if let Some(path) = config_path {
        StexConfig::from_file(Path::new(path))?
    } else {
        StexConfig::default()
    })
}

fn format_record(record: &StatementRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record([
                "filename",
                "beneficiary",
                "account_number",
                "closing_value",
                "institution",
                "status",
            ])?;
            let value = record
                .closing_value
                .map(|v| v.to_string())
                .unwrap_or_default();
            wtr.write_record([
                record.filename.as_str(),
                record.beneficiary.as_deref().unwrap_or(""),
                record.account_number.as_deref().unwrap_or(""),
                value.as_str(),
                record.institution.display_name(),
                record.status().display(),
            ])?;
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => Ok(format_record_text(record)),
    }
}

fn format_record_text(record: &StatementRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Statement: {}\n", record.filename));
    output.push_str(&format!(
        "Institution: {}\n",
        record.institution.display_name()
    ));
    output.push_str(&format!(
        "Account: {}\n",
        record.account_number.as_deref().unwrap_or("(not found)")
    ));
    if let Some(beneficiary) = &record.beneficiary {
        output.push_str(&format!("Beneficiary: {}\n", beneficiary));
    }
    output.push_str(&format!(
        "Closing value: {}\n",
        record
            .closing_value
            .map(|v| format!("${}", v))
            .unwrap_or_else(|| "(not found)".to_string())
    ));

    match record.status() {
        RecordStatus::Complete => output.push_str("Status: complete\n"),
        RecordStatus::NeedsReview => {
            output.push_str(&format!(
                "Status: needs review ({})\n",
                record.missing_fields().join(", ")
            ));
        }
    }

    output
}
