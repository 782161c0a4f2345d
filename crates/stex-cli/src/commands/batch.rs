//! Batch command - process a folder of statements into a summary report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::debug;

use stex_core::models::config::StexConfig;
use stex_core::statement::{aggregate, AggregateReport, StatementParser};
use stex_core::{RecordStatus, StatementRecord};

use super::process::{load_config, read_page_texts};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Folder containing statement PDFs
    #[arg(required = true)]
    input: PathBuf,

    /// Report CSV path
    #[arg(short, long, default_value = "statement_summary.csv")]
    output: PathBuf,

    /// Also dump records and totals as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.is_dir() {
        anyhow::bail!("Input folder not found: {}", args.input.display());
    }

    // Statement PDFs in stable filename order
    let pattern = args.input.join("*.pdf");
    let mut files: Vec<PathBuf> = glob(&pattern.to_string_lossy())?
        .filter_map(|r| r.ok())
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No PDF files found in {}", args.input.display());
    }

    println!(
        "{} Found {} statements to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let parser = StatementParser::new().with_config(config.extraction.clone());
    let mut records = Vec::with_capacity(files.len());

    for path in &files {
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let pages = read_page_texts(path);
        debug!("{}: {} pages", filename, pages.len());
        records.push(parser.process(&filename, &pages));
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let report = aggregate(&records);

    write_report_csv(&args.output, &config, &records, &report)?;
    println!(
        "{} Report written to {}",
        style("✓").green(),
        args.output.display()
    );

    if let Some(json_path) = &args.json {
        let dump = serde_json::json!({ "records": records, "report": report });
        fs::write(json_path, serde_json::to_string_pretty(&dump)?)?;
        println!(
            "{} JSON written to {}",
            style("✓").green(),
            json_path.display()
        );
    }

    print_summary(&config, &records, &report, start.elapsed());

    Ok(())
}

fn write_report_csv(
    path: &Path,
    config: &StexConfig,
    records: &[StatementRecord],
    report: &AggregateReport,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let title = format!(
        "{} - {}",
        config.report.title,
        chrono::Local::now().format("%B %Y")
    );
    wtr.write_record([title.as_str(), "", "", "", "", ""])?;
    wtr.write_record([
        "Filename",
        "Beneficiary",
        "Account Number",
        "Closing Value",
        "Institution",
        "Status",
    ])?;

    for record in records {
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
    }

    wtr.write_record(["", "", "", "", "", ""])?;

    for (institution, totals) in &report.institutions {
        let label = format!("TOTAL {}:", institution.display_name());
        let value = totals.total_value.to_string();
        wtr.write_record(["", "", label.as_str(), value.as_str(), "", ""])?;
    }

    for (beneficiary, totals) in &report.beneficiaries {
        let label = format!("TOTAL {}:", beneficiary);
        let value = totals.total_value.to_string();
        wtr.write_record(["", "", label.as_str(), value.as_str(), "", ""])?;
    }

    let grand = report.grand_total.to_string();
    wtr.write_record(["", "", "GRAND TOTAL:", grand.as_str(), "", ""])?;

    wtr.flush()?;
    Ok(())
}

fn print_summary(
    config: &StexConfig,
    records: &[StatementRecord],
    report: &AggregateReport,
    elapsed: Duration,
) {
    println!();
    println!("{}", style(&config.report.title).bold());
    println!("{}", "=".repeat(60));
    println!(
        "  Statements processed: {} in {:?}",
        records.len(),
        elapsed
    );
    println!(
        "  Complete: {}   Needs review: {}",
        style(report.complete).green(),
        style(report.needs_review).red()
    );

    println!();
    println!("  By institution:");
    for (institution, totals) in &report.institutions {
        println!(
            "    {}: {} files ({} complete), {}",
            institution.display_name(),
            totals.files,
            totals.complete,
            format_money(totals.total_value)
        );
    }

    if !report.beneficiaries.is_empty() {
        println!();
        println!("  By beneficiary:");
        for (beneficiary, totals) in &report.beneficiaries {
            println!(
                "    {}: {} files, {}",
                beneficiary,
                totals.files,
                format_money(totals.total_value)
            );
        }
    }

    println!();
    println!(
        "  GRAND TOTAL: {}",
        style(format_money(report.grand_total)).bold()
    );

    if !report.review_items.is_empty() {
        let limit = config.report.review_list_limit;
        println!();
        println!(
            "{}",
            style(format!(
                "{} statements need manual review:",
                report.review_items.len()
            ))
            .yellow()
        );
        for item in report.review_items.iter().take(limit) {
            println!(
                "  - {} [{}] ({})",
                item.filename,
                item.institution.display_name(),
                item.missing.join(", ")
            );
        }
        if report.review_items.len() > limit {
            println!("  ... and {} more", report.review_items.len() - limit);
        }
    }

    let samples: Vec<&StatementRecord> = records
        .iter()
        .filter(|r| r.status() == RecordStatus::Complete)
        .take(3)
        .collect();
    if !samples.is_empty() {
        println!();
        println!("Sample extractions:");
        for record in samples {
            println!(
                "  {} -> {}, {}",
                record.filename,
                record.account_number.as_deref().unwrap_or(""),
                record
                    .closing_value
                    .map(format_money)
                    .unwrap_or_default()
            );
        }
    }
    println!();
}

/// Format an amount as $1,234.56 for the console summary.
fn format_money(amount: Decimal) -> String {
    let s = format!("{:.2}", amount);
    let (int_part, dec_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let chars: Vec<char> = digits.chars().collect();
    let mut formatted = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    format!("{}${}.{}", sign, formatted, dec_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_money() {
        assert_eq!(
            format_money(Decimal::from_str("1234.56").unwrap()),
            "$1,234.56"
        );
        assert_eq!(
            format_money(Decimal::from_str("705122.36").unwrap()),
            "$705,122.36"
        );
        assert_eq!(format_money(Decimal::ZERO), "$0.00");
        assert_eq!(
            format_money(Decimal::from_str("-12.5").unwrap()),
            "-$12.50"
        );
    }
}
