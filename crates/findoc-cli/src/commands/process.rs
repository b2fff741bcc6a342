//! Process command - extract data from a single document file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;

use findoc_core::{
    DocumentPipeline, FileKind, InvoiceRecord, StatementParse, TransactionRecord, parse_statement,
    validate_upload,
};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, CSV or spreadsheet)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Document family to parse as
    #[arg(short, long, value_enum, default_value = "invoice")]
    pub kind: DocKind,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Skip the extraction service and use only the fallback matchers
    #[arg(long)]
    pub fallback_only: bool,

    /// Include the raw extracted text in JSON output
    #[arg(long)]
    pub include_text: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum DocKind {
    /// Invoice document
    Invoice,
    /// Bank statement
    Statement,
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

/// What one processed file produced.
#[derive(Serialize)]
#[serde(untagged)]
pub enum ProcessOutcome {
    Invoice {
        file_kind: FileKind,
        record: InvoiceRecord,
        #[serde(skip_serializing_if = "Option::is_none")]
        raw_text: Option<String>,
    },
    Transaction {
        file_kind: FileKind,
        record: TransactionRecord,
        #[serde(skip_serializing_if = "Option::is_none")]
        raw_text: Option<String>,
    },
    Statement(StatementParse),
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let data = fs::read(&args.input)?;
    let filename = args
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let file_kind = validate_upload(filename, data.len() as u64, &config.limits)?;

    let pipeline = super::build_pipeline(&config, args.fallback_only);
    let extension = extension_of(&args.input);
    let outcome = process_bytes(
        &pipeline,
        &data,
        file_kind,
        &extension,
        args.kind,
        args.include_text,
    )
    .await?;

    let rendered = render(&outcome, args.format)?;
    match &args.output {
        Some(path) => fs::write(path, rendered)?,
        None => print!("{rendered}"),
    }

    eprintln!(
        "{} Processed {} in {:.2}s",
        style("✓").green(),
        args.input.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Route bytes through the right parse path for the requested family.
pub async fn process_bytes(
    pipeline: &DocumentPipeline,
    data: &[u8],
    file_kind: FileKind,
    extension: &str,
    kind: DocKind,
    include_text: bool,
) -> anyhow::Result<ProcessOutcome> {
    let outcome = match (kind, file_kind) {
        // CSV statement exports carry the table directly; no model call.
        (DocKind::Statement, FileKind::Csv) => ProcessOutcome::Statement(parse_statement(data)),
        (DocKind::Statement, _) => {
            let (doc, record) = pipeline.parse_transaction(data, extension).await?;
            ProcessOutcome::Transaction {
                file_kind: doc.file_kind,
                record,
                raw_text: include_text.then_some(doc.raw_text),
            }
        }
        (DocKind::Invoice, _) => {
            let (doc, record) = pipeline.parse_invoice(data, extension).await?;
            ProcessOutcome::Invoice {
                file_kind: doc.file_kind,
                record,
                raw_text: include_text.then_some(doc.raw_text),
            }
        }
    };
    Ok(outcome)
}

/// Render an outcome in the requested output format.
pub fn render(outcome: &ProcessOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(outcome)?)),
        OutputFormat::Csv => render_csv(outcome),
        OutputFormat::Text => Ok(render_text(outcome)),
    }
}

fn render_csv(outcome: &ProcessOutcome) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    match outcome {
        ProcessOutcome::Invoice { record, .. } => {
            wtr.write_record([
                "invoice_number",
                "invoice_date",
                "vendor_name",
                "vendor_gstin",
                "taxable_value",
                "gst_amount",
                "invoice_total",
                "currency",
            ])?;
            wtr.write_record([
                record.invoice_number.clone().unwrap_or_default(),
                record.invoice_date.map(|d| d.to_string()).unwrap_or_default(),
                record.vendor_name.clone().unwrap_or_default(),
                record.vendor_gstin.clone().unwrap_or_default(),
                record.taxable_value.map(|v| v.to_string()).unwrap_or_default(),
                record.gst_amount.map(|v| v.to_string()).unwrap_or_default(),
                record.invoice_total.map(|v| v.to_string()).unwrap_or_default(),
                record.currency.clone().unwrap_or_default(),
            ])?;
        }
        ProcessOutcome::Transaction { record, .. } => {
            write_transaction_header(&mut wtr)?;
            write_transaction_row(&mut wtr, record)?;
        }
        ProcessOutcome::Statement(parse) => {
            write_transaction_header(&mut wtr)?;
            for record in &parse.transactions {
                write_transaction_row(&mut wtr, record)?;
            }
        }
    }
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn write_transaction_header(wtr: &mut csv::Writer<Vec<u8>>) -> csv::Result<()> {
    wtr.write_record([
        "txn_date",
        "description",
        "ref_id",
        "debit",
        "credit",
        "balance",
        "account_number",
        "mode",
    ])
}

fn write_transaction_row(
    wtr: &mut csv::Writer<Vec<u8>>,
    record: &TransactionRecord,
) -> csv::Result<()> {
    wtr.write_record([
        record.txn_date.map(|d| d.to_string()).unwrap_or_default(),
        record.description.clone().unwrap_or_default(),
        record.ref_id.clone().unwrap_or_default(),
        record.debit.map(|v| v.to_string()).unwrap_or_default(),
        record.credit.map(|v| v.to_string()).unwrap_or_default(),
        record.balance.map(|v| v.to_string()).unwrap_or_default(),
        record.account_number.clone().unwrap_or_default(),
        record.mode.map(|m| m.to_string()).unwrap_or_default(),
    ])
}

fn render_text(outcome: &ProcessOutcome) -> String {
    match outcome {
        ProcessOutcome::Invoice { record, .. } => {
            let mut out = String::from("Invoice\n");
            let mut field = |label: &str, value: Option<String>| {
                if let Some(v) = value {
                    out.push_str(&format!("  {label}: {v}\n"));
                }
            };
            field("Number", record.invoice_number.clone());
            field("Date", record.invoice_date.map(|d| d.to_string()));
            field("Vendor", record.vendor_name.clone());
            field("GSTIN", record.vendor_gstin.clone());
            field("Taxable value", record.taxable_value.map(|v| v.to_string()));
            field("GST", record.gst_amount.map(|v| v.to_string()));
            field("Total", record.invoice_total.map(|v| v.to_string()));
            field("Currency", record.currency.clone());
            out
        }
        ProcessOutcome::Transaction { record, .. } => {
            format!(
                "Transaction\n  Date: {}\n  Description: {}\n  Debit: {}\n  Credit: {}\n",
                record.txn_date.map(|d| d.to_string()).unwrap_or_default(),
                record.description.clone().unwrap_or_default(),
                record.debit.map(|v| v.to_string()).unwrap_or_default(),
                record.credit.map(|v| v.to_string()).unwrap_or_default(),
            )
        }
        ProcessOutcome::Statement(parse) => {
            let mut out = format!("Statement: {} transactions\n", parse.transactions.len());
            if let Some(meta) = &parse.metadata {
                if let Some(acc) = &meta.account_number {
                    out.push_str(&format!("  Account: {acc}\n"));
                }
                if let Some(ifsc) = &meta.ifsc {
                    out.push_str(&format!("  IFSC: {ifsc}\n"));
                }
            }
            out
        }
    }
}

/// Extension helper shared with the batch command.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase()
}
