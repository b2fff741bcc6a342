//! Batch processing command for multiple document files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;

use findoc_core::validate_upload;

use super::process::{self, DocKind, OutputFormat, ProcessOutcome};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Document family to parse every file as
    #[arg(short, long, value_enum, default_value = "invoice")]
    kind: DocKind,

    /// Output directory (default: next to each input file)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Skip the extraction service and use only the fallback matchers
    #[arg(long)]
    fallback_only: bool,

    /// Continue past files that fail to parse
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct BatchResult {
    path: PathBuf,
    detail: String,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    // Expand glob pattern to recognized formats only.
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            config
                .limits
                .allowed_extensions
                .contains(&process::extension_of(p))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!("{} Found {} files to process", style("ℹ").blue(), files.len());

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let pipeline = super::build_pipeline(&config, args.fallback_only);

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let outcome = process_one(&pipeline, &path, &args, &config).await;
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(detail) => results.push(BatchResult {
                path,
                detail,
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                error!(file = %path.display(), error = %e, "failed to process file");
                if !args.continue_on_error {
                    pb.finish_and_clear();
                    return Err(e);
                }
                results.push(BatchResult {
                    path,
                    detail: String::new(),
                    error: Some(e.to_string()),
                    processing_time_ms,
                });
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));
        write_summary(&summary_path, &results)?;
        println!("{} Summary written to {}", style("ℹ").blue(), summary_path.display());
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    println!(
        "{} Processed {} files ({} failed) in {:.2}s",
        style("✓").green(),
        results.len(),
        failed,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

async fn process_one(
    pipeline: &findoc_core::DocumentPipeline,
    path: &Path,
    args: &BatchArgs,
    config: &findoc_core::FindocConfig,
) -> anyhow::Result<String> {
    let data = fs::read(path)?;
    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let file_kind = validate_upload(filename, data.len() as u64, &config.limits)?;

    let extension = process::extension_of(path);
    let outcome =
        process::process_bytes(pipeline, &data, file_kind, &extension, args.kind, false).await?;

    let rendered = process::render(&outcome, args.format)?;
    let out_ext = match args.format {
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Text => "txt",
    };
    let out_path = output_path(path, args.output_dir.as_deref(), out_ext);
    fs::write(&out_path, rendered)?;

    Ok(describe(&outcome))
}

fn output_path(input: &Path, output_dir: Option<&Path>, ext: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let file = format!("{stem}.{ext}");
    match output_dir {
        Some(dir) => dir.join(file),
        None => input.with_file_name(file),
    }
}

fn describe(outcome: &ProcessOutcome) -> String {
    match outcome {
        ProcessOutcome::Invoice { record, .. } => record
            .invoice_number
            .clone()
            .unwrap_or_else(|| "invoice".to_string()),
        ProcessOutcome::Transaction { record, .. } => record
            .description
            .clone()
            .unwrap_or_else(|| "transaction".to_string()),
        ProcessOutcome::Statement(parse) => {
            format!("{} transactions", parse.transactions.len())
        }
    }
}

fn write_summary(path: &Path, results: &[BatchResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["file", "status", "detail", "error", "time_ms"])?;
    for result in results {
        wtr.write_record([
            result.path.display().to_string(),
            if result.error.is_none() { "Parsed" } else { "Error" }.to_string(),
            result.detail.clone(),
            result.error.clone().unwrap_or_default(),
            result.processing_time_ms.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
