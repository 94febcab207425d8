//! Scan command - extract fields from a single receipt file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use relot_core::{
    HeuristicParser, PureOcrEngine, ReceiptParser, ReceiptScanner, RelotConfig, ScanResult,
    SharedEngine, UNNAMED_ITEM,
};
use tracing::info;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Input file: receipt image or .txt OCR dump
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory for the OCR engine
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    info!("Scanning file: {}", args.input.display());

    let result = match extension.as_str() {
        "txt" => scan_text_dump(&args.input, &config)?,
        "png" | "jpg" | "jpeg" | "webp" | "tiff" | "tif" | "bmp" => scan_image(&args, &config)?,
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    if !result.success {
        eprintln!(
            "{} OCR failed: {}",
            style("✗").red(),
            result.error.as_deref().unwrap_or("unknown error")
        );
    }
    for warning in &result.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Re-parse a saved OCR dump without touching the engine.
pub(crate) fn scan_text_dump(path: &Path, config: &RelotConfig) -> anyhow::Result<ScanResult> {
    let text = fs::read_to_string(path)?;
    let parser = parser_from(config);
    let parsed = parser.parse(&text);

    Ok(ScanResult {
        name: parsed.name.unwrap_or_else(|| UNNAMED_ITEM.to_string()),
        cost: parsed.cost,
        quantity: parsed.quantity,
        raw_text: text,
        success: true,
        error: None,
        warnings: parsed.warnings,
        processing_time_ms: parsed.processing_time_ms,
    })
}

fn scan_image(args: &ScanArgs, config: &RelotConfig) -> anyhow::Result<ScanResult> {
    let image = image::open(&args.input)?;

    let scanner = build_scanner(args.model_dir.clone(), config);

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}%")
            .unwrap()
            .progress_chars("##-"),
    );

    let observer = |percent: u8| pb.set_position(percent as u64);
    let result = scanner.scan(&image, Some(&observer));
    pb.finish_with_message("Done");

    Ok(result)
}

/// Build a scanner with a lazily-initialized native engine.
pub(crate) fn build_scanner(
    model_dir: Option<PathBuf>,
    config: &RelotConfig,
) -> ReceiptScanner<PureOcrEngine> {
    let model_dir = model_dir.unwrap_or_else(|| config.ocr.model_dir.clone());
    let ocr_config = config.ocr.clone();
    let engine = SharedEngine::new(move || PureOcrEngine::from_dir(&model_dir, &ocr_config));

    ReceiptScanner::new(engine).with_parser(parser_from(config))
}

fn parser_from(config: &RelotConfig) -> HeuristicParser {
    HeuristicParser::new()
        .with_config(config.extraction.clone())
        .with_vocabulary(config.vocabulary.clone())
}

pub(crate) fn format_result(result: &ScanResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Text => Ok(format_result_text(result)),
    }
}

pub(crate) fn format_result_text(result: &ScanResult) -> String {
    let mut output = String::new();

    if result.has_name() {
        output.push_str(&format!("Item:     {}\n", result.name));
    } else {
        output.push_str("Item:     (no name extracted)\n");
    }
    output.push_str(&format!("Cost:     ${}\n", result.cost));
    output.push_str(&format!("Quantity: {}\n", result.quantity));
    output.push_str(&format!(
        "Status:   {}\n",
        if result.success { "ok" } else { "OCR failed" }
    ));

    output
}
