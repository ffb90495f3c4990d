//! CLI entry point for the data quality report tool.

use anyhow::Result;
use clap::Parser;
use quality_report::reporting::{console, html};
use quality_report::{QualityReportPipeline, ReportConfig, ReportGenerator};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const USAGE: &str = "Usage: report-tool <path_to_csv> [output_html_path]\n\nExample: report-tool data.csv";

#[derive(Parser, Debug)]
#[command(
    name = "report-tool",
    version,
    about = "Data quality report generator for CSV datasets",
    long_about = "Analyzes a CSV file for missing values, outliers, duplicates, type issues and \
                  categorical distributions, then writes a standalone HTML report.\n\n\
                  EXAMPLES:\n  \
                  # Report next to the working directory as data_quality_report.html\n  \
                  report-tool data.csv\n\n  \
                  # Explicit output path\n  \
                  report-tool data.csv reports/data.html\n\n  \
                  # Machine-readable output\n  \
                  report-tool data.csv --json | jq .quality_score"
)]
struct Args {
    /// Path to the CSV file to analyze
    input: Option<String>,

    /// Output HTML path
    ///
    /// If not specified, uses "<input_stem>_quality_report.html"
    output: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Suppress the console report (only show errors and the output path)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of the console report
    ///
    /// Disables all logs; the HTML report is still written.
    #[arg(long)]
    json: bool,

    /// Also write the JSON report next to the HTML file
    #[arg(short = 'r', long)]
    emit_json: bool,

    /// Missing percentage above which a column is high-risk (0 - 100)
    #[arg(long, default_value = "50.0")]
    high_missing_threshold: f64,

    /// IQR multiplier for the outlier fences
    #[arg(long, default_value = "1.5")]
    iqr_multiplier: f64,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "error" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let Some(input) = args.input.as_deref() else {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    };

    init_logging(&args.log_level, args.quiet, args.json);

    let config = ReportConfig::builder()
        .high_missing_threshold(args.high_missing_threshold)
        .iqr_multiplier(args.iqr_multiplier)
        .build()?;
    debug!("Report configuration: {:?}", config);

    let pipeline = QualityReportPipeline::builder()
        .config(config)
        .on_progress(|update| debug!("[{:.0}%] {}", update.progress * 100.0, update.message))
        .build()?;

    let input_path = Path::new(input);
    let output = match pipeline.run_file(input_path) {
        Ok(output) => output,
        Err(e) if e.is_load_error() => {
            eprintln!("✗ Error loading file: {}", e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let generator = ReportGenerator::for_input(input_path, args.output.map(PathBuf::from));
    let document = html::render(&output.report, &output.charts, pipeline.config());
    let html_path = generator.write_html(&document)?;

    if args.emit_json {
        let json_path = generator.write_json(&output.report)?;
        info!("JSON report written to {}", json_path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output.report)?);
        return Ok(());
    }

    if !args.quiet {
        print!("{}", console::render(&output.report, pipeline.config()));
    }

    println!("\n✅ HTML report saved to: {}", html_path.display());
    if !args.quiet {
        let rule = "=".repeat(60);
        println!("\n{}\n   ANALYSIS COMPLETE\n{}", rule, rule);
    }

    Ok(())
}
