//! CLI entry point for the teen risk predictor.

use anyhow::Result;
use clap::Parser;
use risk_model::{RiskAssessment, RiskFeatures, RiskService, TrainingConfig, format_dollars};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "risk-predictor",
    version,
    about = "Predicts whether a teen is at high risk from phone usage patterns",
    long_about = "Trains a classifier on the phone-usage survey and scores one profile.\n\n\
                  EXAMPLE:\n  \
                  risk-predictor --dataset teen_phone_addiction_dataset.csv \\\n    \
                  --daily-usage 10 --sleep-hours 4 --phone-checks 120 --apps-used 3 --social-time 6"
)]
struct Args {
    /// Survey CSV used for training
    #[arg(short, long, default_value = "teen_phone_addiction_dataset.csv")]
    dataset: PathBuf,

    /// Daily usage in hours (dashboard range 0 - 12)
    #[arg(long, default_value = "5.0")]
    daily_usage: f64,

    /// Sleep in hours (dashboard range 3 - 10)
    #[arg(long, default_value = "7.0")]
    sleep_hours: f64,

    /// Phone checks per day (dashboard range 0 - 150)
    #[arg(long, default_value = "50")]
    phone_checks: f64,

    /// Apps used daily (dashboard range 1 - 20)
    #[arg(long, default_value = "5")]
    apps_used: f64,

    /// Time on social media in hours (dashboard range 0 - 10)
    #[arg(long, default_value = "2.0")]
    social_time: f64,

    /// Probability at or above which the profile is high risk
    #[arg(short, long, default_value = "0.40")]
    threshold: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Suppress all logs except errors
    #[arg(short, long)]
    quiet: bool,

    /// Output the assessment as JSON
    ///
    /// Disables all logs to keep stdout machine-readable.
    #[arg(long)]
    json: bool,
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

fn print_assessment(features: &RiskFeatures, assessment: &RiskAssessment) {
    let rule = "=".repeat(60);
    println!("{}", rule);
    println!("📱 TEEN MENTAL HEALTH RISK PREDICTOR");
    println!("{}", rule);

    println!("\nRisk Assessment");
    if assessment.is_high_risk {
        println!("  🚨 HIGH RISK DETECTED");
        println!(
            "  Risk Probability: {:.1}% (Above Threshold)",
            assessment.probability * 100.0
        );
    } else {
        println!("  ✅ Low Risk");
        println!(
            "  Risk Probability: {:.1}% (Safe)",
            assessment.probability * 100.0
        );
    }

    println!("\nBusiness Action");
    if assessment.is_high_risk {
        println!("  Recommend: {}", assessment.action.label());
        println!("  Sending automated alert to parents...");
    } else {
        println!("  {}", assessment.action.label());
    }

    println!("\nFinancial Impact");
    let impact = &assessment.financial_impact;
    if assessment.is_high_risk {
        println!("  Potential Cost of Crisis: {}", format_dollars(impact.crisis_cost));
        println!("  Cost of Intervention: {}", format_dollars(impact.intervention_cost));
        println!("  Net Savings: {}", format_dollars(impact.net_savings));
    } else {
        println!("  Savings: {} (No Risk)", format_dollars(impact.net_savings));
    }

    println!("\nWhy this prediction?");
    println!("  {}", assessment.explanation);
    println!(
        "  Checks per app: {:.2} ({} checks across {} apps)",
        assessment.checks_per_app, features.phone_checks_per_day, features.apps_used_daily
    );
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    let config = TrainingConfig::builder()
        .decision_threshold(args.threshold)
        .build()?;
    debug!("Training configuration: {:?}", config);

    let features = RiskFeatures::new(
        args.daily_usage,
        args.sleep_hours,
        args.phone_checks,
        args.apps_used,
        args.social_time,
    )?;

    let service = RiskService::from_csv(args.dataset.clone(), config)?;
    let assessment = match service.assess(&features) {
        Ok(assessment) => assessment,
        Err(e) => {
            eprintln!(
                "✗ Error loading data: {}. Please ensure '{}' exists.",
                e,
                args.dataset.display()
            );
            std::process::exit(1);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        if !args.quiet {
            println!("✅ Model Trained & Ready\n");
        }
        print_assessment(&features, &assessment);
    }

    Ok(())
}
