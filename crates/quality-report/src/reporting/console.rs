//! Plain-text console report.

use std::fmt::Write;

use crate::config::ReportConfig;
use crate::types::QualityReport;
use crate::utils::{format_thousands, truncate_chars};

const RULE_WIDTH: usize = 60;

fn banner(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "\n{}\n{}\n{}", rule, title, rule);
}

/// Twenty-cell bar, one filled cell per 5%.
fn missing_bar(pct: f64) -> String {
    let filled = ((pct / 5.0) as usize).min(20);
    format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled))
}

/// Render the full console report.
pub fn render(report: &QualityReport, config: &ReportConfig) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    let _ = writeln!(out, "{}\n   DATA QUALITY REPORT\n{}", rule, rule);
    let _ = writeln!(out, "   File: {}", report.dataset.filename);
    let _ = writeln!(out, "   Generated: {}", report.generated_at);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "✓ Loaded '{}' successfully\n  Shape: {} rows × {} columns",
        report.dataset.filename,
        format_thousands(report.dataset.rows),
        report.dataset.columns
    );

    render_missing(&mut out, report, config);
    render_outliers(&mut out, report);
    render_duplicates(&mut out, report);
    render_types(&mut out, report);
    render_categorical(&mut out, report, config);
    render_score(&mut out, report);

    out
}

fn render_missing(out: &mut String, report: &QualityReport, config: &ReportConfig) {
    let missing = &report.missing;
    banner(out, "MISSING VALUES ANALYSIS");

    let _ = writeln!(
        out,
        "\n📊 Overall: {} missing values ({:.2}% of all data)",
        format_thousands(missing.total_missing_cells),
        missing.overall_missing_pct
    );
    let _ = writeln!(
        out,
        "   Columns with missing data: {} of {}",
        missing.columns_with_missing, report.dataset.columns
    );

    if !missing.high_missing_columns.is_empty() {
        let _ = writeln!(
            out,
            "\n⚠️  High-risk columns (>{}% missing):",
            config.high_missing_threshold
        );
        for detail in missing
            .details
            .iter()
            .filter(|d| missing.high_missing_columns.contains(&d.column))
        {
            let _ = writeln!(out, "   - {}: {:.1}% missing", detail.column, detail.missing_pct);
        }
    }

    if missing.columns_with_missing > 0 {
        let _ = writeln!(out, "\n📋 Missing Values by Column:\n{}", "-".repeat(50));
        for detail in missing.columns_with_missing_iter() {
            let _ = writeln!(
                out,
                "   {:<25} {} {:>6.1}%",
                truncate_chars(&detail.column, 25),
                missing_bar(detail.missing_pct),
                detail.missing_pct
            );
        }
    } else {
        let _ = writeln!(out, "\n✅ No missing values found!");
    }
}

fn render_outliers(out: &mut String, report: &QualityReport) {
    let outliers = &report.outliers;
    banner(out, "OUTLIER ANALYSIS");

    if outliers.numeric_columns == 0 {
        let _ = writeln!(out, "\n⚠️  No numeric columns found for outlier analysis.");
        return;
    }

    let _ = writeln!(
        out,
        "\n📊 Analyzing {} numeric columns...\n{}",
        outliers.numeric_columns,
        "-".repeat(RULE_WIDTH)
    );
    for detail in &outliers.details {
        let status = if detail.outlier_pct > 5.0 || detail.has_impossible_values() {
            "⚠️ "
        } else {
            "  "
        };
        let _ = writeln!(
            out,
            "{}{:<30} | Outliers: {:>6} ({:>5.1}%) | Range: [{:.2}, {:.2}]",
            status,
            truncate_chars(&detail.column, 30),
            detail.outlier_count,
            detail.outlier_pct,
            detail.min,
            detail.max
        );
        for warning in &detail.impossible_values {
            let _ = writeln!(out, "      🚨 {}", warning);
        }
    }

    let _ = writeln!(
        out,
        "\n📈 Summary: {} total outliers across {} columns",
        format_thousands(outliers.total_outliers),
        outliers.columns_with_outliers
    );
}

fn render_duplicates(out: &mut String, report: &QualityReport) {
    let dups = &report.duplicates;
    banner(out, "DUPLICATE ANALYSIS");

    let _ = writeln!(
        out,
        "\n📊 Exact Duplicate Rows: {} ({:.2}%)",
        format_thousands(dups.exact_duplicates),
        dups.exact_duplicate_pct
    );
    if dups.exact_duplicates > 0 {
        let _ = writeln!(out, "   ⚠️  These rows will bias your model if not removed!");
    } else {
        let _ = writeln!(out, "   ✅ No exact duplicate rows found");
    }

    if !dups.key_column_duplicates.is_empty() {
        let _ = writeln!(out, "\n📋 Potential Key Column Duplicates:");
        for key in &dups.key_column_duplicates {
            let _ = writeln!(
                out,
                "   - {}: {} duplicates",
                key.column,
                format_thousands(key.duplicates)
            );
        }
    }
}

fn render_types(out: &mut String, report: &QualityReport) {
    let types = &report.data_types;
    banner(out, "DATA TYPE ANALYSIS");

    let _ = writeln!(out, "\n📊 Data Type Distribution:");
    for count in &types.dtype_counts {
        let _ = writeln!(out, "   {}: {} columns", count.dtype, count.columns);
    }

    if !types.warnings.is_empty() {
        let _ = writeln!(out, "\n⚠️  Potential Type Issues:");
        for warning in &types.warnings {
            let _ = writeln!(out, "   - {}", warning);
        }
    }
}

fn render_categorical(out: &mut String, report: &QualityReport, config: &ReportConfig) {
    let categorical = &report.categorical;
    banner(out, "CATEGORICAL VALUES ANALYSIS");

    if categorical.details.is_empty() {
        let _ = writeln!(out, "\n⚠️  No categorical columns found.");
        return;
    }

    let limit = config.console_categorical_limit;
    let _ = writeln!(
        out,
        "\n📊 Analyzing {} categorical columns...\n{}",
        categorical.columns,
        "-".repeat(RULE_WIDTH)
    );
    for column in &categorical.details {
        let _ = writeln!(
            out,
            "\n   {} ({} unique values):",
            column.column, column.unique_count
        );
        for vc in column.value_counts.iter().take(limit) {
            let _ = writeln!(out, "      - {}: {}", vc.value, format_thousands(vc.count));
        }
        if column.unique_count > limit {
            let _ = writeln!(
                out,
                "      ... and {} more values",
                column.unique_count - limit
            );
        }
    }

    let _ = writeln!(
        out,
        "\n📈 Summary: {} categorical columns analyzed",
        categorical.columns
    );
}

fn render_score(out: &mut String, report: &QualityReport) {
    let score = &report.quality_score;
    banner(out, "DATA QUALITY SCORE");

    let _ = writeln!(out, "\n   {} / 100 - {}", score.score, score.tier.message());
    let _ = writeln!(out, "\n💡 Suggested Actions:");
    for (i, rec) in report.recommendations.iter().enumerate() {
        match &rec.title {
            Some(title) => {
                let _ = writeln!(out, "   {}. {}: {}", i + 1, title, rec.detail);
            }
            None => {
                let _ = writeln!(out, "   {}. ✅ {}", i + 1, rec.detail);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_bar() {
        assert_eq!(missing_bar(0.0).chars().filter(|c| *c == '█').count(), 0);
        assert_eq!(missing_bar(52.0).chars().filter(|c| *c == '█').count(), 10);
        assert_eq!(missing_bar(100.0).chars().count(), 20);
    }
}
