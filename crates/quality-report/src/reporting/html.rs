//! Standalone HTML report with embedded styles and charts.
//!
//! The document is a pure function of the [`QualityReport`], the rendered
//! chart SVGs and the display limits. Every string taken from the dataset
//! (file name, column names, cell values, warnings) is escaped.

use crate::config::ReportConfig;
use crate::types::{CategoricalColumn, MissingStatus, QualityReport};
use crate::utils::{format_float_thousands, format_thousands, percentage};

/// Chart documents inlined into the report.
#[derive(Debug, Clone, Default)]
pub struct ReportCharts {
    /// Missing-value heatmap and bar chart.
    pub missing: String,
    /// Boxplots; `None` when there are no numeric columns.
    pub outliers: Option<String>,
}

/// Maximum number of rows in the missing-values table.
const MISSING_TABLE_ROWS: usize = 20;

/// Render report as standalone HTML
pub fn render(report: &QualityReport, charts: &ReportCharts, config: &ReportConfig) -> String {
    let mut html = String::new();

    html.push_str(&render_head(report));
    html.push_str("<body>\n<div class=\"container\">\n");

    html.push_str(&render_header(report));
    html.push_str(&render_executive_summary(report));
    html.push_str(&render_missing_section(report, charts));
    html.push_str(&render_outlier_section(report, charts));
    html.push_str(&render_duplicate_section(report, config));
    html.push_str(&render_categorical_section(report, config));
    html.push_str(&render_recommendations(report));
    html.push_str(&render_footer(report));

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_head(report: &QualityReport) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Data Quality Report - {}</title>
    <style>
{CSS}
    </style>
</head>
"#,
        html_escape(&report.dataset.filename)
    )
}

fn render_header(report: &QualityReport) -> String {
    format!(
        r#"<div class="header">
    <h1>📊 Data Quality Report</h1>
    <div class="meta">
        <strong>Dataset:</strong> {} |
        <strong>Rows:</strong> {} |
        <strong>Columns:</strong> {} |
        <strong>Generated:</strong> {}
    </div>
</div>
"#,
        html_escape(&report.dataset.filename),
        format_thousands(report.dataset.rows),
        report.dataset.columns,
        html_escape(&report.generated_at)
    )
}

fn stat_box(number: &str, label: &str) -> String {
    format!(
        r#"        <div class="stat-box">
            <div class="number">{}</div>
            <div class="label">{}</div>
        </div>
"#,
        number, label
    )
}

fn render_executive_summary(report: &QualityReport) -> String {
    let mut html = String::from(
        "<div class=\"card\">\n    <h2>📋 Executive Summary</h2>\n    <div class=\"stats-grid\">\n",
    );
    html.push_str(&stat_box(&format_thousands(report.dataset.rows), "Total Rows"));
    html.push_str(&stat_box(&report.dataset.columns.to_string(), "Total Columns"));
    html.push_str(&stat_box(
        &format!("{:.1}%", report.missing.overall_missing_pct),
        "Missing Data",
    ));
    html.push_str(&stat_box(
        &format_thousands(report.duplicates.exact_duplicates),
        "Duplicate Rows",
    ));
    html.push_str("    </div>\n</div>\n");
    html
}

fn status_badge(status: MissingStatus) -> String {
    let class = match status {
        MissingStatus::Critical => "badge-danger",
        MissingStatus::Warning | MissingStatus::Minor => "badge-warning",
        MissingStatus::Ok => "badge-success",
    };
    format!(r#"<span class="badge {}">{}</span>"#, class, status.label())
}

fn render_missing_section(report: &QualityReport, charts: &ReportCharts) -> String {
    let missing = &report.missing;
    let mut html = String::from(
        "<div class=\"card\">\n    <h2>🔍 Missing Values Analysis</h2>\n    <div class=\"stats-grid\">\n",
    );
    html.push_str(&stat_box(
        &format_thousands(missing.total_missing_cells),
        "Missing Cells",
    ));
    html.push_str(&stat_box(
        &missing.columns_with_missing.to_string(),
        "Affected Columns",
    ));
    html.push_str(&stat_box(
        &missing.high_missing_columns.len().to_string(),
        "High-Risk Columns (&gt;50%)",
    ));
    html.push_str("    </div>\n");

    html.push_str(&format!(
        "    <div class=\"visualization\">\n{}\n    </div>\n",
        charts.missing
    ));

    html.push_str(
        r#"    <h3>Missing Values by Column</h3>
    <table>
        <thead>
            <tr><th>Column</th><th>Missing Count</th><th>Missing %</th><th>Status</th></tr>
        </thead>
        <tbody>
"#,
    );
    for row in missing.details.iter().take(MISSING_TABLE_ROWS) {
        html.push_str(&format!(
            r#"            <tr>
                <td>{}</td>
                <td>{}</td>
                <td>
                    <div class="progress-bar"><div class="progress-fill" style="width: {:.1}%"></div></div>
                    {:.1}%
                </td>
                <td>{}</td>
            </tr>
"#,
            html_escape(&row.column),
            format_thousands(row.missing_count),
            row.missing_pct.min(100.0),
            row.missing_pct,
            status_badge(row.status)
        ));
    }
    html.push_str("        </tbody>\n    </table>\n</div>\n");
    html
}

fn render_outlier_section(report: &QualityReport, charts: &ReportCharts) -> String {
    let outliers = &report.outliers;
    let mut html = String::from(
        r#"<div class="card">
    <h2>📈 Outlier Analysis</h2>
    <p>Using the IQR (Interquartile Range) method to detect statistical outliers in numeric columns.</p>
    <div class="stats-grid">
"#,
    );
    html.push_str(&stat_box(
        &outliers.numeric_columns.to_string(),
        "Numeric Columns",
    ));
    html.push_str(&stat_box(
        &outliers.columns_with_outliers.to_string(),
        "Columns with Outliers",
    ));
    html.push_str(&stat_box(
        &format_thousands(outliers.total_outliers),
        "Total Outliers",
    ));
    html.push_str("    </div>\n");

    match &charts.outliers {
        Some(svg) => html.push_str(&format!(
            "    <div class=\"visualization\">\n{}\n    </div>\n",
            svg
        )),
        None => html.push_str("    <p>No numeric columns to analyze.</p>\n"),
    }

    html.push_str(
        r#"    <h3>Outlier Details by Column</h3>
    <table>
        <thead>
            <tr><th>Column</th><th>Min</th><th>Max</th><th>Mean</th><th>Outliers</th><th>Outlier %</th><th>Warnings</th></tr>
        </thead>
        <tbody>
"#,
    );
    for row in &outliers.details {
        let warnings = if row.impossible_values.is_empty() {
            "✓".to_string()
        } else {
            row.impossible_values
                .iter()
                .map(|w| format!("🚨 {}", html_escape(w)))
                .collect::<Vec<_>>()
                .join("<br>")
        };
        html.push_str(&format!(
            r#"            <tr>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{:.1}%</td>
                <td>{}</td>
            </tr>
"#,
            html_escape(&row.column),
            format_float_thousands(row.min),
            format_float_thousands(row.max),
            format_float_thousands(row.mean),
            format_thousands(row.outlier_count),
            row.outlier_pct,
            warnings
        ));
    }
    html.push_str("        </tbody>\n    </table>\n</div>\n");
    html
}

fn render_duplicate_section(report: &QualityReport, config: &ReportConfig) -> String {
    let dups = &report.duplicates;
    let count_class = if dups.exact_duplicates > 0 {
        "warning"
    } else {
        "success"
    };

    let mut html = format!(
        r#"<div class="card">
    <h2>🔄 Duplicate Analysis</h2>
    <div class="stats-grid">
        <div class="stat-box">
            <div class="number {}">{}</div>
            <div class="label">Exact Duplicate Rows</div>
        </div>
        <div class="stat-box">
            <div class="number">{:.2}%</div>
            <div class="label">Percentage of Data</div>
        </div>
    </div>
"#,
        count_class,
        format_thousands(dups.exact_duplicates),
        dups.exact_duplicate_pct
    );

    if !dups.key_column_duplicates.is_empty() {
        html.push_str(
            r#"    <div class="summary-section">
        <h4>⚠️ Key Column Duplicates Detected</h4>
        <p>These columns appear to be identifiers but contain duplicate values:</p>
        <ul>
"#,
        );
        for key in &dups.key_column_duplicates {
            html.push_str(&format!(
                "            <li><strong>{}</strong>: {} duplicates</li>\n",
                html_escape(&key.column),
                format_thousands(key.duplicates)
            ));
        }
        html.push_str("        </ul>\n    </div>\n");
    }

    if dups.exact_duplicates > 0 {
        html.push_str(&format!(
            r#"    <div class="summary-section" style="background: #ffebee;">
        <h4>🚨 Action Required</h4>
        <p>Found <strong>{}</strong> duplicate rows.
        These should be investigated and likely removed before model training to prevent bias.</p>
    </div>
"#,
            format_thousands(dups.exact_duplicates)
        ));
        html.push_str(&render_duplicate_examples(report, config));
    } else {
        html.push_str(
            r#"    <div class="summary-section" style="background: #e8f5e9;">
        <h4>✅ No Exact Duplicates</h4>
        <p>Great! No exact duplicate rows were found in the dataset.</p>
    </div>
"#,
        );
    }

    html.push_str("</div>\n");
    html
}

fn render_duplicate_examples(report: &QualityReport, config: &ReportConfig) -> String {
    let examples = &report.duplicates.examples;
    if examples.is_empty() {
        return String::new();
    }

    let mut html = String::from("    <h3>Duplicate Examples</h3>\n    <table>\n        <thead>\n            <tr><th>Row</th>");
    for name in &report.dataset.column_names {
        html.push_str(&format!("<th>{}</th>", html_escape(name)));
    }
    html.push_str("</tr>\n        </thead>\n        <tbody>\n");

    for example in examples.iter().take(config.html_duplicate_examples) {
        html.push_str(&format!("            <tr><td>{}</td>", example.row_index));
        for value in &example.values {
            match value {
                Some(v) => html.push_str(&format!("<td>{}</td>", html_escape(v))),
                None => html.push_str("<td><em>(null)</em></td>"),
            }
        }
        html.push_str("</tr>\n");
    }

    html.push_str("        </tbody>\n    </table>\n");
    html
}

fn render_categorical_section(report: &QualityReport, config: &ReportConfig) -> String {
    let categorical = &report.categorical;
    let mut html = String::from(
        "<div class=\"card\">\n    <h2>📝 Categorical Values Analysis</h2>\n    <div class=\"stats-grid\">\n",
    );
    html.push_str(&stat_box(
        &categorical.columns.to_string(),
        "Categorical Columns",
    ));
    html.push_str("    </div>\n");

    if categorical.details.is_empty() {
        html.push_str("    <p>No categorical columns found in the dataset.</p>\n");
    } else {
        for column in &categorical.details {
            html.push_str(&render_categorical_column(
                column,
                report.dataset.rows,
                config.categorical_display_limit,
            ));
        }
    }

    html.push_str("</div>\n");
    html
}

fn render_categorical_column(column: &CategoricalColumn, rows: usize, limit: usize) -> String {
    let mut values_html = String::new();

    for vc in column.value_counts.iter().take(limit) {
        values_html.push_str(&format!(
            "                <tr><td>{}</td><td>{}</td><td>{:.1}%</td></tr>\n",
            html_escape(&vc.value),
            format_thousands(vc.count),
            percentage(vc.count, rows)
        ));
    }

    if column.unique_count > limit {
        values_html.push_str(&format!(
            "                <tr style=\"background: #f0f0f0; font-style: italic;\"><td colspan=\"3\">... and {} more values</td></tr>\n",
            format_thousands(column.unique_count - limit)
        ));
    }

    if column.has_nulls() {
        values_html.push_str(&format!(
            "                <tr style=\"background: #fff3e0;\"><td><em>(missing/null)</em></td><td>{}</td><td>{:.1}%</td></tr>\n",
            format_thousands(column.missing_count),
            percentage(column.missing_count, rows)
        ));
    }

    format!(
        r#"    <div class="summary-section" style="margin-bottom: 15px;">
        <h4>{} <span class="badge badge-success">{} unique values</span></h4>
        <table>
            <thead>
                <tr><th>Value</th><th>Count</th><th>Percentage</th></tr>
            </thead>
            <tbody>
{}            </tbody>
        </table>
    </div>
"#,
        html_escape(&column.column),
        column.unique_count,
        values_html
    )
}

fn render_recommendations(report: &QualityReport) -> String {
    let score = &report.quality_score;
    let color = score.tier.color();

    let items: String = report
        .recommendations
        .iter()
        .map(|rec| match &rec.title {
            Some(title) => format!(
                "        <li><strong>{}:</strong> {}</li>\n",
                html_escape(title),
                html_escape(&rec.detail)
            ),
            None => format!("        <li>✅ {}</li>\n", html_escape(&rec.detail)),
        })
        .collect();

    format!(
        r#"<div class="card">
    <h2>💡 Recommendations</h2>
    <div class="summary-section">
        <h4>Data Quality Score</h4>
        <div style="text-align: center; padding: 20px;">
            <div style="font-size: 4em; font-weight: bold; color: {color};">{score}</div>
            <div style="font-size: 1.2em; color: #666;">out of 100</div>
            <div class="progress-bar" style="height: 30px; margin-top: 15px;">
                <div class="progress-fill" style="width: {score}%; background: {color};"></div>
            </div>
            <div style="margin-top: 10px; color: #666;">{message}</div>
        </div>
    </div>
    <h3>Suggested Actions:</h3>
    <ol style="padding-left: 20px; margin-top: 15px;">
{items}    </ol>
</div>
"#,
        color = color,
        score = score.score,
        message = score.tier.message(),
        items = items
    )
}

fn render_footer(report: &QualityReport) -> String {
    format!(
        "<div class=\"footer\">\n    <p>Generated by Data Quality Report Tool | {}</p>\n</div>\n",
        html_escape(&report.generated_at)
    )
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// Embedded CSS
const CSS: &str = r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    line-height: 1.6;
    color: #333;
    background: #f5f7fa;
    padding: 20px;
}
.container { max-width: 1200px; margin: 0 auto; }
.header {
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    color: white;
    padding: 30px;
    border-radius: 10px;
    margin-bottom: 20px;
    box-shadow: 0 4px 6px rgba(0,0,0,0.1);
}
.header h1 { font-size: 2em; margin-bottom: 10px; }
.header .meta { opacity: 0.9; font-size: 0.95em; }
.card {
    background: white;
    border-radius: 10px;
    padding: 25px;
    margin-bottom: 20px;
    box-shadow: 0 2px 4px rgba(0,0,0,0.08);
}
.card h2 {
    color: #667eea;
    border-bottom: 2px solid #667eea;
    padding-bottom: 10px;
    margin-bottom: 20px;
}
.stats-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
    gap: 15px;
    margin-bottom: 20px;
}
.stat-box {
    background: #f8f9fa;
    padding: 20px;
    border-radius: 8px;
    text-align: center;
    border-left: 4px solid #667eea;
}
.stat-box .number { font-size: 2em; font-weight: bold; color: #667eea; }
.stat-box .label { color: #666; font-size: 0.9em; }
.warning { color: #e74c3c; }
.success { color: #27ae60; }
table { width: 100%; border-collapse: collapse; margin: 15px 0; font-size: 0.9em; }
th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }
th { background: #f8f9fa; font-weight: 600; }
tr:hover { background: #f8f9fa; }
.visualization { text-align: center; margin: 20px 0; overflow-x: auto; }
.visualization svg { max-width: 100%; height: auto; border-radius: 8px; }
.progress-bar { background: #e9ecef; border-radius: 10px; height: 20px; overflow: hidden; }
.progress-fill { height: 100%; background: linear-gradient(90deg, #667eea, #764ba2); }
.badge { display: inline-block; padding: 4px 8px; border-radius: 4px; font-size: 0.8em; font-weight: 600; }
.badge-danger { background: #ffebee; color: #c62828; }
.badge-warning { background: #fff3e0; color: #ef6c00; }
.badge-success { background: #e8f5e9; color: #2e7d32; }
.summary-section {
    background: linear-gradient(135deg, #f5f7fa 0%, #e4e8ec 100%);
    padding: 20px;
    border-radius: 8px;
    margin-top: 20px;
}
.footer { text-align: center; padding: 20px; color: #666; font-size: 0.9em; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::DatasetInfo;
    use crate::types::*;

    fn report() -> QualityReport {
        QualityReport {
            dataset: DatasetInfo {
                path: "data/<weird>.csv".to_string(),
                filename: "<weird>.csv".to_string(),
                rows: 4,
                columns: 2,
                column_names: vec!["name".to_string(), "age".to_string()],
            },
            generated_at: "2026-01-01 12:00:00".to_string(),
            missing: MissingSummary {
                total_missing_cells: 1,
                total_cells: 8,
                overall_missing_pct: 12.5,
                columns_with_missing: 1,
                high_missing_columns: Vec::new(),
                details: vec![ColumnMissingSummary {
                    column: "name".to_string(),
                    missing_count: 1,
                    missing_pct: 25.0,
                    dtype: "object".to_string(),
                    status: MissingStatus::Warning,
                }],
            },
            outliers: OutlierReport::default(),
            duplicates: DuplicateSummary {
                exact_duplicates: 1,
                exact_duplicate_pct: 25.0,
                potential_key_columns: Vec::new(),
                key_column_duplicates: Vec::new(),
                examples: vec![DuplicateExample {
                    row_index: 0,
                    values: vec![Some("<b>bob</b>".to_string()), None],
                }],
            },
            data_types: TypeSummary {
                dtype_counts: Vec::new(),
                details: Vec::new(),
                warnings: Vec::new(),
            },
            categorical: CategoricalSummary {
                columns: 1,
                details: vec![CategoricalColumn {
                    column: "name".to_string(),
                    dtype: "object".to_string(),
                    unique_count: 3,
                    unique_values: vec!["a".into(), "b".into(), "c".into()],
                    value_counts: vec![
                        ValueCount { value: "a".into(), count: 1 },
                        ValueCount { value: "b".into(), count: 1 },
                        ValueCount { value: "c".into(), count: 1 },
                    ],
                    missing_count: 1,
                }],
            },
            quality_score: QualityScore {
                score: 71,
                tier: QualityTier::GoodWithIssues,
            },
            recommendations: vec![Recommendation {
                title: Some("Remove Duplicates".to_string()),
                detail: "Found 1 exact duplicates.".to_string(),
            }],
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<a & 'b'>"), "&lt;a &amp; &#39;b&#39;&gt;");
    }

    #[test]
    fn test_dataset_text_is_escaped() {
        let html = render(&report(), &ReportCharts::default(), &ReportConfig::default());
        assert!(html.contains("&lt;weird&gt;.csv"));
        assert!(html.contains("&lt;b&gt;bob&lt;/b&gt;"));
        assert!(!html.contains("<b>bob</b>"));
    }

    #[test]
    fn test_sections_present() {
        let html = render(&report(), &ReportCharts::default(), &ReportConfig::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Executive Summary"));
        assert!(html.contains("No numeric columns to analyze."));
        assert!(html.contains("🚨 Action Required"));
        assert!(html.contains("Good quality with some issues to address"));
        assert!(html.contains("(missing/null)"));
        assert!(html.contains("Generated by Data Quality Report Tool | 2026-01-01 12:00:00"));
    }

    #[test]
    fn test_categorical_overflow_row() {
        let config = ReportConfig::builder()
            .categorical_display_limit(2)
            .build()
            .unwrap();
        let html = render(&report(), &ReportCharts::default(), &config);
        assert!(html.contains("... and 1 more values"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = ReportConfig::default();
        let charts = ReportCharts {
            missing: "<svg></svg>".to_string(),
            outliers: None,
        };
        assert_eq!(
            render(&report(), &charts, &config),
            render(&report(), &charts, &config)
        );
    }
}
