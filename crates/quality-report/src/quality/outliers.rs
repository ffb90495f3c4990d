//! IQR-based outlier analysis for numeric columns.

use tracing::debug;

use super::statistics::{IqrFences, mean, sample_std, sorted};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::loader::Dataset;
use crate::types::{OutlierReport, OutlierSummary};
use crate::utils::{is_numeric_dtype, numeric_values, percentage, round2};

/// Column names for which negative values are implausible.
const NON_NEGATIVE_NAMES: [&str; 5] = ["age", "price", "quantity", "count", "amount"];

const MAX_PLAUSIBLE_AGE: f64 = 120.0;

/// Geometry for one boxplot panel.
#[derive(Debug, Clone)]
pub struct BoxPlotData {
    pub column: String,
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Most extreme values still inside the fences.
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

pub struct OutlierAnalyzer;

impl OutlierAnalyzer {
    pub fn analyze(dataset: &Dataset, config: &ReportConfig) -> Result<OutlierReport> {
        let mut numeric_columns = 0;
        let mut details = Vec::new();

        for (name, series) in dataset.iter_series() {
            if !is_numeric_dtype(series.dtype()) {
                continue;
            }
            numeric_columns += 1;

            let values = numeric_values(series)?;
            if values.is_empty() {
                debug!("Skipping '{}': no non-missing values", name);
                continue;
            }

            details.push(Self::summarize(name, &values, config.iqr_multiplier));
        }

        let total_outliers = details.iter().map(|d| d.outlier_count).sum();
        let columns_with_outliers = details.iter().filter(|d| d.outlier_count > 0).count();

        Ok(OutlierReport {
            numeric_columns,
            columns_with_outliers,
            total_outliers,
            details,
        })
    }

    /// Boxplot geometry for every numeric column with at least one value.
    pub fn box_plots(dataset: &Dataset, config: &ReportConfig) -> Result<Vec<BoxPlotData>> {
        let mut plots = Vec::new();

        for (name, series) in dataset.iter_series() {
            if !is_numeric_dtype(series.dtype()) {
                continue;
            }
            let values = numeric_values(series)?;
            if values.is_empty() {
                continue;
            }

            let sorted = sorted(&values);
            let fences = IqrFences::from_sorted(&sorted, config.iqr_multiplier);
            let (outliers, inside): (Vec<f64>, Vec<f64>) =
                sorted.iter().partition(|v| fences.is_outlier(**v));

            plots.push(BoxPlotData {
                column: name.to_string(),
                count: sorted.len(),
                q1: fences.q1,
                median: fences.median,
                q3: fences.q3,
                whisker_low: inside.first().copied().unwrap_or(fences.q1),
                whisker_high: inside.last().copied().unwrap_or(fences.q3),
                outliers,
            });
        }

        Ok(plots)
    }

    fn summarize(column: &str, values: &[f64], multiplier: f64) -> OutlierSummary {
        let sorted = sorted(values);
        let fences = IqrFences::from_sorted(&sorted, multiplier);
        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        let outlier_count = sorted.iter().filter(|v| fences.is_outlier(**v)).count();

        OutlierSummary {
            column: column.to_string(),
            count: sorted.len(),
            mean: round2(mean(&sorted)),
            std: round2(sample_std(&sorted)),
            min: round2(min),
            max: round2(max),
            q1: round2(fences.q1),
            q3: round2(fences.q3),
            iqr: round2(fences.iqr),
            lower_bound: round2(fences.lower),
            upper_bound: round2(fences.upper),
            outlier_count,
            outlier_pct: round2(percentage(outlier_count, sorted.len())),
            impossible_values: Self::impossible_values(column, min, max),
        }
    }

    fn impossible_values(column: &str, min: f64, max: f64) -> Vec<String> {
        let lower = column.to_lowercase();
        let mut flags = Vec::new();

        if min < 0.0 && NON_NEGATIVE_NAMES.contains(&lower.as_str()) {
            flags.push(format!("Negative values found (min: {:.2})", min));
        }
        if lower == "age" && max > MAX_PLAUSIBLE_AGE {
            flags.push(format!("Age > 120 found (max: {:.0})", max));
        }

        flags
    }
}
