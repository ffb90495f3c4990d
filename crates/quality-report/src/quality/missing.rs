//! Missing value analysis.

use polars::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::loader::Dataset;
use crate::types::{ColumnMissingSummary, MissingStatus, MissingSummary};
use crate::utils::{dtype_label, percentage, round2};

/// Null/non-null grid over a row sample, used for the heatmap.
#[derive(Debug, Clone)]
pub struct MissingMatrix {
    pub columns: Vec<String>,
    /// Sampled row positions in table order.
    pub rows: Vec<usize>,
    /// `cells[r][c]` is true when sampled row `r` is missing column `c`.
    pub cells: Vec<Vec<bool>>,
    /// Missing percentage per column over the whole table, in column order.
    pub column_pct: Vec<f64>,
}

pub struct MissingValueAnalyzer;

impl MissingValueAnalyzer {
    pub fn analyze(dataset: &Dataset, config: &ReportConfig) -> Result<MissingSummary> {
        let rows = dataset.rows();
        let mut details = Vec::with_capacity(dataset.columns());
        let mut total_missing = 0usize;

        for (name, series) in dataset.iter_series() {
            let missing_count = series.null_count();
            let missing_pct = percentage(missing_count, rows);
            total_missing += missing_count;

            details.push(ColumnMissingSummary {
                column: name.to_string(),
                missing_count,
                missing_pct,
                dtype: dtype_label(series.dtype()),
                status: MissingStatus::from_pct(missing_pct),
            });
        }

        // Stable sort keeps column order for ties
        details.sort_by(|a, b| b.missing_pct.total_cmp(&a.missing_pct));

        let total_cells = rows * dataset.columns();
        let high_missing_columns = details
            .iter()
            .filter(|d| d.missing_pct > config.high_missing_threshold)
            .map(|d| d.column.clone())
            .collect();
        let columns_with_missing = details.iter().filter(|d| d.missing_pct > 0.0).count();

        debug!(
            "Missing analysis: {} of {} cells missing across {} columns",
            total_missing, total_cells, columns_with_missing
        );

        Ok(MissingSummary {
            total_missing_cells: total_missing,
            total_cells,
            overall_missing_pct: round2(percentage(total_missing, total_cells)),
            columns_with_missing,
            high_missing_columns,
            details,
        })
    }

    /// Sample up to `heatmap_sample_rows` rows with a fixed seed; the whole
    /// table is used when it is small enough.
    pub fn missing_matrix(dataset: &Dataset, config: &ReportConfig) -> Result<MissingMatrix> {
        let height = dataset.rows();
        let rows: Vec<usize> = if height > config.heatmap_sample_rows {
            let mut rng = StdRng::seed_from_u64(config.sample_seed);
            let all: Vec<usize> = (0..height).collect();
            let mut sample: Vec<usize> = all
                .choose_multiple(&mut rng, config.heatmap_sample_rows)
                .copied()
                .collect();
            sample.sort_unstable();
            sample
        } else {
            (0..height).collect()
        };

        let mut columns = Vec::with_capacity(dataset.columns());
        let mut column_masks = Vec::with_capacity(dataset.columns());
        let mut column_pct = Vec::with_capacity(dataset.columns());

        for (name, series) in dataset.iter_series() {
            columns.push(name.to_string());
            column_pct.push(percentage(series.null_count(), height));
            let mask: Vec<bool> = series
                .is_null()
                .into_iter()
                .map(|v| v.unwrap_or(false))
                .collect();
            column_masks.push(mask);
        }

        let cells = rows
            .iter()
            .map(|&r| column_masks.iter().map(|mask| mask[r]).collect())
            .collect();

        Ok(MissingMatrix {
            columns,
            rows,
            cells,
            column_pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        let df = df![
            "full" => [Some(1), Some(2), Some(3), Some(4)],
            "half" => [Some("a"), None, Some("c"), None],
            "mostly" => [None, None, None, Some(1.0)],
        ]
        .unwrap();
        Dataset::from_dataframe(df, "test.csv")
    }

    #[test]
    fn test_counts_and_ordering() {
        let summary = MissingValueAnalyzer::analyze(&dataset(), &ReportConfig::default()).unwrap();

        assert_eq!(summary.total_missing_cells, 5);
        assert_eq!(summary.total_cells, 12);
        assert_eq!(summary.overall_missing_pct, 41.67);
        assert_eq!(summary.columns_with_missing, 2);

        let order: Vec<&str> = summary.details.iter().map(|d| d.column.as_str()).collect();
        assert_eq!(order, vec!["mostly", "half", "full"]);
        assert_eq!(summary.details[0].status, MissingStatus::Critical);
        assert_eq!(summary.details[1].status, MissingStatus::Warning);
        assert_eq!(summary.details[2].status, MissingStatus::Ok);
        assert_eq!(summary.high_missing_columns, vec!["mostly"]);
    }

    #[test]
    fn test_per_column_counts_sum_to_total() {
        let summary = MissingValueAnalyzer::analyze(&dataset(), &ReportConfig::default()).unwrap();
        let sum: usize = summary.details.iter().map(|d| d.missing_count).sum();
        assert_eq!(sum, summary.total_missing_cells);
        assert!(
            summary
                .details
                .iter()
                .all(|d| (0.0..=100.0).contains(&d.missing_pct))
        );
    }

    #[test]
    fn test_ties_keep_column_order() {
        let df = df![
            "b" => [Some(1), None],
            "a" => [None, Some(2)],
        ]
        .unwrap();
        let summary = MissingValueAnalyzer::analyze(
            &Dataset::from_dataframe(df, "t.csv"),
            &ReportConfig::default(),
        )
        .unwrap();
        assert_eq!(summary.details[0].column, "b");
        assert_eq!(summary.details[1].column, "a");
    }

    #[test]
    fn test_empty_table_has_zero_percentages() {
        let df = df!["a" => Vec::<i64>::new()].unwrap();
        let summary = MissingValueAnalyzer::analyze(
            &Dataset::from_dataframe(df, "empty.csv"),
            &ReportConfig::default(),
        )
        .unwrap();
        assert_eq!(summary.overall_missing_pct, 0.0);
        assert_eq!(summary.details[0].missing_pct, 0.0);
    }

    #[test]
    fn test_columns_with_missing_iter() {
        let summary = MissingValueAnalyzer::analyze(&dataset(), &ReportConfig::default()).unwrap();
        let names: Vec<&str> = summary
            .columns_with_missing_iter()
            .map(|d| d.column.as_str())
            .collect();
        assert_eq!(names, vec!["mostly", "half"]);
    }

    #[test]
    fn test_matrix_uses_whole_small_table() {
        let matrix = MissingValueAnalyzer::missing_matrix(&dataset(), &ReportConfig::default())
            .unwrap();
        assert_eq!(matrix.rows, vec![0, 1, 2, 3]);
        assert_eq!(matrix.cells[1], vec![false, true, true]);
        assert_eq!(matrix.column_pct, vec![0.0, 50.0, 75.0]);
    }

    #[test]
    fn test_matrix_sample_is_capped_and_deterministic() {
        let values: Vec<Option<i64>> = (0..250)
            .map(|i| if i % 7 == 0 { None } else { Some(i) })
            .collect();
        let df = df!["v" => values].unwrap();
        let dataset = Dataset::from_dataframe(df, "big.csv");
        let config = ReportConfig::default();

        let first = MissingValueAnalyzer::missing_matrix(&dataset, &config).unwrap();
        let second = MissingValueAnalyzer::missing_matrix(&dataset, &config).unwrap();

        assert_eq!(first.rows.len(), 100);
        assert_eq!(first.rows, second.rows);
        assert!(first.rows.windows(2).all(|w| w[0] < w[1]));
    }
}
