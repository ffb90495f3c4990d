//! Exact-row and candidate-key duplicate detection.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::loader::Dataset;
use crate::types::{DuplicateExample, DuplicateSummary, KeyColumnDuplicate};
use crate::utils::{percentage, round2, series_to_text};

/// Name fragments that suggest a column is an identifier.
const KEY_NAME_HINTS: [&str; 5] = ["id", "key", "code", "number", "email"];

pub struct DuplicateAnalyzer;

impl DuplicateAnalyzer {
    pub fn analyze(dataset: &Dataset, config: &ReportConfig) -> Result<DuplicateSummary> {
        let rows = dataset.rows();

        let columns: Vec<Vec<Option<String>>> = dataset
            .iter_series()
            .map(|(_, series)| series_to_text(series))
            .collect::<std::result::Result<_, _>>()?;

        // Group rows by their full cell content; missing equals missing
        let mut groups: HashMap<Vec<Option<&str>>, usize> = HashMap::new();
        let mut row_keys = Vec::with_capacity(rows);
        for row in 0..rows {
            let key: Vec<Option<&str>> = columns.iter().map(|col| col[row].as_deref()).collect();
            *groups.entry(key.clone()).or_insert(0) += 1;
            row_keys.push(key);
        }

        let exact_duplicates: usize = groups.values().map(|n| n - 1).sum();

        let examples = if exact_duplicates > 0 {
            row_keys
                .iter()
                .enumerate()
                .filter(|(_, key)| groups.get(*key).copied().unwrap_or(0) > 1)
                .take(config.duplicate_examples)
                .map(|(row_index, key)| DuplicateExample {
                    row_index,
                    values: key.iter().map(|v| v.map(str::to_string)).collect(),
                })
                .collect()
        } else {
            Vec::new()
        };

        let potential_key_columns = Self::potential_key_columns(&dataset.info().column_names);
        let mut key_column_duplicates = Vec::new();
        for name in potential_key_columns.iter().take(config.max_key_columns) {
            let cells = series_to_text(dataset.series(name)?)?;
            let distinct: HashSet<Option<&str>> = cells.iter().map(|c| c.as_deref()).collect();
            let duplicates = cells.len() - distinct.len();
            if duplicates > 0 {
                key_column_duplicates.push(KeyColumnDuplicate {
                    column: name.clone(),
                    duplicates,
                });
            }
        }

        debug!(
            "Duplicate analysis: {} exact duplicates, {} key columns checked",
            exact_duplicates,
            potential_key_columns.len().min(config.max_key_columns)
        );

        Ok(DuplicateSummary {
            exact_duplicates,
            exact_duplicate_pct: round2(percentage(exact_duplicates, rows)),
            potential_key_columns,
            key_column_duplicates,
            examples,
        })
    }

    fn potential_key_columns(names: &[String]) -> Vec<String> {
        names
            .iter()
            .filter(|name| {
                let lower = name.to_lowercase();
                KEY_NAME_HINTS.iter().any(|hint| lower.contains(hint))
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn analyze(df: DataFrame) -> DuplicateSummary {
        DuplicateAnalyzer::analyze(&Dataset::from_dataframe(df, "t.csv"), &ReportConfig::default())
            .unwrap()
    }

    #[test]
    fn test_two_identical_rows() {
        let df = df![
            "name" => ["a", "b", "a"],
            "value" => [1, 2, 1],
        ]
        .unwrap();
        let summary = analyze(df);

        assert_eq!(summary.exact_duplicates, 1);
        assert_eq!(summary.exact_duplicate_pct, 33.33);
        let rows: Vec<usize> = summary.examples.iter().map(|e| e.row_index).collect();
        assert_eq!(rows, vec![0, 2]);
        assert_eq!(
            summary.examples[0].values,
            vec![Some("a".to_string()), Some("1".to_string())]
        );
    }

    #[test]
    fn test_count_is_sum_of_multiplicity_minus_one() {
        let df = df!["v" => [1, 1, 1, 2, 2, 3]].unwrap();
        let summary = analyze(df);
        // (3 - 1) + (2 - 1)
        assert_eq!(summary.exact_duplicates, 3);
        assert_eq!(summary.examples.len(), 5);
    }

    #[test]
    fn test_missing_cells_compare_equal() {
        let df = df![
            "a" => [None, None, Some(1)],
            "b" => ["x", "x", "x"],
        ]
        .unwrap();
        let summary = analyze(df);
        assert_eq!(summary.exact_duplicates, 1);
    }

    #[test]
    fn test_examples_capped() {
        let df = df!["v" => vec![7; 30]].unwrap();
        let summary = analyze(df);
        assert_eq!(summary.exact_duplicates, 29);
        assert_eq!(summary.examples.len(), 10);
    }

    #[test]
    fn test_no_duplicates() {
        let df = df!["v" => [1, 2, 3]].unwrap();
        let summary = analyze(df);
        assert_eq!(summary.exact_duplicates, 0);
        assert!(summary.examples.is_empty());
    }

    #[test]
    fn test_key_columns() {
        let df = df![
            "customer_id" => [1, 1, 2, 3],
            "Email" => ["a@x", "b@x", "c@x", "d@x"],
            "ZipCode" => [Some("1"), None, None, Some("2")],
            "amount" => [5, 6, 7, 8],
        ]
        .unwrap();
        let summary = analyze(df);

        assert_eq!(
            summary.potential_key_columns,
            vec!["customer_id", "Email", "ZipCode"]
        );
        assert_eq!(
            summary.key_column_duplicates,
            vec![
                KeyColumnDuplicate {
                    column: "customer_id".to_string(),
                    duplicates: 1
                },
                KeyColumnDuplicate {
                    column: "ZipCode".to_string(),
                    duplicates: 1
                },
            ]
        );
        assert_eq!(summary.exact_duplicates, 0);
    }

    #[test]
    fn test_only_first_key_columns_checked() {
        let config = ReportConfig::builder()
            .max_key_columns(1)
            .build()
            .unwrap();
        let df = df![
            "id" => [1, 2],
            "code" => ["a", "a"],
        ]
        .unwrap();
        let summary =
            DuplicateAnalyzer::analyze(&Dataset::from_dataframe(df, "t.csv"), &config).unwrap();
        assert_eq!(summary.potential_key_columns.len(), 2);
        assert!(summary.key_column_duplicates.is_empty());
    }
}
