//! Value distributions for text and categorical columns.

use std::collections::HashMap;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::loader::Dataset;
use crate::types::{CategoricalColumn, CategoricalSummary, ValueCount};
use crate::utils::{DtypeCategory, dtype_label, get_dtype_category, series_to_text};

pub struct CategoricalAnalyzer;

impl CategoricalAnalyzer {
    pub fn analyze(dataset: &Dataset, _config: &ReportConfig) -> Result<CategoricalSummary> {
        let mut details = Vec::new();

        for (name, series) in dataset.iter_series() {
            if get_dtype_category(series.dtype()) != DtypeCategory::Text {
                continue;
            }

            let cells = series_to_text(series)?;
            let mut index: HashMap<&str, usize> = HashMap::new();
            let mut value_counts: Vec<ValueCount> = Vec::new();
            let mut missing_count = 0;

            for cell in &cells {
                match cell.as_deref() {
                    Some(value) => match index.get(value) {
                        Some(&pos) => value_counts[pos].count += 1,
                        None => {
                            index.insert(value, value_counts.len());
                            value_counts.push(ValueCount {
                                value: value.to_string(),
                                count: 1,
                            });
                        }
                    },
                    None => missing_count += 1,
                }
            }

            details.push(CategoricalColumn {
                column: name.to_string(),
                dtype: dtype_label(series.dtype()),
                unique_count: value_counts.len(),
                unique_values: value_counts.iter().map(|vc| vc.value.clone()).collect(),
                value_counts,
                missing_count,
            });
        }

        Ok(CategoricalSummary {
            columns: details.len(),
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_first_seen_order_and_counts() {
        let df = df![
            "color" => [Some("red"), Some("blue"), None, Some("red"), Some("green")],
            "n" => [1, 2, 3, 4, 5],
        ]
        .unwrap();
        let summary = CategoricalAnalyzer::analyze(
            &Dataset::from_dataframe(df, "t.csv"),
            &ReportConfig::default(),
        )
        .unwrap();

        assert_eq!(summary.columns, 1);
        let color = &summary.details[0];
        assert_eq!(color.unique_values, vec!["red", "blue", "green"]);
        assert_eq!(color.unique_count, 3);
        assert_eq!(color.count_of("red"), 2);
        assert_eq!(color.missing_count, 1);
        assert!(color.has_nulls());
    }

    #[test]
    fn test_no_text_columns() {
        let df = df!["n" => [1.0, 2.0]].unwrap();
        let summary = CategoricalAnalyzer::analyze(
            &Dataset::from_dataframe(df, "t.csv"),
            &ReportConfig::default(),
        )
        .unwrap();
        assert_eq!(summary.columns, 0);
        assert!(summary.details.is_empty());
    }
}
