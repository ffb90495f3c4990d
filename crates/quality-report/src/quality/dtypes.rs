//! Declared type analysis and text-column type probes.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::loader::Dataset;
use crate::types::{ColumnTypeInfo, DtypeCount, TypeSummary};
use crate::utils::{dtype_label, parse_strict_number, percentage, round2};

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}$").expect("Invalid regex: YYYY-MM-DD"),
        Regex::new(r"^\d{1,2}[-/]\d{1,2}[-/]\d{4}$").expect("Invalid regex: MM-DD-YYYY"),
        Regex::new(r"^\d{4}-\d{2}-\d{2}\s\d{2}:\d{2}(:\d{2})?").expect("Invalid regex: datetime"),
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}(:\d{2})?").expect("Invalid regex: ISO"),
    ]
});

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y"];

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

pub struct TypeAnalyzer;

impl TypeAnalyzer {
    pub fn analyze(dataset: &Dataset, config: &ReportConfig) -> Result<TypeSummary> {
        let rows = dataset.rows();
        let mut dtype_counts: Vec<DtypeCount> = Vec::new();
        let mut details = Vec::with_capacity(dataset.columns());
        let mut warnings = Vec::new();

        for (name, series) in dataset.iter_series() {
            let dtype = dtype_label(series.dtype());
            match dtype_counts.iter_mut().find(|c| c.dtype == dtype) {
                Some(entry) => entry.columns += 1,
                None => dtype_counts.push(DtypeCount {
                    dtype: dtype.clone(),
                    columns: 1,
                }),
            }

            let unique_values = series.drop_nulls().n_unique()?;
            details.push(ColumnTypeInfo {
                column: name.to_string(),
                dtype,
                unique_values,
                unique_pct: round2(percentage(unique_values, rows)),
            });

            if series.dtype() == &DataType::String
                && let Some(warning) = Self::probe_text_column(name, series, config)
            {
                warnings.push(warning);
            }
        }

        // Stable: ties keep first-appearance order
        dtype_counts.sort_by(|a, b| b.columns.cmp(&a.columns));

        Ok(TypeSummary {
            dtype_counts,
            details,
            warnings,
        })
    }

    /// Inspect the leading non-missing values of a text column. Any failure
    /// to read the column is treated as "no finding".
    fn probe_text_column(name: &str, series: &Series, config: &ReportConfig) -> Option<String> {
        let text = series.str().ok()?;
        let sample: Vec<&str> = text
            .into_iter()
            .flatten()
            .take(config.type_probe_prefix)
            .collect();

        if sample.is_empty() {
            return None;
        }

        if sample.iter().all(|v| parse_strict_number(v).is_some()) {
            Some(format!("'{}' is stored as text but appears numeric", name))
        } else if sample.iter().all(|v| looks_like_datetime(v)) {
            Some(format!(
                "'{}' is stored as text but appears to be datetime",
                name
            ))
        } else {
            None
        }
    }
}

/// Whether a value is a recognizable calendar date or date-time.
pub(crate) fn looks_like_datetime(value: &str) -> bool {
    let trimmed = value.trim();
    if !DATE_PATTERNS.iter().any(|p| p.is_match(trimmed)) {
        return false;
    }

    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(trimmed, fmt).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).is_ok())
        || DateTime::parse_from_rfc3339(trimmed).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(df: DataFrame) -> TypeSummary {
        TypeAnalyzer::analyze(&Dataset::from_dataframe(df, "t.csv"), &ReportConfig::default())
            .unwrap()
    }

    #[test]
    fn test_text_numbers_warn() {
        let df = df!["zip" => [Some("01234"), None, Some("98765")]].unwrap();
        let summary = analyze(df);
        assert_eq!(
            summary.warnings,
            vec!["'zip' is stored as text but appears numeric"]
        );
    }

    #[test]
    fn test_text_dates_warn() {
        let df = df!["signup" => ["2024-01-15", "2024-02-01T10:30:00", "03/04/2023"]].unwrap();
        let summary = analyze(df);
        assert_eq!(
            summary.warnings,
            vec!["'signup' is stored as text but appears to be datetime"]
        );
    }

    #[test]
    fn test_mixed_text_no_warning() {
        let df = df!["mixed" => ["2024-01-15", "hello", "42"]].unwrap();
        assert!(analyze(df).warnings.is_empty());
    }

    #[test]
    fn test_invalid_calendar_date_rejected() {
        assert!(!looks_like_datetime("2024-13-45"));
        assert!(looks_like_datetime("2024-02-29"));
        assert!(looks_like_datetime("2024-02-29 08:15"));
        assert!(!looks_like_datetime("yesterday"));
    }

    #[test]
    fn test_numeric_columns_never_warn() {
        let df = df!["n" => [1, 2, 3]].unwrap();
        assert!(analyze(df).warnings.is_empty());
    }

    #[test]
    fn test_unique_counts_exclude_missing() {
        let df = df![
            "a" => [Some(1), Some(1), None, Some(2)],
            "b" => ["x", "y", "z", "w"],
        ]
        .unwrap();
        let summary = analyze(df);

        assert_eq!(summary.details[0].unique_values, 2);
        assert_eq!(summary.details[0].unique_pct, 50.0);
        assert_eq!(summary.details[0].dtype, "int32");
        assert_eq!(summary.details[1].unique_values, 4);
        assert_eq!(summary.details[1].dtype, "object");
    }

    #[test]
    fn test_dtype_counts_most_common_first() {
        let df = df![
            "n" => [1i64, 2],
            "s1" => ["a", "b"],
            "s2" => ["c", "d"],
        ]
        .unwrap();
        let summary = analyze(df);
        assert_eq!(summary.dtype_counts[0].dtype, "object");
        assert_eq!(summary.dtype_counts[0].columns, 2);
        assert_eq!(summary.dtype_counts[1].columns, 1);
    }
}
