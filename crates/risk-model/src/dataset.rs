//! Training data preparation.
//!
//! Reads the phone-usage survey, derives the binary label from
//! `Addiction_Level`, and engineers the ratio features for every usable row.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{Result, RiskModelError};
use crate::features::RiskFeatures;

/// Raw input columns, in feature order.
pub const INPUT_COLUMNS: [&str; 5] = [
    "Daily_Usage_Hours",
    "Sleep_Hours",
    "Phone_Checks_Per_Day",
    "Apps_Used_Daily",
    "Time_on_Social_Media",
];

/// Column the label is derived from.
pub const LABEL_COLUMN: &str = "Addiction_Level";

/// Feature rows and labels ready for a [`Classifier`](crate::Classifier).
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingData {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<bool>,
    /// Rows dropped for a missing value or an undefined ratio.
    pub skipped_rows: usize,
}

impl TrainingData {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn positives(&self) -> usize {
        self.labels.iter().filter(|&&label| label).count()
    }

    /// Read a CSV file and prepare it for training.
    pub fn from_csv(path: impl AsRef<Path>, label_threshold: f64) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(RiskModelError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("training file not found: {}", path.display()),
            )));
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
            .finish()?;
        debug!(
            "Read '{}': {} rows x {} columns",
            path.display(),
            df.height(),
            df.width()
        );

        Self::from_dataframe(&df, label_threshold)
    }

    /// Prepare an in-memory frame for training.
    ///
    /// A row is positive when `Addiction_Level > label_threshold`. Rows with a
    /// missing value, a negative value or a zero denominator are skipped.
    pub fn from_dataframe(df: &DataFrame, label_threshold: f64) -> Result<Self> {
        let inputs = INPUT_COLUMNS
            .iter()
            .map(|name| float_column(df, name))
            .collect::<Result<Vec<_>>>()?;
        let levels = float_column(df, LABEL_COLUMN)?;

        let mut features = Vec::with_capacity(df.height());
        let mut labels = Vec::with_capacity(df.height());
        let mut skipped_rows = 0;

        for (row, level) in levels.iter().copied().enumerate() {
            let prepared = level.zip(row_features(&inputs, row));
            match prepared {
                Some((level, f)) if level.is_finite() => {
                    features.push(f.to_vector().to_vec());
                    labels.push(level > label_threshold);
                }
                _ => skipped_rows += 1,
            }
        }

        if skipped_rows > 0 {
            warn!(
                "Skipped {} rows with missing values or zero denominators",
                skipped_rows
            );
        }

        let data = Self {
            features,
            labels,
            skipped_rows,
        };
        if data.is_empty() {
            return Err(RiskModelError::InvalidData(
                "no usable training rows".to_string(),
            ));
        }

        info!(
            "Prepared {} training rows ({} high risk)",
            data.len(),
            data.positives()
        );
        Ok(data)
    }
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .map_err(|_| RiskModelError::ColumnNotFound(name.to_string()))?;
    let series = column
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

fn row_features(inputs: &[Vec<Option<f64>>], row: usize) -> Option<RiskFeatures> {
    let values: Vec<f64> = inputs
        .iter()
        .map(|column| column[row])
        .collect::<Option<Vec<f64>>>()?;
    RiskFeatures::new(values[0], values[1], values[2], values[3], values[4]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey() -> DataFrame {
        df![
            "Daily_Usage_Hours" => [Some(9.0), Some(2.0), Some(8.0), None, Some(3.0)],
            "Sleep_Hours" => [4.0, 8.0, 0.0, 7.0, 7.5],
            "Phone_Checks_Per_Day" => [120i64, 20, 100, 40, 30],
            "Apps_Used_Daily" => [4i64, 10, 5, 6, 8],
            "Time_on_Social_Media" => [5.0, 1.0, 4.0, 2.0, 1.5],
            "Addiction_Level" => [10.0, 3.0, 9.8, 5.0, 9.5],
        ]
        .unwrap()
    }

    #[test]
    fn test_labels_and_skipped_rows() {
        let data = TrainingData::from_dataframe(&survey(), 9.5).unwrap();

        // Row 2 has zero sleep, row 3 a missing usage value
        assert_eq!(data.skipped_rows, 2);
        assert_eq!(data.len(), 3);
        // 9.5 is not above the threshold
        assert_eq!(data.labels, vec![true, false, false]);
    }

    #[test]
    fn test_engineered_columns_appended() {
        let data = TrainingData::from_dataframe(&survey(), 9.5).unwrap();
        assert_eq!(
            data.features[0],
            vec![9.0, 4.0, 120.0, 4.0, 5.0, 2.25, 30.0]
        );
    }

    #[test]
    fn test_missing_column() {
        let df = survey().drop("Sleep_Hours").unwrap();
        let err = TrainingData::from_dataframe(&df, 9.5).unwrap_err();
        assert!(matches!(err, RiskModelError::ColumnNotFound(name) if name == "Sleep_Hours"));
    }

    #[test]
    fn test_no_usable_rows() {
        let df = df![
            "Daily_Usage_Hours" => [1.0],
            "Sleep_Hours" => [0.0],
            "Phone_Checks_Per_Day" => [1.0],
            "Apps_Used_Daily" => [1.0],
            "Time_on_Social_Media" => [1.0],
            "Addiction_Level" => [1.0],
        ]
        .unwrap();
        assert!(matches!(
            TrainingData::from_dataframe(&df, 9.5),
            Err(RiskModelError::InvalidData(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = TrainingData::from_csv("/no/such/survey.csv", 9.5).unwrap_err();
        assert!(matches!(err, RiskModelError::Io(_)));
    }
}
