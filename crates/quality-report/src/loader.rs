//! Dataset loading.
//!
//! Reads a delimited file into a polars [`DataFrame`] and records the
//! metadata the report header needs. Column types are inferred once here
//! and stay fixed for the rest of the run.

use crate::error::{QualityError, Result};
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions, NullValues};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Number of lines polars inspects when inferring column types.
const INFER_SCHEMA_LENGTH: usize = 100;

/// Cell values read as missing, in addition to empty fields.
pub const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Metadata about a loaded file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetInfo {
    /// Path the dataset was loaded from.
    pub path: String,
    /// File name without directories (e.g. `data.csv`).
    pub filename: String,
    /// Number of data rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
    /// Column names in file order.
    pub column_names: Vec<String>,
}

/// A loaded, read-only table together with its metadata.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
    info: DatasetInfo,
}

impl Dataset {
    /// Wrap an in-memory frame, e.g. one built in tests or by another tool.
    pub fn from_dataframe(df: DataFrame, path: impl Into<String>) -> Self {
        let path = path.into();
        let filename = Path::new(&path)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(path.as_str())
            .to_string();
        let info = DatasetInfo {
            path,
            filename,
            rows: df.height(),
            columns: df.width(),
            column_names: df
                .get_column_names()
                .iter()
                .map(|name| name.to_string())
                .collect(),
        };
        Self { df, info }
    }

    pub fn df(&self) -> &DataFrame {
        &self.df
    }

    pub fn info(&self) -> &DatasetInfo {
        &self.info
    }

    pub fn rows(&self) -> usize {
        self.info.rows
    }

    pub fn columns(&self) -> usize {
        self.info.columns
    }

    /// Look up a column as a series.
    pub fn series(&self, name: &str) -> Result<&Series> {
        Ok(self.df.column(name)?.as_materialized_series())
    }

    /// Iterate over `(name, series)` pairs in column order.
    pub fn iter_series(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.df
            .get_columns()
            .iter()
            .map(|col| (col.name().as_str(), col.as_materialized_series()))
    }
}

/// Load a delimited file from disk.
///
/// Tries a standard quoted parse first, then a parse without quote
/// handling, and finally a parse over pre-cleaned content. Fails with
/// [`QualityError::FileNotFound`] or [`QualityError::ParseFailed`].
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let display = path.display().to_string();

    if !path.is_file() {
        return Err(QualityError::FileNotFound(display));
    }

    let df = load_csv_with_fallbacks(path)?;
    if df.width() == 0 {
        return Err(QualityError::ParseFailed {
            path: display,
            reason: "no columns found".to_string(),
        });
    }

    let dataset = Dataset::from_dataframe(df, display);
    info!(
        "Loaded '{}': {} rows x {} columns",
        dataset.info().filename,
        dataset.rows(),
        dataset.columns()
    );
    Ok(dataset)
}

fn load_csv_with_fallbacks(path: &Path) -> Result<DataFrame> {
    let path_buf = PathBuf::from(path);

    // Strategy 1: standard loading with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_LENGTH))
        .with_has_header(true)
        .with_parse_options(parse_options(Some(b'"')))
        .try_into_reader_with_file_path(Some(path_buf.clone()))
        .and_then(|reader| reader.finish())
    {
        Ok(df) => return Ok(df),
        Err(e) => debug!("Standard loading failed: {}", e),
    }

    // Strategy 2: without quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_LENGTH))
        .with_has_header(true)
        .with_parse_options(parse_options(None))
        .try_into_reader_with_file_path(Some(path_buf))
        .and_then(|reader| reader.finish())
    {
        Ok(df) => return Ok(df),
        Err(e) => debug!("Loading without quotes failed: {}", e),
    }

    // Strategy 3: pre-clean content
    let content = std::fs::read_to_string(path)?;
    let cleaned = clean_csv_content(&content);

    CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_LENGTH))
        .with_has_header(true)
        .with_parse_options(parse_options(Some(b'"')))
        .into_reader_with_file_handle(Cursor::new(cleaned))
        .finish()
        .map_err(|e| QualityError::ParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

fn parse_options(quote_char: Option<u8>) -> CsvParseOptions {
    let tokens = NULL_TOKENS.iter().map(|&token| token.into()).collect();
    CsvParseOptions::default()
        .with_quote_char(quote_char)
        .with_null_values(Some(NullValues::AllColumns(tokens)))
}

/// Drop blank lines and collapse doubled quotes.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("temp file");
        file.write_all(content.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn test_load_records_shape_and_names() {
        let file = write_temp("a,b,c\n1,x,2.5\n2,y,\n");
        let dataset = load_dataset(file.path()).unwrap();

        assert_eq!(dataset.rows(), 2);
        assert_eq!(dataset.columns(), 3);
        assert_eq!(dataset.info().column_names, vec!["a", "b", "c"]);
        assert!(dataset.info().filename.ends_with(".csv"));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = load_dataset("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, QualityError::FileNotFound(_)));
        assert!(err.is_load_error());
    }

    #[test]
    fn test_directory_is_not_a_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(dir.path()).unwrap_err();
        assert!(matches!(err, QualityError::FileNotFound(_)));
    }

    #[test]
    fn test_from_dataframe_uses_file_name() {
        let df = df!["x" => [1, 2, 3]].unwrap();
        let dataset = Dataset::from_dataframe(df, "some/dir/input.csv");
        assert_eq!(dataset.info().filename, "input.csv");
        assert_eq!(dataset.rows(), 3);
    }

    #[test]
    fn test_null_tokens_are_missing() {
        let file = write_temp("age,city\n30,Paris\nNA,N/A\n25,null\n41,Rome\n");
        let dataset = load_dataset(file.path()).unwrap();

        let age = dataset.series("age").unwrap();
        assert!(age.dtype().is_integer());
        assert_eq!(age.null_count(), 1);
        assert_eq!(dataset.series("city").unwrap().null_count(), 2);
    }

    #[test]
    fn test_null_tokens_in_float_column() {
        let file = write_temp("x\n1.5\nNaN\n-nan\n#N/A\n2.5\n");
        let dataset = load_dataset(file.path()).unwrap();

        let x = dataset.series("x").unwrap();
        assert_eq!(x.dtype(), &DataType::Float64);
        assert_eq!(x.null_count(), 3);
    }

    #[test]
    fn test_clean_csv_content() {
        let cleaned = clean_csv_content("a,b\n\n\"\"x\"\",1\n   \n");
        assert_eq!(cleaned, "a,b\n\"x\",1");
    }
}
