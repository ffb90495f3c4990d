//! Shared utilities for the analyzers and renderers.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a declared column type for analysis purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// Date or datetime types
    Datetime,
    /// Boolean type
    Boolean,
    /// String/text or categorical type
    Text,
    /// Other/unknown types
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a datetime type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if is_datetime_dtype(dtype) {
        DtypeCategory::Datetime
    } else if matches!(dtype, DataType::Boolean) {
        DtypeCategory::Boolean
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        DtypeCategory::Text
    } else {
        DtypeCategory::Other
    }
}

/// Short, stable label for a declared type (`int64`, `float64`, `object`),
/// used in tables and type counts.
pub fn dtype_label(dtype: &DataType) -> String {
    match dtype {
        DataType::Categorical(_, _) => "category".to_string(),
        DataType::String => "object".to_string(),
        DataType::Boolean => "bool".to_string(),
        DataType::Int8 => "int8".to_string(),
        DataType::Int16 => "int16".to_string(),
        DataType::Int32 => "int32".to_string(),
        DataType::Int64 => "int64".to_string(),
        DataType::UInt8 => "uint8".to_string(),
        DataType::UInt16 => "uint16".to_string(),
        DataType::UInt32 => "uint32".to_string(),
        DataType::UInt64 => "uint64".to_string(),
        DataType::Float32 => "float32".to_string(),
        DataType::Float64 => "float64".to_string(),
        DataType::Datetime(_, _) | DataType::Date => "datetime64".to_string(),
        other => other.to_string(),
    }
}

// =============================================================================
// Cell Access Utilities
// =============================================================================

/// Render every cell of a series as text, keeping missing cells as `None`.
///
/// Non-text columns are cast to strings so that values from different
/// column types can be compared and displayed uniformly.
pub fn series_to_text(series: &Series) -> PolarsResult<Vec<Option<String>>> {
    let as_text = if series.dtype() == &DataType::String {
        series.clone()
    } else {
        series.cast(&DataType::String)?
    };

    Ok(as_text
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Collect the non-missing values of a numeric series as `f64`.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let non_null = series.drop_nulls();
    let floats = non_null.cast(&DataType::Float64)?;
    Ok(floats
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Parse a value as a plain number, without stripping any formatting.
pub fn parse_strict_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Percentage of `part` in `whole`, 0 when `whole` is zero.
#[inline]
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

/// Round to two decimal places.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Truncate a string to at most `max_chars` characters.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Format an integer with thousands separators (e.g. `12,345`).
pub fn format_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a float with two decimals and thousands separators (e.g. `1,234.50`).
pub fn format_float_thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));
    let int_value: usize = int_part.parse().unwrap_or(0);
    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, format_thousands(int_value), frac_part)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_dtype_category() {
        assert_eq!(get_dtype_category(&DataType::Int64), DtypeCategory::Numeric);
        assert_eq!(get_dtype_category(&DataType::Date), DtypeCategory::Datetime);
        assert_eq!(get_dtype_category(&DataType::Boolean), DtypeCategory::Boolean);
        assert_eq!(get_dtype_category(&DataType::String), DtypeCategory::Text);
    }

    #[test]
    fn test_dtype_label() {
        assert_eq!(dtype_label(&DataType::String), "object");
        assert_eq!(dtype_label(&DataType::Int64), "int64");
        assert_eq!(dtype_label(&DataType::Float64), "float64");
        assert_eq!(dtype_label(&DataType::Boolean), "bool");
        assert_eq!(
            dtype_label(&DataType::Datetime(TimeUnit::Microseconds, None)),
            "datetime64"
        );
    }

    #[test]
    fn test_series_to_text_keeps_nulls() {
        let series = Series::new("v".into(), &[Some(1i64), None, Some(3)]);
        let text = series_to_text(&series).unwrap();
        assert_eq!(text, vec![Some("1".to_string()), None, Some("3".to_string())]);
    }

    #[test]
    fn test_numeric_values_drops_missing() {
        let series = Series::new("v".into(), &[Some(1.5f64), None, Some(-2.0)]);
        assert_eq!(numeric_values(&series).unwrap(), vec![1.5, -2.0]);
    }

    #[test]
    fn test_parse_strict_number() {
        assert_eq!(parse_strict_number(" 42 "), Some(42.0));
        assert_eq!(parse_strict_number("-1.5e3"), Some(-1500.0));
        assert_eq!(parse_strict_number("$100"), None);
        assert_eq!(parse_strict_number(""), None);
    }

    #[test]
    fn test_percentage_zero_whole() {
        assert_eq!(percentage(5, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_format_float_thousands() {
        assert_eq!(format_float_thousands(1234.5), "1,234.50");
        assert_eq!(format_float_thousands(-0.5), "-0.50");
        assert_eq!(format_float_thousands(0.0), "0.00");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
    }
}
