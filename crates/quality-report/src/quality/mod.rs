//! Data quality analysis module.
//!
//! Each analyzer is a read-only pass over a loaded [`Dataset`](crate::loader::Dataset)
//! producing one summary. Analyzers are independent and can run in any order.

mod categorical;
mod dtypes;
mod duplicates;
mod missing;
mod outliers;
mod statistics;

pub use categorical::CategoricalAnalyzer;
pub use dtypes::TypeAnalyzer;
pub use duplicates::DuplicateAnalyzer;
pub use missing::{MissingMatrix, MissingValueAnalyzer};
pub use outliers::{BoxPlotData, OutlierAnalyzer};
