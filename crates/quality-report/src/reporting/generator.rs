//! Writing rendered reports to disk.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{QualityError, Result};
use crate::types::QualityReport;

/// Suffix appended to the input file stem for the default HTML path.
const DEFAULT_SUFFIX: &str = "_quality_report.html";

/// Writes reports to a chosen output path.
pub struct ReportGenerator {
    output_path: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    /// Use the explicit path when given, otherwise `<input_stem>_quality_report.html`
    /// in the working directory.
    pub fn for_input(input: &Path, output: Option<PathBuf>) -> Self {
        Self::new(output.unwrap_or_else(|| Self::default_output_path(input)))
    }

    pub fn default_output_path(input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("dataset");
        PathBuf::from(format!("{}{}", stem, DEFAULT_SUFFIX))
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Write the HTML document, creating parent directories as needed.
    pub fn write_html(&self, html: &str) -> Result<PathBuf> {
        self.write_bytes(&self.output_path, html.as_bytes())?;
        info!("HTML report saved: {}", self.output_path.display());
        Ok(self.output_path.clone())
    }

    /// Write the aggregated report as pretty JSON next to the HTML report.
    pub fn write_json(&self, report: &QualityReport) -> Result<PathBuf> {
        let json_path = self.output_path.with_extension("json");
        let content = serde_json::to_string_pretty(report)?;
        self.write_bytes(&json_path, content.as_bytes())?;
        info!("JSON report saved: {}", json_path.display());
        Ok(json_path)
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let to_error = |e: std::io::Error| QualityError::ReportWrite {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(to_error)?;
        }

        let mut file = File::create(path).map_err(to_error)?;
        file.write_all(bytes).map_err(to_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        let path = ReportGenerator::default_output_path(Path::new("data/sales_2024.csv"));
        assert_eq!(path, PathBuf::from("sales_2024_quality_report.html"));
    }

    #[test]
    fn test_explicit_output_wins() {
        let generator =
            ReportGenerator::for_input(Path::new("a.csv"), Some(PathBuf::from("out/r.html")));
        assert_eq!(generator.output_path(), Path::new("out/r.html"));
    }

    #[test]
    fn test_write_html_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("report.html");
        let generator = ReportGenerator::new(target.clone());

        let written = generator.write_html("<html></html>").unwrap();
        assert_eq!(written, target);
        assert_eq!(fs::read_to_string(&target).unwrap(), "<html></html>");
    }

    #[test]
    fn test_write_into_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        // A regular file cannot act as a directory
        let generator = ReportGenerator::new(blocker.join("report.html"));
        let err = generator.write_html("x").unwrap_err();
        assert_eq!(err.error_code(), "REPORT_WRITE_FAILED");
    }
}
