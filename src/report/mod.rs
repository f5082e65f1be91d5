//! Plain-text report serialization.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::core::error::{EnvScoutError, Result};
use crate::core::results::ScanReport;

const BLOCK_RULE: &str =
    "================================================================================";
const FIELD_RULE: &str = "----------------------------------------";

/// Renders and writes the deterministic text report. Rendering is pure so
/// the format can be tested without touching the filesystem.
pub struct TextReporter;

impl TextReporter {
    pub fn render(report: &ScanReport) -> String {
        let mut out = String::new();

        out.push_str("GitHub .env File Scan Results\n");
        out.push_str(&format!(
            "Generated: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(BLOCK_RULE);
        out.push_str("\n\n");

        if report.findings.is_empty() {
            // An explicit marker distinguishes "found nothing" from a
            // truncated write.
            out.push_str("No matches found.\n");
            return out;
        }

        for finding in &report.findings {
            out.push_str(&format!("Repository: {}\n", finding.repository));
            out.push_str(&format!("File: {}\n", finding.file_path));
            out.push_str(&format!("URL: {}\n", finding.file_url));
            out.push_str(FIELD_RULE);
            out.push('\n');

            for m in &finding.matches {
                out.push_str(&format!("Pattern: {}\n", m.rule));
                out.push_str(&format!("Match: {}\n", m.value));
                out.push('\n');
            }

            out.push_str(BLOCK_RULE);
            out.push_str("\n\n");
        }

        out
    }

    /// Write the report to `path`. This is the one failure that surfaces as
    /// a run-level error: a completed scan with no report is a wasted run.
    pub fn write(report: &ScanReport, path: &Path) -> Result<()> {
        let rendered = Self::render(report);

        let mut file = File::create(path).map_err(EnvScoutError::Write)?;
        file.write_all(rendered.as_bytes())
            .map_err(EnvScoutError::Write)?;
        file.flush().map_err(EnvScoutError::Write)?;

        info!("Report written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::results::{Finding, RuleMatch};

    fn sample_report() -> ScanReport {
        ScanReport::new(vec![Finding {
            repository: "octocat/hello-world".to_string(),
            file_path: "config/.env".to_string(),
            file_url: "https://example.com/octocat/hello-world/blob/main/config/.env".to_string(),
            matches: vec![
                RuleMatch {
                    rule: r"api_key\s*=\s*(\S+)".to_string(),
                    value: "abc123".to_string(),
                },
                RuleMatch {
                    rule: r"secret\s*=\s*(\S+)".to_string(),
                    value: "hunter2".to_string(),
                },
            ],
        }])
    }

    #[test]
    fn test_render_contains_all_finding_fields() {
        let text = TextReporter::render(&sample_report());

        assert!(text.starts_with("GitHub .env File Scan Results\n"));
        assert!(text.contains("Generated: "));
        assert!(text.contains("Repository: octocat/hello-world"));
        assert!(text.contains("File: config/.env"));
        assert!(text.contains("URL: https://example.com/"));
        assert!(text.contains("Match: abc123"));
        assert!(text.contains("Match: hunter2"));
        assert!(!text.contains("No matches found."));
    }

    #[test]
    fn test_render_preserves_match_order() {
        let text = TextReporter::render(&sample_report());
        let first = text.find("abc123").unwrap();
        let second = text.find("hunter2").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_empty_report_has_explicit_marker() {
        let text = TextReporter::render(&ScanReport::new(Vec::new()));
        assert!(text.contains("No matches found.\n"));
        assert!(text.contains(BLOCK_RULE));
    }

    #[test]
    fn test_write_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let report = sample_report();

        TextReporter::write(&report, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, TextReporter::render(&report));
    }

    #[test]
    fn test_write_to_unwritable_path_is_write_error() {
        let report = ScanReport::new(Vec::new());
        let result = TextReporter::write(&report, Path::new("/nonexistent-dir/report.txt"));
        assert!(matches!(result, Err(EnvScoutError::Write(_))));
    }
}
