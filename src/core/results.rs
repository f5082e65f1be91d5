use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository returned by the search API, with display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoHit {
    /// Identifier in `owner/name` form.
    pub full_name: String,
    pub html_url: String,
    pub stars: u64,
}

/// A file discovered by name-based code search, not yet fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateFile {
    pub repository: String,
    pub path: String,
    /// API locator used to fetch the content envelope.
    pub content_url: String,
    /// Browser-facing URL, used for display only.
    pub html_url: String,
}

/// One rule occurrence: the rule's label (its pattern source) and the text
/// captured by the rule's single capture group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMatch {
    pub rule: String,
    pub value: String,
}

/// All matches produced by one candidate file. Created only when the file
/// yielded at least one match; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub repository: String,
    pub file_path: String,
    pub file_url: String,
    pub matches: Vec<RuleMatch>,
}

/// The complete result of one scan run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub generated_at: DateTime<Utc>,
    pub findings: Vec<Finding>,
}

impl ScanReport {
    pub fn new(findings: Vec<Finding>) -> Self {
        Self {
            generated_at: Utc::now(),
            findings,
        }
    }
}

/// Counters for the end-of-run summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    pub repos_scanned: usize,
    pub files_found: usize,
    pub files_fetched: usize,
    pub files_empty: usize,
    pub findings: usize,
    pub matches: usize,
}
