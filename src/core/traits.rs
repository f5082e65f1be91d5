use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::results::{CandidateFile, RepoHit};

/// A remote source of repositories and file content.
///
/// Every operation is infallible from the caller's point of view: transport,
/// HTTP and decode failures are logged inside the implementation and
/// converted to an empty result. "Nothing found" and "the call failed" are
/// deliberately the same outcome for the scan pipeline.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Search for repositories matching `query`, most-starred first,
    /// truncated to `limit` (the remote API caps one page at 100).
    async fn search_repositories(&self, query: &str, limit: usize) -> Vec<RepoHit>;

    /// Find files with the configured target filename inside one repository.
    async fn find_candidate_files(&self, repository: &str) -> Vec<CandidateFile>;

    /// Fetch and decode a candidate file's body. Returns an empty string on
    /// failure, which a caller cannot tell apart from a truly empty file.
    async fn fetch_content(&self, file: &CandidateFile) -> String;

    /// Name of the provider (e.g., "github").
    fn name(&self) -> &str;
}
