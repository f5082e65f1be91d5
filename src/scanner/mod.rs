//! The scan pipeline: repository resolution, per-repository file discovery,
//! content retrieval, pattern evaluation and finding accumulation.

use indicatif::{ProgressBar, ProgressStyle};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::core::config::ScanConfig;
use crate::core::error::{EnvScoutError, Result};
use crate::core::results::{Finding, ScanStats};
use crate::core::traits::ContentProvider;
use crate::rules::RuleSet;

lazy_static! {
    /// Repository identifiers must be in `owner/name` form.
    static ref REPO_ID: Regex = Regex::new(r"^[A-Za-z0-9_.\-]+/[A-Za-z0-9_.\-]+$").unwrap();
}

/// Everything a completed run produces.
pub struct ScanOutcome {
    pub findings: Vec<Finding>,
    pub stats: ScanStats,
}

/// Drives one scan run against a [`ContentProvider`]. Single-threaded and
/// sequential: repositories, then files within a repository, are visited in
/// resolution order, so finding order is deterministic given that order.
pub struct Scanner {
    provider: Box<dyn ContentProvider>,
    rules: RuleSet,
    repos: Vec<String>,
    search_query: Option<String>,
    max_repos: usize,
}

impl Scanner {
    /// A scanner without any usable rules would silently find nothing, so
    /// that is rejected up front as a configuration error.
    pub fn new(provider: Box<dyn ContentProvider>, rules: RuleSet, scan: &ScanConfig) -> Result<Self> {
        if rules.is_empty() {
            return Err(EnvScoutError::Config(
                "no usable detection rules configured".to_string(),
            ));
        }

        Ok(Self {
            provider,
            rules,
            repos: scan.repos.clone(),
            search_query: scan.search_query.clone(),
            max_repos: scan.max_repos,
        })
    }

    /// Union of the explicit repository list and search results, deduplicated
    /// in first-seen order (explicit entries first, then search hits in
    /// ranking order). Malformed identifiers are logged and dropped.
    pub async fn resolve_repositories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::new();

        for repo in &self.repos {
            if !REPO_ID.is_match(repo) {
                warn!("Ignoring malformed repository identifier '{}'", repo);
                continue;
            }
            if seen.insert(repo.clone()) {
                resolved.push(repo.clone());
            }
        }

        if let Some(query) = &self.search_query {
            info!("Searching for repositories matching '{}'", query);
            for hit in self
                .provider
                .search_repositories(query, self.max_repos)
                .await
            {
                if seen.insert(hit.full_name.clone()) {
                    resolved.push(hit.full_name);
                }
            }
        }

        resolved
    }

    /// Run the full pipeline: resolve, then scan.
    pub async fn run(&self) -> ScanOutcome {
        let repos = self.resolve_repositories().await;
        self.scan(&repos).await
    }

    /// Scan an already-resolved repository list. Per-repository and per-file
    /// failures degrade to skip-and-continue; nothing here aborts the run.
    pub async fn scan(&self, repos: &[String]) -> ScanOutcome {
        info!(
            "Scanning {} repositories with {} rules",
            repos.len(),
            self.rules.len()
        );

        let mut findings = Vec::new();
        let mut stats = ScanStats::default();

        let pb = ProgressBar::new(repos.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );

        for repo in repos {
            pb.set_message(repo.clone());
            self.scan_repository(repo, &mut findings, &mut stats).await;
            stats.repos_scanned += 1;
            pb.inc(1);
        }

        pb.finish_and_clear();

        stats.findings = findings.len();
        ScanOutcome { findings, stats }
    }

    async fn scan_repository(
        &self,
        repository: &str,
        findings: &mut Vec<Finding>,
        stats: &mut ScanStats,
    ) {
        debug!("Scanning repository: {}", repository);

        let files = self.provider.find_candidate_files(repository).await;
        if files.is_empty() {
            // "Not found" is a normal outcome, not a failure.
            debug!("No candidate files in {}", repository);
            return;
        }

        info!("Found {} candidate file(s) in {}", files.len(), repository);
        stats.files_found += files.len();

        for file in files {
            let content = self.provider.fetch_content(&file).await;
            stats.files_fetched += 1;

            if content.is_empty() {
                stats.files_empty += 1;
                continue;
            }

            let matches = self.rules.evaluate(&content);
            if matches.is_empty() {
                continue;
            }

            info!(
                "{} match(es) in {}/{}",
                matches.len(),
                file.repository,
                file.path
            );
            stats.matches += matches.len();

            findings.push(Finding {
                repository: file.repository,
                file_path: file.path,
                file_url: file.html_url,
                matches,
            });
        }
    }
}
