use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

use envscout::core::{CandidateFile, ContentProvider, RepoHit, ScanReport};
use envscout::rules::RuleSet;
use envscout::scanner::Scanner;
use envscout::{Config, TextReporter};

/// In-memory provider: repositories, files and contents are fixed up front,
/// and a missing content entry behaves like a contained fetch failure.
struct StubProvider {
    search_hits: Vec<RepoHit>,
    files: HashMap<String, Vec<CandidateFile>>,
    contents: HashMap<String, String>,
}

impl StubProvider {
    fn new() -> Self {
        Self {
            search_hits: Vec::new(),
            files: HashMap::new(),
            contents: HashMap::new(),
        }
    }

    fn with_file(mut self, repo: &str, path: &str, content: Option<&str>) -> Self {
        let content_url = format!("stub://{}/{}", repo, path);
        self.files
            .entry(repo.to_string())
            .or_default()
            .push(CandidateFile {
                repository: repo.to_string(),
                path: path.to_string(),
                content_url: content_url.clone(),
                html_url: format!("https://example.com/{}/blob/main/{}", repo, path),
            });
        if let Some(c) = content {
            self.contents.insert(content_url, c.to_string());
        }
        self
    }

    fn with_search_hit(mut self, repo: &str) -> Self {
        self.search_hits.push(RepoHit {
            full_name: repo.to_string(),
            html_url: format!("https://example.com/{}", repo),
            stars: 1,
        });
        self
    }
}

#[async_trait]
impl ContentProvider for StubProvider {
    async fn search_repositories(&self, _query: &str, limit: usize) -> Vec<RepoHit> {
        self.search_hits.iter().take(limit).cloned().collect()
    }

    async fn find_candidate_files(&self, repository: &str) -> Vec<CandidateFile> {
        self.files.get(repository).cloned().unwrap_or_default()
    }

    async fn fetch_content(&self, file: &CandidateFile) -> String {
        self.contents
            .get(&file.content_url)
            .cloned()
            .unwrap_or_default()
    }

    fn name(&self) -> &str {
        "stub"
    }
}

fn scan_config(repos: Vec<&str>, query: Option<&str>) -> envscout::core::ScanConfig {
    let mut scan = Config::default().scan;
    scan.repos = repos.into_iter().map(String::from).collect();
    scan.search_query = query.map(String::from);
    scan
}

#[tokio::test]
async fn full_pipeline_produces_ordered_findings_and_report() {
    let provider = StubProvider::new()
        .with_file(
            "acme/api",
            ".env",
            Some("API_KEY=\"abc123\"\nDATABASE_URL=postgres://u:p@db/prod\n"),
        )
        .with_file("acme/api", "docs/.env", Some("# nothing secret here\n"))
        .with_file("search/hit", ".env", Some("stripe_key=sk_live4242\n"))
        .with_search_hit("search/hit")
        // Duplicate of the explicit repo; must not be scanned twice
        .with_search_hit("acme/api");

    let scanner = Scanner::new(
        Box::new(provider),
        RuleSet::compile(&envscout::default_patterns()),
        &scan_config(vec!["acme/api"], Some("topic:api")),
    )
    .unwrap();

    let resolved = scanner.resolve_repositories().await;
    assert_eq!(
        resolved,
        vec!["acme/api".to_string(), "search/hit".to_string()]
    );

    let outcome = scanner.scan(&resolved).await;

    // docs/.env matched nothing, so exactly two findings remain, in
    // traversal order.
    assert_eq!(outcome.findings.len(), 2);
    assert_eq!(outcome.findings[0].repository, "acme/api");
    assert_eq!(outcome.findings[0].file_path, ".env");
    assert_eq!(outcome.findings[1].repository, "search/hit");

    let values: Vec<&str> = outcome.findings[0]
        .matches
        .iter()
        .map(|m| m.value.as_str())
        .collect();
    assert!(values.contains(&"abc123"));
    assert!(values.contains(&"postgres://u:p@db/prod"));

    assert_eq!(outcome.findings[1].matches[0].value, "sk_live4242");

    // Report carries every finding block
    let report = ScanReport::new(outcome.findings);
    let text = TextReporter::render(&report);
    assert!(text.contains("Repository: acme/api"));
    assert!(text.contains("Repository: search/hit"));
    assert!(text.contains("Match: sk_live4242"));
}

#[tokio::test]
async fn failed_fetch_skips_only_that_file() {
    // Middle file has no content entry: the stub returns an empty string,
    // the same contained-failure contract the real client provides.
    let provider = StubProvider::new()
        .with_file("acme/api", "a/.env", Some("api_key=left\n"))
        .with_file("acme/api", "b/.env", None)
        .with_file("acme/api", "c/.env", Some("api_key=right\n"));

    let scanner = Scanner::new(
        Box::new(provider),
        RuleSet::compile(&envscout::default_patterns()),
        &scan_config(vec!["acme/api"], None),
    )
    .unwrap();

    let outcome = scanner.run().await;

    assert_eq!(outcome.findings.len(), 2);
    assert_eq!(outcome.findings[0].file_path, "a/.env");
    assert_eq!(outcome.findings[1].file_path, "c/.env");
    assert_eq!(outcome.stats.files_fetched, 3);
    assert_eq!(outcome.stats.files_empty, 1);
}

#[tokio::test]
async fn run_with_no_candidates_still_writes_wellformed_report() {
    let provider = StubProvider::new();

    let scanner = Scanner::new(
        Box::new(provider),
        RuleSet::compile(&envscout::default_patterns()),
        &scan_config(vec!["empty/repo", "another/empty"], None),
    )
    .unwrap();

    let outcome = scanner.run().await;
    assert!(outcome.findings.is_empty());
    assert_eq!(outcome.stats.repos_scanned, 2);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");
    let report = ScanReport::new(outcome.findings);

    TextReporter::write(&report, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("GitHub .env File Scan Results\n"));
    assert!(written.contains("Generated: "));
    assert!(written.contains("No matches found.\n"));
}

#[tokio::test]
async fn unwritable_destination_surfaces_as_error() {
    let report = ScanReport::new(Vec::new());
    let result = TextReporter::write(&report, Path::new("/proc/no-such-dir/report.txt"));
    assert!(result.is_err());
}
