use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::error::{EnvScoutError, Result};
use crate::core::results::{CandidateFile, RepoHit};
use crate::core::traits::ContentProvider;
use crate::utils::{HttpClient, HttpResponse, RateLimiter};

#[derive(Debug, Deserialize)]
struct RepoSearchResponse {
    items: Vec<RepoSearchItem>,
}

#[derive(Debug, Deserialize)]
struct RepoSearchItem {
    full_name: String,
    html_url: String,
    #[serde(default)]
    stargazers_count: u64,
}

#[derive(Debug, Deserialize)]
struct CodeSearchResponse {
    items: Vec<CodeSearchItem>,
}

#[derive(Debug, Deserialize)]
struct CodeSearchItem {
    path: String,
    url: String,
    html_url: String,
}

/// JSON envelope the contents API wraps file bodies in.
#[derive(Debug, Deserialize)]
struct ContentEnvelope {
    #[serde(default)]
    content: String,
}

/// GitHub-backed [`ContentProvider`]. All three operations share one
/// token-bucket limiter, so the minimum request spacing holds across
/// searches and content fetches alike.
pub struct GitHubClient {
    token: Option<String>,
    base_url: String,
    target_filename: String,
    rate_limiter: RateLimiter,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Self {
        Self::with_config(token, "https://api.github.com".to_string(), ".env".to_string(), 500)
    }

    pub fn with_config(
        token: Option<String>,
        base_url: String,
        target_filename: String,
        rate_limit_delay_ms: u64,
    ) -> Self {
        Self {
            token,
            base_url,
            target_filename,
            rate_limiter: RateLimiter::with_min_interval(Duration::from_millis(
                rate_limit_delay_ms,
            )),
        }
    }

    async fn fetch(&self, url: &str) -> Result<HttpResponse> {
        self.rate_limiter.wait().await;

        tokio::task::spawn_blocking({
            let client = HttpClient::new();
            let url = url.to_string();
            let token_opt = self.token.clone();
            move || {
                let mut headers = vec![
                    ("Accept", "application/vnd.github+json".to_string()),
                    ("User-Agent", "envscout/0.1".to_string()),
                ];

                if let Some(token) = token_opt {
                    headers.push(("Authorization", format!("token {}", token)));
                }

                let header_refs: Vec<(&str, &str)> =
                    headers.iter().map(|(k, v)| (*k, v.as_str())).collect();

                client.get(&url, &header_refs)
            }
        })
        .await
        .map_err(|e| EnvScoutError::Unknown(format!("task join error: {}", e)))?
    }

    fn check_status(operation: &str, response: &HttpResponse) -> Result<()> {
        if response.is_success() {
            return Ok(());
        }

        if response.is_rate_limited() {
            warn!("GitHub rate limit hit during {}", operation);
        }

        Err(EnvScoutError::Remote {
            operation: operation.to_string(),
            status: response.status_code,
            message: response.text().unwrap_or_default(),
        })
    }

    async fn try_search_repositories(&self, query: &str, limit: usize) -> Result<Vec<RepoHit>> {
        // GitHub caps one search page at 100 items.
        let per_page = limit.min(100);
        let url = format!(
            "{}/search/repositories?q={}&sort=stars&order=desc&per_page={}",
            self.base_url,
            urlencoding::encode(query),
            per_page
        );

        let response = self.fetch(&url).await?;
        Self::check_status("repository search", &response)?;

        let parsed: RepoSearchResponse = response.json()?;
        info!("Repository search returned {} hits", parsed.items.len());

        Ok(parsed
            .items
            .into_iter()
            .take(limit)
            .map(|item| RepoHit {
                full_name: item.full_name,
                html_url: item.html_url,
                stars: item.stargazers_count,
            })
            .collect())
    }

    async fn try_find_candidate_files(&self, repository: &str) -> Result<Vec<CandidateFile>> {
        let query = format!("filename:{} repo:{}", self.target_filename, repository);
        let url = format!(
            "{}/search/code?q={}&per_page=100",
            self.base_url,
            urlencoding::encode(&query)
        );

        let response = self.fetch(&url).await?;
        Self::check_status("code search", &response)?;

        let parsed: CodeSearchResponse = response.json()?;
        debug!(
            "Found {} candidate file(s) in {}",
            parsed.items.len(),
            repository
        );

        Ok(parsed
            .items
            .into_iter()
            .map(|item| CandidateFile {
                repository: repository.to_string(),
                path: item.path,
                content_url: item.url,
                html_url: item.html_url,
            })
            .collect())
    }

    async fn try_fetch_content(&self, file: &CandidateFile) -> Result<String> {
        debug!("Fetching content: {}/{}", file.repository, file.path);

        let response = self.fetch(&file.content_url).await?;
        Self::check_status("content fetch", &response)?;

        let envelope: ContentEnvelope = response.json()?;
        decode_content(&envelope.content)
    }
}

/// Decode the base64 body from a content envelope. The API inserts newlines
/// into the encoded text, so strip whitespace before decoding.
fn decode_content(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| EnvScoutError::Decode(format!("invalid base64 content: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| EnvScoutError::Decode(format!("content is not valid UTF-8: {}", e)))
}

#[async_trait]
impl ContentProvider for GitHubClient {
    async fn search_repositories(&self, query: &str, limit: usize) -> Vec<RepoHit> {
        match self.try_search_repositories(query, limit).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Repository search for '{}' failed: {}", query, e);
                Vec::new()
            }
        }
    }

    async fn find_candidate_files(&self, repository: &str) -> Vec<CandidateFile> {
        match self.try_find_candidate_files(repository).await {
            Ok(files) => files,
            Err(e) => {
                warn!("Code search in {} failed: {}", repository, e);
                Vec::new()
            }
        }
    }

    async fn fetch_content(&self, file: &CandidateFile) -> String {
        match self.try_fetch_content(file).await {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "Content fetch for {}/{} failed: {}",
                    file.repository, file.path, e
                );
                String::new()
            }
        }
    }

    fn name(&self) -> &str {
        "github"
    }
}

// URL encoding utility (simple implementation)
mod urlencoding {
    pub fn encode(s: &str) -> String {
        s.chars()
            .map(|c| match c {
                'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => c.to_string(),
                ' ' => "+".to_string(),
                _ => format!("%{:02X}", c as u8),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_client_creation() {
        let client = GitHubClient::new(None);
        assert_eq!(client.name(), "github");
        assert_eq!(client.target_filename, ".env");
    }

    #[test]
    fn test_github_client_with_token() {
        let client = GitHubClient::new(Some("ghp_test123".to_string()));
        assert_eq!(client.name(), "github");
        assert!(client.token.is_some());
    }

    #[test]
    fn test_url_encoding() {
        assert_eq!(urlencoding::encode("hello world"), "hello+world");
        assert_eq!(
            urlencoding::encode("filename:.env repo:a/b"),
            "filename%3A.env+repo%3Aa%2Fb"
        );
    }

    #[test]
    fn test_decode_content_plain() {
        // "API_KEY=abc123\n"
        assert_eq!(decode_content("QVBJX0tFWT1hYmMxMjMK").unwrap(), "API_KEY=abc123\n");
    }

    #[test]
    fn test_decode_content_with_embedded_newlines() {
        // The contents API wraps encoded bodies at 60 columns.
        let wrapped = "QVBJX0tF\nWT1hYmMx\nMjMK\n";
        assert_eq!(decode_content(wrapped).unwrap(), "API_KEY=abc123\n");
    }

    #[test]
    fn test_decode_content_empty() {
        assert_eq!(decode_content("").unwrap(), "");
    }

    #[test]
    fn test_decode_content_rejects_garbage() {
        assert!(matches!(
            decode_content("!!not-base64!!"),
            Err(EnvScoutError::Decode(_))
        ));
    }
}
