use serde::{Deserialize, Serialize};

use crate::rules::default_patterns;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GitHubConfig::default(),
            scan: ScanConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub token: Option<String>,
    pub base_url: String,
    /// Minimum spacing between remote requests, in milliseconds.
    pub rate_limit_delay_ms: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: "https://api.github.com".to_string(),
            rate_limit_delay_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Explicit repositories to scan, `owner/name` form.
    pub repos: Vec<String>,
    /// Detection patterns; each must contain exactly one capture group.
    pub patterns: Vec<String>,
    /// Optional repository search query to widen the target set.
    pub search_query: Option<String>,
    /// Cap on repositories taken from search results.
    pub max_repos: usize,
    /// Filename the code search looks for inside each repository.
    pub target_filename: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            repos: Vec::new(),
            patterns: default_patterns(),
            search_query: None,
            max_repos: 10,
            target_filename: ".env".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "github_env_matches.txt".to_string(),
        }
    }
}
