pub mod config;
pub mod error;
pub mod results;
pub mod traits;

pub use config::{Config, GitHubConfig, OutputConfig, ScanConfig};
pub use error::{EnvScoutError, Result};
pub use results::{CandidateFile, Finding, RepoHit, RuleMatch, ScanReport, ScanStats};
pub use traits::ContentProvider;
