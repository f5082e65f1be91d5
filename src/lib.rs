//! # envscout
//!
//! Finds exposed `.env` files in GitHub repositories and scans their content
//! for leaked credentials.
//!
//! ## Pipeline
//!
//! Repository discovery (explicit list plus optional search) → candidate-file
//! discovery per repository → content retrieval → multi-pattern matching →
//! finding accumulation → text report.
//!
//! The remote side lives behind the [`core::ContentProvider`] trait; the
//! stock implementation is [`providers::GitHubClient`]. Transport, HTTP and
//! decode failures are contained there and degrade to empty results, so a
//! single broken repository or file never aborts a run. The one error that
//! does surface is a failed report write.
//!
//! ## Example
//!
//! ```rust
//! use envscout::rules::RuleSet;
//!
//! let rules = RuleSet::compile(&[r#"api[_-]?key\s*=\s*["']?([a-zA-Z0-9_\-]+)["']?"#.to_string()]);
//! let matches = rules.evaluate(r#"API_KEY="abc123""#);
//!
//! assert_eq!(matches[0].value, "abc123");
//! ```

pub mod cli;
pub mod core;
pub mod providers;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod utils;

// Re-export commonly used types
pub use core::{
    CandidateFile, Config, ContentProvider, EnvScoutError, Finding, RepoHit, Result, RuleMatch,
    ScanReport, ScanStats,
};

pub use providers::GitHubClient;
pub use report::TextReporter;
pub use rules::{default_patterns, DetectionRule, RuleSet};
pub use scanner::{ScanOutcome, Scanner};
