//! Detection rule compilation and evaluation.
//!
//! A rule is a regex with exactly one capture group; the captured text is the
//! reported value and the original pattern source doubles as the rule's
//! label. Evaluation is a pure function of (content, rules).

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::core::error::{EnvScoutError, Result};
use crate::core::results::RuleMatch;

/// A compiled detection rule. The label is the pattern source string, used
/// verbatim in report output.
#[derive(Debug, Clone)]
pub struct DetectionRule {
    label: String,
    regex: Regex,
}

impl DetectionRule {
    /// Compile one pattern with case-insensitive, multi-line semantics and
    /// validate the single-capture-group contract.
    pub fn compile(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()
            .map_err(|e| EnvScoutError::Pattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        // captures_len() counts the implicit whole-match group 0.
        if regex.captures_len() != 2 {
            return Err(EnvScoutError::Pattern {
                pattern: pattern.to_string(),
                reason: format!(
                    "expected exactly 1 capture group, found {}",
                    regex.captures_len() - 1
                ),
            });
        }

        Ok(Self {
            label: pattern.to_string(),
            regex,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The full rule set for a run. Built once before the scan starts and shared
/// read-only across all file evaluations.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<DetectionRule>,
}

impl RuleSet {
    /// Compile every pattern, keeping input order. A pattern that fails to
    /// compile (or violates the capture-group contract) is logged and
    /// excluded for the remainder of the run; the other rules are kept.
    pub fn compile(patterns: &[String]) -> Self {
        let mut rules = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            match DetectionRule::compile(pattern) {
                Ok(rule) => rules.push(rule),
                Err(e) => warn!("Skipping detection rule: {}", e),
            }
        }

        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule to `content`. Matches come out in rule-input order
    /// and, within a rule, in order of occurrence in the text; that ordering
    /// is preserved all the way into the final report.
    pub fn evaluate(&self, content: &str) -> Vec<RuleMatch> {
        let mut matches = Vec::new();

        for rule in &self.rules {
            for caps in rule.regex.captures_iter(content) {
                if let Some(value) = caps.get(1) {
                    matches.push(RuleMatch {
                        rule: rule.label.clone(),
                        value: value.as_str().to_string(),
                    });
                }
            }
        }

        matches
    }
}

/// The stock pattern list shipped as the config default: one class of
/// credential per pattern, each with a single capture group around the
/// secret value.
pub fn default_patterns() -> Vec<String> {
    [
        // API keys
        r#"(?:api[_-]?key|apikey)\s*=\s*["']?([a-zA-Z0-9_\-]+)["']?"#,
        // AWS keys
        r#"(?:aws[_-]?access[_-]?key[_-]?id|aws[_-]?key)\s*=\s*["']?([A-Z0-9]{20})["']?"#,
        r#"(?:aws[_-]?secret[_-]?access[_-]?key|aws[_-]?secret)\s*=\s*["']?([a-zA-Z0-9/+=]{40})["']?"#,
        // Database URLs
        r#"(?:database[_-]?url|db[_-]?url|mongo[_-]?uri)\s*=\s*["']?([^\s"']+)["']?"#,
        // JWT secrets
        r#"(?:jwt[_-]?secret|secret[_-]?key)\s*=\s*["']?([a-zA-Z0-9_\-]+)["']?"#,
        // Generic secrets
        r#"(?:secret|password|passwd|pwd)\s*=\s*["']?([^\s"']+)["']?"#,
        // OAuth tokens
        r#"(?:oauth[_-]?token|access[_-]?token|bearer[_-]?token)\s*=\s*["']?([a-zA-Z0-9_\-]+)["']?"#,
        // Private keys
        r#"(?:private[_-]?key|priv[_-]?key)\s*=\s*["']?([^\s"']+)["']?"#,
        // Email credentials
        r#"(?:email[_-]?password|smtp[_-]?password)\s*=\s*["']?([^\s"']+)["']?"#,
        // Stripe keys
        r#"(?:stripe[_-]?key|stripe[_-]?secret)\s*=\s*["']?(sk_[a-zA-Z0-9]+)["']?"#,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const API_KEY_PATTERN: &str = r#"(?:api[_-]?key)\s*=\s*["']?([a-zA-Z0-9_\-]+)["']?"#;

    #[test]
    fn test_round_trip_api_key() {
        let rules = RuleSet::compile(&[API_KEY_PATTERN.to_string()]);
        let matches = rules.evaluate(r#"API_KEY="abc123""#);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rule, API_KEY_PATTERN);
        assert_eq!(matches[0].value, "abc123");
    }

    #[test]
    fn test_case_insensitive_multiline() {
        let rules = RuleSet::compile(&[API_KEY_PATTERN.to_string()]);
        let content = "# config\napi_key=first\nunrelated=x\nApI-KeY = 'second'\n";
        let matches = rules.evaluate(content);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].value, "first");
        assert_eq!(matches[1].value, "second");
    }

    #[test]
    fn test_malformed_rule_excluded_others_survive() {
        let patterns = vec![
            "([unclosed".to_string(),
            API_KEY_PATTERN.to_string(),
        ];
        let rules = RuleSet::compile(&patterns);

        assert_eq!(rules.len(), 1);
        let matches = rules.evaluate("api_key=still_works");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, "still_works");
    }

    #[test]
    fn test_wrong_capture_group_count_rejected() {
        // Zero groups
        assert!(DetectionRule::compile(r"secret\s*=\s*\S+").is_err());
        // Two groups
        assert!(DetectionRule::compile(r"(secret)\s*=\s*(\S+)").is_err());
        // Exactly one is fine
        assert!(DetectionRule::compile(r"secret\s*=\s*(\S+)").is_ok());
    }

    #[test]
    fn test_match_order_follows_rule_order_then_occurrence() {
        let patterns = vec![
            r"password\s*=\s*(\S+)".to_string(),
            r"token\s*=\s*(\S+)".to_string(),
        ];
        let rules = RuleSet::compile(&patterns);
        // Token appears first in the text but its rule comes second.
        let content = "token=t1\npassword=p1\npassword=p2\ntoken=t2\n";
        let matches = rules.evaluate(content);

        let values: Vec<&str> = matches.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["p1", "p2", "t1", "t2"]);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let rules = RuleSet::compile(&default_patterns());
        let content = "API_KEY=\"abc123\"\nDATABASE_URL=postgres://u:p@host/db\n";

        let first = rules.evaluate(content);
        let second = rules.evaluate(content);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_zero_matches_yields_empty() {
        let rules = RuleSet::compile(&default_patterns());
        assert!(rules.evaluate("nothing to see here\n").is_empty());
        assert!(rules.evaluate("").is_empty());
    }

    #[test]
    fn test_default_patterns_all_compile() {
        let patterns = default_patterns();
        let rules = RuleSet::compile(&patterns);
        assert_eq!(rules.len(), patterns.len());
    }
}
