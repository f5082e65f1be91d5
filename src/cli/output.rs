use colored::Colorize;

use crate::core::results::{Finding, ScanStats};

pub struct OutputFormatter;

impl OutputFormatter {
    /// Print a startup banner
    pub fn print_banner() {
        println!("{}", "=".repeat(70).bright_cyan());
        println!(
            "{}",
            "  envscout - Exposed .env File Scanner".bright_cyan().bold()
        );
        println!("{}", "=".repeat(70).bright_cyan());
        println!();
    }

    /// Print an ethical use warning
    pub fn print_ethical_warning() {
        println!("{}", "⚠️  ETHICAL USE ONLY ⚠️".yellow().bold());
        println!("This tool is for security research and responsible disclosure only.");
        println!("By using this tool, you agree to:");
        println!("  {} Use findings for research and awareness", "✓".green());
        println!("  {} Report exposed credentials to their owners", "✓".green());
        println!("  {} Not use credentials for unauthorized purposes", "✓".green());
        println!();
    }

    /// Print scan kickoff info
    pub fn print_scan_start(repo_count: usize, rule_count: usize) {
        println!(
            "{} Scanning {} repositories with {} detection rules...",
            "🔍".bright_yellow(),
            repo_count.to_string().bright_white(),
            rule_count.to_string().bright_white()
        );
        println!();
    }

    /// Print one finding as it is recorded
    pub fn print_finding(finding: &Finding) {
        println!(
            "  {} {} match(es) in {} ({})",
            "✓".green(),
            finding.matches.len().to_string().bright_yellow(),
            finding.file_path.bright_white(),
            finding.repository.bright_cyan()
        );
    }

    /// Print the end-of-run summary
    pub fn print_summary(stats: &ScanStats) {
        println!();
        println!("{}", "=".repeat(70).bright_cyan());
        println!("{}", "  Scan Summary".bright_cyan().bold());
        println!("{}", "=".repeat(70).bright_cyan());
        println!();
        println!(
            "  Repositories scanned: {}",
            stats.repos_scanned.to_string().bright_white()
        );
        println!(
            "  Candidate files found: {}",
            stats.files_found.to_string().bright_white()
        );
        println!(
            "  Files fetched: {}",
            stats.files_fetched.to_string().bright_white()
        );
        println!(
            "  Empty or failed fetches: {}",
            stats.files_empty.to_string().bright_yellow()
        );
        println!(
            "  Findings: {}",
            stats.findings.to_string().bright_green()
        );
        println!(
            "  Total matches: {}",
            stats.matches.to_string().bright_green()
        );
        println!();

        if stats.findings > 0 {
            println!(
                "{}",
                "⚠️  EXPOSED CREDENTIALS FOUND - RESPONSIBLE DISCLOSURE REQUIRED"
                    .yellow()
                    .bold()
            );
            println!("Next steps:");
            println!("  1. Report to repository owners");
            println!("  2. Document findings");
            println!("  3. DO NOT use credentials for unauthorized purposes");
            println!();
        }

        println!("{}", "=".repeat(70).bright_cyan());
    }

    /// Print error message
    pub fn print_error(message: &str) {
        eprintln!("{} {}", "❌".bright_red(), message.red());
    }

    /// Print warning message
    pub fn print_warning(message: &str) {
        println!("{} {}", "⚠️".bright_yellow(), message.yellow());
    }

    /// Print success message
    pub fn print_success(message: &str) {
        println!("{} {}", "✓".bright_green(), message.green());
    }

    /// Print info message
    pub fn print_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }
}
