use clap::Parser;
use colored::Colorize;
use envscout::cli::{Cli, Commands, OutputFormatter};
use envscout::core::{Config, EnvScoutError, ScanReport};
use envscout::providers::GitHubClient;
use envscout::report::TextReporter;
use envscout::rules::{DetectionRule, RuleSet};
use envscout::scanner::Scanner;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    // Load .env file if it exists
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    // Print banner
    OutputFormatter::print_banner();

    // Execute command
    if let Err(e) = execute_command(cli.command).await {
        OutputFormatter::print_error(&format!("Error: {}", e));
        std::process::exit(1);
    }
}

async fn execute_command(command: Commands) -> envscout::Result<()> {
    match command {
        Commands::Scan {
            config,
            repo,
            query,
            max_repos,
            github_token,
            output,
        } => {
            scan_command(config, repo, query, max_repos, github_token, output).await?;
        }
        Commands::Patterns { config } => {
            patterns_command(config)?;
        }
    }

    Ok(())
}

fn load_config(explicit_path: Option<&str>) -> envscout::Result<Config> {
    // An explicitly requested config file must load; silently falling back
    // to defaults would hide a typo'd path.
    if let Some(path) = explicit_path {
        let contents = fs::read_to_string(path)?;
        return toml::from_str(&contents)
            .map_err(|e| EnvScoutError::Config(format!("failed to parse {}: {}", path, e)));
    }

    let config_paths = vec!["config/default.toml", ".envscout.toml"];

    for path in config_paths {
        if Path::new(path).exists() {
            match fs::read_to_string(path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => {
                        info!("Loaded config from {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        warn!("Failed to parse config from {}: {}", path, e);
                    }
                },
                Err(e) => {
                    warn!("Failed to read config from {}: {}", path, e);
                }
            }
        }
    }

    warn!("No config file found, using defaults");
    Ok(Config::default())
}

async fn scan_command(
    config_path: Option<String>,
    repos: Vec<String>,
    query: Option<String>,
    max_repos: Option<usize>,
    github_token: Option<String>,
    output: Option<String>,
) -> envscout::Result<()> {
    OutputFormatter::print_ethical_warning();

    let mut config = load_config(config_path.as_deref())?;

    // CLI arguments layer on top of the config file
    config.scan.repos.extend(repos);
    if query.is_some() {
        config.scan.search_query = query;
    }
    if let Some(m) = max_repos {
        config.scan.max_repos = m;
    }
    if let Some(path) = output {
        config.output.path = path;
    }

    // Token precedence: CLI flag, then environment, then config file
    let token = github_token
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .or_else(|| config.github.token.clone());
    if token.is_none() {
        OutputFormatter::print_warning(
            "No GitHub token configured; anonymous rate limits are very low",
        );
    }

    let rules = RuleSet::compile(&config.scan.patterns);
    let dropped = config.scan.patterns.len() - rules.len();
    if dropped > 0 {
        OutputFormatter::print_warning(&format!(
            "{} invalid detection pattern(s) skipped",
            dropped
        ));
    }
    let rule_count = rules.len();

    let provider = GitHubClient::with_config(
        token,
        config.github.base_url.clone(),
        config.scan.target_filename.clone(),
        config.github.rate_limit_delay_ms,
    );

    let scanner = Scanner::new(Box::new(provider), rules, &config.scan)?;

    let resolved = scanner.resolve_repositories().await;
    if resolved.is_empty() {
        OutputFormatter::print_warning("No repositories to scan (empty list and no search hits)");
    }
    OutputFormatter::print_scan_start(resolved.len(), rule_count);

    let outcome = scanner.scan(&resolved).await;

    for finding in &outcome.findings {
        OutputFormatter::print_finding(finding);
    }

    // The report is written even when empty; a failed write is the one
    // run-level failure.
    let report = ScanReport::new(outcome.findings);
    TextReporter::write(&report, Path::new(&config.output.path))?;

    OutputFormatter::print_summary(&outcome.stats);
    OutputFormatter::print_success(&format!("Results saved to {}", config.output.path));

    Ok(())
}

fn patterns_command(config_path: Option<String>) -> envscout::Result<()> {
    let config = load_config(config_path.as_deref())?;

    println!("{}", "Configured detection patterns:".bright_cyan().bold());
    for pattern in &config.scan.patterns {
        match DetectionRule::compile(pattern) {
            Ok(rule) => println!("  {} {}", "✓".green(), rule.label().bright_white()),
            Err(e) => println!("  {} {} ({})", "✗".red(), pattern.bright_white(), e),
        }
    }
    println!();
    println!("Target filename: {}", config.scan.target_filename.bright_cyan());

    Ok(())
}
