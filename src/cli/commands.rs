use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "envscout")]
#[command(version, about = "Scans GitHub repositories for exposed .env files and leaked credentials", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan repositories for exposed credentials
    Scan {
        /// Config file (TOML); defaults are searched if omitted
        #[arg(short, long)]
        config: Option<String>,

        /// Repository to scan in owner/name form (repeatable)
        #[arg(short, long)]
        repo: Vec<String>,

        /// Repository search query to widen the target set
        #[arg(short, long)]
        query: Option<String>,

        /// Maximum repositories taken from search results (overrides config)
        #[arg(short, long)]
        max_repos: Option<usize>,

        /// GitHub token for authenticated requests (can also use GITHUB_TOKEN env var)
        #[arg(long)]
        github_token: Option<String>,

        /// Report output path (overrides config)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the detection patterns a scan would run with
    Patterns {
        /// Config file (TOML); defaults are searched if omitted
        #[arg(short, long)]
        config: Option<String>,
    },
}
