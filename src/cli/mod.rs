//! CLI implementation using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Muse - project idea recommendations from your own dataset.
#[derive(Parser)]
#[command(name = "muse")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the project dataset (CSV)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Recommend projects matching free-text interests, skills, or goals
    #[command(alias = "rec")]
    Recommend(RecommendArgs),

    /// Find projects similar to an existing record
    #[command(alias = "sim")]
    Similar(SimilarArgs),

    /// Show dataset and vocabulary statistics
    Stats,

    /// Generate fresh ideas via the remote generation API
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Write a default muse.toml to the current directory
    Init,
}

#[derive(Args)]
pub struct RecommendArgs {
    /// Free-text interests, skills, or goals
    pub query: String,

    /// Maximum number of results (default from config)
    #[arg(short = 'n', long)]
    pub top: Option<usize>,

    /// Only consider projects in this domain
    #[arg(long)]
    pub domain: Option<String>,

    /// Only consider projects at this difficulty
    #[arg(long)]
    pub difficulty: Option<String>,
}

#[derive(Args)]
pub struct SimilarArgs {
    /// Record id to seed from
    pub id: String,

    /// Maximum number of results (default from config)
    #[arg(short = 'n', long)]
    pub top: Option<usize>,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Prompt describing the kind of ideas wanted
    pub prompt: String,

    /// Number of ideas to request (default from config)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
}

/// Output format for the CLI.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_recommend_parses() {
        let cli = Cli::parse_from(["muse", "-d", "ideas.csv", "recommend", "rust cli", "-n", "3"]);
        match cli.command {
            Command::Recommend(args) => {
                assert_eq!(args.query, "rust cli");
                assert_eq!(args.top, Some(3));
                assert!(args.domain.is_none());
            }
            _ => panic!("expected recommend"),
        }
        assert_eq!(cli.data, Some(PathBuf::from("ideas.csv")));
    }

    #[test]
    fn test_similar_alias() {
        let cli = Cli::parse_from(["muse", "sim", "p42"]);
        match cli.command {
            Command::Similar(args) => assert_eq!(args.id, "p42"),
            _ => panic!("expected similar"),
        }
    }

    #[test]
    fn test_format_flag() {
        let cli = Cli::parse_from(["muse", "-f", "csv", "stats"]);
        assert!(matches!(cli.format, OutputFormat::Csv));
    }
}
