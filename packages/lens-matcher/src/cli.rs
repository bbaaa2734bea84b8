use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::labels::LabelType;

#[derive(Parser, Debug)]
#[command(name = "lens-matcher")]
#[command(about = "Find Kubernetes app.kubernetes.io label values across GitHub code", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search code for app.kubernetes.io/name and app.kubernetes.io/component labels
    Search(SearchArgs),

    /// Generate application names from popular repositories
    Names(NamesArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Programming language to filter by (e.g. yaml)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Specific repository to search (format: owner/repo)
    #[arg(short, long)]
    pub repo: Option<String>,

    /// Maximum number of results (only one page of at most 100 is fetched)
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_results: u32,

    /// Labels to search for (repeatable; defaults to name and component)
    #[arg(long = "label", value_enum)]
    pub labels: Vec<LabelType>,

    /// JSON output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Tab-separated output file of every extracted label value
    #[arg(short, long)]
    pub tsv: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct NamesArgs {
    /// Topic or technology to focus on (e.g. "web", "machine learning")
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Programming language to filter by
    #[arg(short, long)]
    pub language: Option<String>,

    /// Minimum number of stars for repositories
    #[arg(long, default_value_t = 10)]
    pub min_stars: u32,

    /// Number of names to generate
    #[arg(short, long, default_value_t = 10)]
    pub count: usize,

    /// Pages of repositories to fetch (100 per page)
    #[arg(long, default_value_t = 3)]
    pub pages: u32,

    /// JSON output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML file overriding the prefix/suffix word lists
    #[arg(long)]
    pub config: Option<PathBuf>,
}
