// Main entry point for the lens-matcher CLI

use anyhow::{Context, Result};
use clap::Parser;
use lens_matcher::cli::{Cli, Command};
use lens_matcher::{cmd, Config, GithubSearchService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,lens_matcher=info,github_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    let service =
        GithubSearchService::from_config(&config).context("Failed to create GitHub client")?;

    match cli.command {
        Command::Search(args) => {
            cmd::search::run(service, &args).await?;
        }
        Command::Names(args) => {
            let mut rng = rand::thread_rng();
            cmd::names::run(&service, &args, &mut rng).await?;
        }
    }

    Ok(())
}
