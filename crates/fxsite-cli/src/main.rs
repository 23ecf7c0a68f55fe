mod daily;
mod headlines;
mod pages;
mod reviews;
mod stamp;
mod weekly;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fxsite")]
#[command(about = "Content generators for the forex broker sites")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Refresh the RSS headline lists on both skins
    Headlines,
    /// Write today's daily brief pages and teasers
    Daily {
        /// Replace today's teaser card instead of keeping the first one
        #[arg(long)]
        replace: bool,
    },
    /// Write this week's brief pages, teasers, and weekly index
    Weekly,
    /// Fill in publish datetimes on marked time elements
    Stamp,
    /// Licensed review exports
    Reviews {
        #[command(subcommand)]
        command: ReviewsCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ReviewsCommands {
    /// Normalize exports into the consolidated reviews file
    Normalize,
    /// Rebuild review regions on the site1 broker pages and homepage
    Rebuild,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = fxsite_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(env = %config.env, site_root = %config.site_root.display(), "config loaded");

    let now = Utc::now();
    match cli.command {
        Commands::Headlines => headlines::run_headlines(&config, now).await,
        Commands::Daily { replace } => daily::run_daily(&config, now, replace).await,
        Commands::Weekly => weekly::run_weekly(&config, now),
        Commands::Stamp => stamp::run_stamp(&config, now),
        Commands::Reviews { command } => match command {
            ReviewsCommands::Normalize => reviews::run_normalize(&config, now),
            ReviewsCommands::Rebuild => reviews::run_rebuild(&config),
        },
    }
}

#[cfg(test)]
mod tests;
