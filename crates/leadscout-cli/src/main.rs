mod batch;
mod report;
mod score;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use leadscout_core::{AppConfig, CompetitorRecord};
use leadscout_places::GooglePlacesClient;
use tracing_subscriber::EnvFilter;

use crate::report::{resolve_and_score, CohortSettings};

#[derive(Debug, Parser)]
#[command(name = "leadscout")]
#[command(about = "Resolve businesses and score them against local competitors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve one business query or maps URL and score it
    Resolve {
        /// Business name with optional location, or a maps URL
        query: String,

        /// Category and location text for the competitor search
        /// (inferred from the query when omitted)
        #[arg(long)]
        cohort: Option<String>,

        /// Search competitors around the business's coordinates, using
        /// `--cohort` as the category
        #[arg(long)]
        nearby: bool,
    },
    /// Resolve and score every query in a YAML batch file
    Batch {
        /// Path to a file of the form `queries: [{ query, cohort? }]`
        file: PathBuf,
    },
    /// Score metrics offline, without any place lookup
    Score {
        #[arg(long)]
        rating: f64,

        #[arg(long)]
        reviews: u32,

        /// Competitor as `name:rating:reviews`, in rank order; repeatable
        #[arg(long = "competitor", value_parser = score::parse_competitor)]
        competitors: Vec<CompetitorRecord>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            query,
            cohort,
            nearby,
        } => {
            let (config, client) = connect()?;
            let settings = CohortSettings::from_config(&config);
            let report =
                resolve_and_score(&client, settings, &query, cohort.as_deref(), nearby).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Batch { file } => {
            let (config, client) = connect()?;
            let batch = leadscout_core::load_batch(&file, config.max_batch_queries)?;
            let settings = CohortSettings::from_config(&config);
            let outcomes =
                batch::run_batch(&client, settings, &batch.queries, config.max_concurrent_queries)
                    .await;
            println!("{}", serde_json::to_string_pretty(&outcomes)?);
        }
        Commands::Score {
            rating,
            reviews,
            competitors,
        } => {
            init_tracing("info")?;
            score::run_score(rating, reviews, &competitors)?;
        }
    }

    Ok(())
}

/// Loads configuration, starts logging, and builds the places client.
fn connect() -> anyhow::Result<(AppConfig, GooglePlacesClient)> {
    let config = leadscout_core::load_app_config()?;
    init_tracing(&config.log_level)?;
    tracing::debug!(env = %config.env, "configuration loaded");
    let client = GooglePlacesClient::from_config(&config)?;
    Ok((config, client))
}

/// Logs go to stderr so stdout carries only JSON.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
