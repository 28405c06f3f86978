mod event_input;
mod fetch;
mod logging;
mod schedule;
mod transform;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use newsetl_storage::{ObjectStore, S3Config, S3ObjectStore};

#[derive(Debug, Parser)]
#[command(name = "newsetl")]
#[command(about = "Daily article search harvest and transform pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Harvest one day of search results into the raw archive
    Fetch {
        /// Scheduled event JSON file, or `-` for stdin
        #[arg(long, conflicts_with_all = ["time", "day"])]
        event: Option<PathBuf>,
        /// Event time as `YYYY-MM-DDTHH:MM:SSZ`; the day before is harvested
        #[arg(long, conflicts_with = "day")]
        time: Option<String>,
        /// Harvest this day directly
        #[arg(long)]
        day: Option<NaiveDate>,
    },
    /// Clean the raw objects named in a storage notification
    Transform {
        /// Storage notification JSON file, or `-` for stdin
        #[arg(long)]
        event: PathBuf,
    },
    /// Run the daily fetch and transform on the configured cron schedule
    Schedule,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Arc::new(newsetl_core::load_app_config()?);
    logging::init(&config)?;
    tracing::info!(env = %config.env, bucket = %config.s3_bucket, "configuration loaded");

    let store: Arc<dyn ObjectStore> = Arc::new(S3ObjectStore::connect(&s3_config(&config)).await);

    match cli.command {
        Commands::Fetch { event, time, day } => {
            let target = fetch::TargetDay::from_args(event, time, day);
            let outcome = fetch::run(&config, store.as_ref(), target).await?;
            println!("{}", serde_json::to_string(&outcome.invocation)?);
        }
        Commands::Transform { event } => {
            let notification = event_input::read_event(&event).await?;
            let outcome = transform::run(&config, store.as_ref(), &notification).await?;
            println!("{}", serde_json::to_string(&outcome)?);
        }
        Commands::Schedule => {
            let mut scheduler = schedule::build_scheduler(Arc::clone(&config), store).await?;
            tracing::info!(schedule = %config.fetch_schedule, "scheduler running");
            tokio::signal::ctrl_c().await?;
            tracing::info!("received shutdown signal, stopping scheduler");
            scheduler.shutdown().await?;
        }
    }

    Ok(())
}

fn s3_config(config: &newsetl_core::AppConfig) -> S3Config {
    let mut s3 = S3Config::default();
    if let Some(region) = &config.s3_region {
        s3 = s3.with_region(region);
    }
    if let Some(endpoint) = &config.s3_endpoint {
        s3 = s3.with_endpoint(endpoint);
    }
    s3
}
