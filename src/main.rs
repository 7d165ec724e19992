use std::path::PathBuf;
use std::sync::Arc;
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use openrice_etl::config::{Settings, DEFAULT_CONFIG_PATH};
use openrice_etl::storage::write_output;
use openrice_etl::utils::timestamp_slug;
use openrice_etl::{
    AttributeList, ClientPool, FetchOptions, Fetcher, Lookup, RestaurantId, RestaurantScraper,
};

/// Scrape restaurant metadata from OpenRice by restaurant id.
#[derive(Parser, Debug)]
#[command(name = "openrice-etl", version)]
struct Cli {
    /// Restaurant ids; more than one runs a batch.
    #[arg(required = true)]
    ids: Vec<String>,

    /// Keep the full search record instead of the configured attributes.
    #[arg(long)]
    full: bool,

    /// Also write the results as a Parquet table.
    #[arg(long, conflicts_with = "full")]
    table: bool,

    /// Configuration file, without extension.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Attribute list file; overrides the configured one.
    #[arg(long)]
    attributes: Option<PathBuf>,

    /// Output directory; overrides the configured one.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_path(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config))?;

    let attributes_path = cli.attributes
        .clone()
        .unwrap_or_else(|| settings.scraper.attributes_file.clone());
    let attributes = AttributeList::from_file(&attributes_path)
        .with_context(|| format!("reading attribute list {}", attributes_path.display()))?;
    let output_dir = cli.output_dir
        .clone()
        .unwrap_or_else(|| settings.output.dir.clone());

    let fetcher: Arc<dyn Fetcher> = Arc::new(ClientPool::new(&settings.api)?);
    let scraper = RestaurantScraper::from_settings(&settings, fetcher, attributes)?;

    let slug = timestamp_slug(Utc::now());
    let start_time = std::time::Instant::now();

    info!(
        restaurants = cli.ids.len(),
        attributes = scraper.attributes().len(),
        full = cli.full,
        table = cli.table,
        "Starting extraction"
    );

    let lookup = Lookup::from_ids(cli.ids.into_iter().map(RestaurantId::from).collect());
    let options = FetchOptions {
        full: cli.full,
        as_table: cli.table,
    };

    let output = scraper.run(lookup, options).await?;
    write_output(&output, &output_dir, &slug).await?;

    info!(
        elapsed_secs = start_time.elapsed().as_secs_f64(),
        "Extraction complete"
    );

    Ok(())
}
