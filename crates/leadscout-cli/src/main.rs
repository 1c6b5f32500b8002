//! LeadScout command-line interface.

use anyhow::Context;
use clap::{Parser, Subcommand};
use leadscout_browser::BrowserEngine;
use leadscout_core::{AppConfig, ScrapeRequest, VendorId};
use leadscout_db::{leads, Database};
use leadscout_enrich::SiteFetcher;
use leadscout_scraper::ScrapeOrchestrator;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "leadscout")]
#[command(about = "Scrape business leads from rendered map search results")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scrape: render, extract, enrich, and persist leads
    Scrape {
        /// City to search in
        #[arg(long)]
        city: String,

        /// Business category to search for (e.g. "coffee shops")
        #[arg(long)]
        category: String,

        /// Vendor the resulting leads belong to (generated if omitted)
        #[arg(long)]
        vendor_id: Option<String>,

        /// Run the browser with a visible window
        #[arg(long)]
        headed: bool,
    },
    /// List stored leads for a vendor as JSON
    List {
        /// Vendor to list leads for
        #[arg(long)]
        vendor_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_with_env().context("failed to load configuration")?;

    match cli.command {
        Commands::Scrape {
            city,
            category,
            vendor_id,
            headed,
        } => run_scrape(config, city, category, vendor_id, headed).await,
        Commands::List { vendor_id } => list_leads(config, vendor_id).await,
    }
}

async fn run_scrape(
    mut config: AppConfig,
    city: String,
    category: String,
    vendor_id: Option<String>,
    headed: bool,
) -> anyhow::Result<()> {
    if headed {
        config.browser.headless = false;
    }

    let vendor_id = match vendor_id {
        Some(id) => VendorId::new(id).context("invalid vendor ID")?,
        None => {
            let generated = VendorId::generate();
            tracing::info!("No vendor ID supplied, generated {}", generated);
            generated
        }
    };
    let request = ScrapeRequest::new(city, category, vendor_id);

    let db = Database::new(&config.database.path)
        .await
        .context("failed to open lead database")?;
    db.run_migrations()
        .await
        .context("failed to run database migrations")?;

    let renderer = Arc::new(BrowserEngine::new().with_headless(config.browser.headless));
    let enricher = Arc::new(
        SiteFetcher::new(config.enrichment.fetch_timeout())
            .context("failed to build website fetcher")?,
    );
    let store = Arc::new(db);

    let orchestrator = ScrapeOrchestrator::new(renderer, enricher, store, config);
    let summary = orchestrator
        .run(&request)
        .await
        .context("scrape run failed")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("failed to encode summary")?
    );
    Ok(())
}

async fn list_leads(config: AppConfig, vendor_id: String) -> anyhow::Result<()> {
    let vendor_id = VendorId::new(vendor_id).context("invalid vendor ID")?;

    let db = Database::new(&config.database.path)
        .await
        .context("failed to open lead database")?;
    db.run_migrations()
        .await
        .context("failed to run database migrations")?;

    let stored = leads::list_by_vendor(db.pool(), vendor_id.as_str())
        .await
        .context("failed to list leads")?;

    let records: Vec<_> = stored.iter().map(|s| &s.lead).collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&records).context("failed to encode leads")?
    );
    tracing::info!("Listed {} leads for vendor {}", records.len(), vendor_id);
    Ok(())
}
