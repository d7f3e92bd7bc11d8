use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use epey_scraper::{Category, Orchestrator, PageFetcher, RunContext, ScraperConfig, menu};

/// Scrape an epey.com product category into a CSV file.
///
/// Run without arguments to pick the category from a menu.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file (defaults to ./epey-scraper.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Category path segment, skips the menu (e.g. `laptop`)
    #[arg(long)]
    category: Option<String>,

    /// Concurrent page fetches
    #[arg(long)]
    workers: Option<usize>,

    /// Directory for the exported CSV
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();

    let mut config = ScraperConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    config.validate().context("Invalid configuration")?;

    let category = match cli.category {
        Some(slug) => Category::new(slug)?,
        None => menu::select_category(&config).context("No category selected")?,
    };
    let context = RunContext::new(category);

    log::info!("🚀 Scraping {} with {} workers", context.category, config.workers);

    let fetcher = PageFetcher::new(&config).context("Failed to create HTTP client")?;
    let orchestrator = Orchestrator::new(fetcher, config.workers).with_progress(config.show_progress);

    let path = orchestrator
        .run_and_export(&context, &config.output_dir)
        .await
        .with_context(|| format!("Failed to scrape {}", context.category))?;
    println!("{}", path.display());

    Ok(())
}
