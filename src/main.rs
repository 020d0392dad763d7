use crate::batch::BatchRunner;
use crate::config::{AppConfig, CONFIG_FILE};
use crate::scraper::{ChromeDriver, HttpReachability, ListingExtractor, ScraperError};
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod batch;
mod config;
mod report;
mod scraper;

#[cfg(test)]
mod tests;

fn init_tracing() {
    // Reports go to stdout; diagnostics stay on stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn run() -> Result<(), ScraperError> {
    // 1️⃣ Static configuration
    let config = AppConfig::load(CONFIG_FILE)?;
    info!(targets = config.targets.len(), "Configuration loaded");

    // 2️⃣ Collaborators
    let reachability = HttpReachability::new(&config.browser)?;
    let driver = ChromeDriver::launch(&config.browser)?;

    // 3️⃣ Run the batch; the browser is released once every listing is done
    {
        let extractor = ListingExtractor::new(&driver, &reachability, &config)?;
        let runner = BatchRunner::new(extractor);
        let stdout = io::stdout();
        let mut out = stdout.lock();
        runner.run(&config.targets, &mut out)?;
    }
    driver.close();

    Ok(())
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}
