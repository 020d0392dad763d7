// extractor.rs
use crate::config::AppConfig;
use crate::scraper::driver::PageDriver;
use crate::scraper::models::{Amenities, ExtractionOutcome, ListingRecord};
use crate::scraper::reachability::Reachability;
use crate::scraper::reveal::DynamicRevealController;
use crate::scraper::snapshot::{scan_amenities, CompiledSelectors, PrimaryFields};
use crate::scraper::{FieldError, ScraperError};
use scraper::Html;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs the full pipeline for one listing at a time:
/// reachability, render, reveal, primary fields, amenities.
///
/// The driver is borrowed, not owned, so one browser can serve a whole batch
/// and be released by whoever launched it.
pub struct ListingExtractor<'a, D: PageDriver, R: Reachability> {
    driver: &'a D,
    reachability: &'a R,
    reveal: DynamicRevealController,
    selectors: CompiledSelectors,
}

impl<'a, D: PageDriver, R: Reachability> ListingExtractor<'a, D, R> {
    pub fn new(driver: &'a D, reachability: &'a R, config: &AppConfig) -> Result<Self, ScraperError> {
        Ok(Self {
            driver,
            reachability,
            reveal: DynamicRevealController::new(&config.selectors, &config.timing),
            selectors: CompiledSelectors::compile(&config.selectors)?,
        })
    }

    pub fn extract(&self, identifier: &str) -> ExtractionOutcome {
        let start = Instant::now();
        info!(identifier, "Scraping listing");

        match self.try_extract(identifier) {
            Ok(record) => {
                info!(identifier, elapsed = ?start.elapsed(), "Listing extracted");
                ExtractionOutcome::Success(record)
            }
            Err(e) => {
                warn!(identifier, "Listing failed: {e}");
                ExtractionOutcome::Failure(e.to_string())
            }
        }
    }

    // Record-fatal failures propagate with `?`; everything after the reveal
    // step degrades to `None` instead.
    fn try_extract(&self, identifier: &str) -> Result<ListingRecord, ScraperError> {
        self.reachability.check(identifier)?;

        let initial = self.driver.render(identifier).map_err(|e| match e {
            ScraperError::Render(_) => e,
            other => ScraperError::Render(other.to_string()),
        })?;
        debug!(bytes = initial.len(), "initial render");

        let revealed = self.reveal.prepare(self.driver)?;
        debug!(
            consent = ?revealed.consent,
            trigger = %revealed.trigger.query(),
            settled = ?revealed.settled,
            "reveal prepared"
        );

        let fields = match self.driver.page_source() {
            Ok(html) => Some(PrimaryFields::read(&Html::parse_document(&html), &self.selectors)),
            Err(e) => {
                warn!("Failed to read page for primary fields: {e}");
                None
            }
        };

        let panel = self.reveal.expand(self.driver, &revealed);
        debug!(?panel, "amenities panel");

        let amenities = self.read_amenities();

        let mut record = ListingRecord::empty(identifier);
        if let Some(fields) = fields {
            record.name = field("property name", fields.name);
            record.property_type = field("property type", fields.property_type);
            record.bedroom_count = field("number of bedrooms", fields.bedroom_count);
            record.bathroom_count = field("number of bathrooms", fields.bathroom_count);
        }
        record.amenities = amenities;
        Ok(record)
    }

    fn read_amenities(&self) -> Option<Amenities> {
        let html = match self.driver.page_source() {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to extract amenities: {e}");
                return None;
            }
        };

        match scan_amenities(&Html::parse_document(&html), &self.selectors) {
            Ok(amenities) if amenities.is_empty() => None,
            Ok(amenities) => Some(amenities),
            Err(e) => {
                warn!("Failed to extract amenities: {e}");
                None
            }
        }
    }
}

fn field(label: &str, value: Result<String, FieldError>) -> Option<String> {
    value
        .map_err(|e| warn!("Failed to extract {label}: {e}"))
        .ok()
}
