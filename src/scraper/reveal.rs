// reveal.rs
use crate::config::{SelectorConfig, TimingConfig};
use crate::scraper::driver::{PageDriver, Query};
use crate::scraper::locator::{DomLocator, Located};
use crate::scraper::wait::{SettleStrategy, Settled};
use crate::scraper::{LocateError, ScraperError};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentStatus {
    Dismissed,
    NotShown,
    ClickFailed,
}

/// Page state after the mandatory part of the reveal protocol.
#[derive(Debug)]
pub struct Revealed {
    pub consent: ConsentStatus,
    pub trigger: Located,
    pub settled: Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStatus {
    Opened(Settled),
    ClickFailed(Settled),
}

/// Brings the page into the state needed for amenity extraction: consent
/// overlay dismissed, amenities panel open and its content settled.
#[derive(Debug)]
pub struct DynamicRevealController {
    locator: DomLocator,
    consent: Query,
    consent_wait: Duration,
    trigger: Query,
    trigger_wait: Duration,
    fields_settle: Box<dyn SettleStrategy>,
    panel_settle: Box<dyn SettleStrategy>,
}

impl DynamicRevealController {
    pub fn new(selectors: &SelectorConfig, timing: &TimingConfig) -> Self {
        Self {
            locator: DomLocator::new(timing.poll_interval()),
            consent: Query::button_text(selectors.consent_text.clone()),
            consent_wait: timing.consent_wait(),
            trigger: Query::css(selectors.amenities_trigger.clone()),
            trigger_wait: timing.trigger_wait(),
            fields_settle: timing.fields_settle(),
            panel_settle: timing.panel_settle(),
        }
    }

    /// Dismisses the consent overlay if it shows up, finds the amenities
    /// trigger and waits for the page to settle.
    ///
    /// Only a missing trigger is an error.
    pub fn prepare(&self, driver: &dyn PageDriver) -> Result<Revealed, ScraperError> {
        let consent = self.dismiss_consent(driver);

        let trigger = self
            .locator
            .locate(driver, &self.trigger, self.trigger_wait)
            .map_err(|e| ScraperError::Reveal(e.to_string()))?;

        debug!(waited = ?trigger.waited(), "amenities trigger located");

        let settled = self.fields_settle.settle(driver);
        debug!(?settled, "page settled before reading fields");

        Ok(Revealed {
            consent,
            trigger,
            settled,
        })
    }

    /// Opens the amenities panel and waits for its content. A failed click is
    /// logged; the amenities will simply be missing.
    pub fn expand(&self, driver: &dyn PageDriver, revealed: &Revealed) -> PanelStatus {
        let clicked = revealed.trigger.activate(driver);
        if let Err(e) = &clicked {
            warn!("Failed to click on the amenities element: {e}");
        }

        let settled = self.panel_settle.settle(driver);
        debug!(?settled, "amenities panel settled");

        match clicked {
            Ok(()) => PanelStatus::Opened(settled),
            Err(_) => PanelStatus::ClickFailed(settled),
        }
    }

    fn dismiss_consent(&self, driver: &dyn PageDriver) -> ConsentStatus {
        match self.locator.locate(driver, &self.consent, self.consent_wait) {
            Ok(button) => match button.activate(driver) {
                Ok(()) => {
                    info!("Cookie consent dismissed");
                    ConsentStatus::Dismissed
                }
                Err(e) => {
                    warn!("Failed to click cookie consent button: {e}");
                    ConsentStatus::ClickFailed
                }
            },
            Err(LocateError::NotFound { .. }) => {
                info!("Cookie consent button not found or already handled");
                ConsentStatus::NotShown
            }
            Err(LocateError::Driver(e)) => {
                warn!("Cookie consent lookup failed: {e}");
                ConsentStatus::NotShown
            }
        }
    }
}
