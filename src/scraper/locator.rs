// locator.rs
use crate::scraper::driver::{PageDriver, Query};
use crate::scraper::wait::{poll_until, WaitConfig, WaitStatus};
use crate::scraper::{LocateError, ScraperError};
use std::time::Duration;
use tracing::debug;

/// An element that was present on the page when the lookup finished.
///
/// The driver works in terms of queries rather than node handles, so the
/// element is re-resolved on activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    query: Query,
    waited: Duration,
}

impl Located {
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// How long the lookup waited before the element appeared.
    pub fn waited(&self) -> Duration {
        self.waited
    }

    pub fn activate(&self, driver: &dyn PageDriver) -> Result<(), ScraperError> {
        driver.click(&self.query)
    }
}

/// Finds elements on the live page within a bounded wait.
#[derive(Debug, Clone, Copy)]
pub struct DomLocator {
    poll_interval: Duration,
}

impl DomLocator {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    /// Polls until `query` matches or `timeout` elapses. A driver failure
    /// aborts the wait and is reported as [`LocateError::Driver`].
    pub fn locate(
        &self,
        driver: &dyn PageDriver,
        query: &Query,
        timeout: Duration,
    ) -> Result<Located, LocateError> {
        let config = WaitConfig::new(timeout, self.poll_interval);

        match poll_until(config, || driver.is_present(query))? {
            WaitStatus::Satisfied(waited) => {
                debug!(%query, ?waited, "element located");
                Ok(Located {
                    query: query.clone(),
                    waited,
                })
            }
            WaitStatus::TimedOut(_) => Err(LocateError::NotFound {
                query: query.to_string(),
                timeout,
            }),
        }
    }
}
