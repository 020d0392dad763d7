// reachability.rs
use crate::config::BrowserConfig;
use crate::scraper::ScraperError;
use reqwest::blocking::Client;
use std::time::Duration;

/// Cheap pre-check that a listing exists before the browser is pointed at it.
pub trait Reachability {
    /// `Err(ScraperError::Unreachable)` when the resource cannot be fetched.
    fn check(&self, url: &str) -> Result<(), ScraperError>;
}

/// Plain HTTP GET; any transport error or non-2xx status counts as unreachable.
pub struct HttpReachability {
    client: Client,
}

impl HttpReachability {
    pub fn new(config: &BrowserConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Reachability for HttpReachability {
    fn check(&self, url: &str) -> Result<(), ScraperError> {
        self.client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .map(|_| ())
            .map_err(|e| ScraperError::Unreachable {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }
}
