// src/config.rs
//
// Static run configuration. Every value has a built-in default; an optional
// `listing_scraper.toml` in the working directory can override any of them.

use crate::scraper::wait::{FixedDelay, SettleStrategy, StableMarkup, DEFAULT_POLL_INTERVAL};
use crate::scraper::ScraperError;
use scraper::Selector;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const CONFIG_FILE: &str = "listing_scraper";

pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listing URLs, processed in order.
    pub targets: Vec<String>,
    pub browser: BrowserConfig,
    pub selectors: SelectorConfig,
    pub timing: TimingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            targets: vec![
                "https://www.airbnb.co.uk/rooms/33571268".to_string(),
                "https://www.airbnb.co.uk/rooms/20669368".to_string(),
                "https://www.airbnb.co.uk/rooms/50633275".to_string(),
            ],
            browser: BrowserConfig::default(),
            selectors: SelectorConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads defaults overlaid with `<name>.toml` (or any other format the
    /// `config` crate recognises) when such a file exists.
    pub fn load(name: &str) -> Result<Self, ScraperError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(name).required(false))
            .build()
            .map_err(|e| ScraperError::Config(e.to_string()))?;

        let app: AppConfig = settings
            .try_deserialize()
            .map_err(|e| ScraperError::Config(e.to_string()))?;

        app.validate()?;
        Ok(app)
    }

    pub fn validate(&self) -> Result<(), ScraperError> {
        for target in &self.targets {
            let url = Url::parse(target)
                .map_err(|e| ScraperError::Config(format!("invalid target '{target}': {e}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ScraperError::Config(format!(
                    "target '{target}' is not an http(s) URL"
                )));
            }
        }

        for selector in self.selectors.all() {
            Selector::parse(selector).map_err(|e| ScraperError::Selector {
                selector: selector.to_string(),
                reason: e.to_string(),
            })?;
        }

        if self.selectors.consent_text.trim().is_empty() {
            return Err(ScraperError::Config("consent_text is empty".into()));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub headless: bool,
    /// Passes `--blink-settings=imagesEnabled=false` to speed up loading.
    pub disable_images: bool,
    pub user_agent: String,
    /// Download Chromium when no local Chrome is installed.
    pub fetch_browser: bool,
    /// Timeout for the reachability request.
    pub request_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            disable_images: true,
            user_agent: USER_AGENT.to_string(),
            fetch_browser: true,
            request_timeout_secs: 30,
        }
    }
}

/// Structural selectors for one markup revision of the listing page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Text contained in the cookie consent button.
    pub consent_text: String,
    pub amenities_trigger: String,
    pub name: String,
    pub property_type: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub category_header: String,
    pub category_title: String,
    pub amenity_list: String,
    pub amenity_item: String,
    pub unavailable_marker: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            consent_text: "Accept".into(),
            amenities_trigger: "div.b9672i7 button.l1ovpqvx".into(),
            name: "h1.hpipapi".into(),
            property_type: "div.parent_class,h2.hpipapi".into(),
            bedrooms: "ol > li.l7n4lsf:nth-of-type(2)".into(),
            bathrooms: "ol > li.l7n4lsf:nth-of-type(4)".into(),
            category_header: "div._14li9j3g".into(),
            category_title: "h2".into(),
            amenity_list: "ul._2f5j8p".into(),
            amenity_item: "li".into(),
            unavailable_marker: "del".into(),
        }
    }
}

impl SelectorConfig {
    /// Every CSS selector, for validation.
    fn all(&self) -> [&str; 10] {
        [
            &self.amenities_trigger,
            &self.name,
            &self.property_type,
            &self.bedrooms,
            &self.bathrooms,
            &self.category_header,
            &self.category_title,
            &self.amenity_list,
            &self.amenity_item,
            &self.unavailable_marker,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettleMode {
    /// Sleep for the full settle duration.
    Fixed,
    /// Stop waiting once the markup stops changing, bounded by the settle duration.
    Stable,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub consent_wait_ms: u64,
    pub trigger_wait_ms: u64,
    pub poll_interval_ms: u64,
    pub settle_mode: SettleMode,
    /// Settle bound before the primary fields are read.
    pub fields_settle_ms: u64,
    /// Settle bound after the amenities panel is opened.
    pub panel_settle_ms: u64,
    pub stability_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            consent_wait_ms: 6_000,
            trigger_wait_ms: 6_000,
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            settle_mode: SettleMode::Stable,
            fields_settle_ms: 5_000,
            panel_settle_ms: 4_000,
            stability_interval_ms: 500,
        }
    }
}

impl TimingConfig {
    pub fn consent_wait(&self) -> Duration {
        Duration::from_millis(self.consent_wait_ms)
    }

    pub fn trigger_wait(&self) -> Duration {
        Duration::from_millis(self.trigger_wait_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn fields_settle(&self) -> Box<dyn SettleStrategy> {
        self.settle_strategy(self.fields_settle_ms)
    }

    pub fn panel_settle(&self) -> Box<dyn SettleStrategy> {
        self.settle_strategy(self.panel_settle_ms)
    }

    fn settle_strategy(&self, bound_ms: u64) -> Box<dyn SettleStrategy> {
        let bound = Duration::from_millis(bound_ms);
        match self.settle_mode {
            SettleMode::Fixed => Box::new(FixedDelay(bound)),
            SettleMode::Stable => Box::new(StableMarkup {
                interval: Duration::from_millis(self.stability_interval_ms),
                timeout: bound,
            }),
        }
    }
}
