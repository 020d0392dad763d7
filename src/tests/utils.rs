// src/tests/utils.rs
//
// Stub collaborators: a scripted page driver and a reachability check,
// both recording how they were called.

use crate::config::{AppConfig, SettleMode, TimingConfig};
use crate::scraper::driver::{PageDriver, Query};
use crate::scraper::reachability::Reachability;
use crate::scraper::ScraperError;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

/// Default config with every wait collapsed to a single probe.
pub fn test_config() -> AppConfig {
    AppConfig {
        timing: TimingConfig {
            consent_wait_ms: 0,
            trigger_wait_ms: 0,
            poll_interval_ms: 1,
            settle_mode: SettleMode::Fixed,
            fields_settle_ms: 0,
            panel_settle_ms: 0,
            stability_interval_ms: 1,
        },
        ..AppConfig::default()
    }
}

pub fn trigger() -> Query {
    Query::css(AppConfig::default().selectors.amenities_trigger)
}

pub fn consent() -> Query {
    Query::button_text("Accept")
}

pub fn page(body: &str) -> String {
    format!("<html><head><title>Listing</title></head><body>{body}</body></html>")
}

pub const PRIMARY_FIELDS: &str = r#"
    <h1 class="hpipapi">Seaside Cottage</h1>
    <h2 class="hpipapi">Entire cottage in Cornwall</h2>
    <ol>
      <li class="l7n4lsf">4 guests</li>
      <li class="l7n4lsf">2 bedrooms</li>
      <li class="l7n4lsf">3 beds</li>
      <li class="l7n4lsf">1 bathroom</li>
    </ol>
    <div class="b9672i7"><button class="l1ovpqvx">Show all 42 amenities</button></div>
"#;

pub const KITCHEN_PANEL: &str = r#"
    <div class="_14li9j3g"><h2>Kitchen</h2></div>
    <ul class="_2f5j8p">
      <li>WifiIncluded</li>
      <li><del>Unavailable: Pool</del></li>
    </ul>
"#;

/// Plays a listing page: `before` until the amenities trigger is clicked,
/// `after` from then on. Rendering a new URL closes the panel again.
pub struct StubDriver {
    before: String,
    after: String,
    present: HashSet<Query>,
    present_after_polls: usize,
    failing_clicks: HashSet<Query>,
    fail_render: bool,
    fail_presence: bool,
    fail_source: bool,
    polls: Cell<usize>,
    opened: Cell<bool>,
    calls: RefCell<Vec<String>>,
}

impl StubDriver {
    /// A page where the amenities trigger exists and no consent overlay shows.
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
            present: HashSet::from([trigger()]),
            present_after_polls: 0,
            failing_clicks: HashSet::new(),
            fail_render: false,
            fail_presence: false,
            fail_source: false,
            polls: Cell::new(0),
            opened: Cell::new(false),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_consent(mut self) -> Self {
        self.present.insert(consent());
        self
    }

    pub fn without_trigger(mut self) -> Self {
        self.present.remove(&trigger());
        self
    }

    /// Elements only show up from the n-th presence check on.
    pub fn appearing_after(mut self, polls: usize) -> Self {
        self.present_after_polls = polls;
        self
    }

    pub fn failing_click(mut self, query: Query) -> Self {
        self.failing_clicks.insert(query);
        self
    }

    pub fn failing_render(mut self) -> Self {
        self.fail_render = true;
        self
    }

    pub fn failing_presence(mut self) -> Self {
        self.fail_presence = true;
        self
    }

    pub fn failing_source(mut self) -> Self {
        self.fail_source = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with("click:"))
            .collect()
    }

    pub fn renders(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("render:").map(str::to_string))
            .collect()
    }

    fn log(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl PageDriver for StubDriver {
    fn render(&self, url: &str) -> Result<String, ScraperError> {
        self.log(format!("render:{url}"));
        if self.fail_render {
            return Err(ScraperError::Browser("tab crashed".into()));
        }
        self.opened.set(false);
        Ok(self.before.clone())
    }

    fn page_source(&self) -> Result<String, ScraperError> {
        self.log("source".into());
        if self.fail_source {
            return Err(ScraperError::Browser("target closed".into()));
        }
        Ok(if self.opened.get() {
            self.after.clone()
        } else {
            self.before.clone()
        })
    }

    fn is_present(&self, query: &Query) -> Result<bool, ScraperError> {
        self.log(format!("present:{query}"));
        if self.fail_presence {
            return Err(ScraperError::Browser("connection reset".into()));
        }
        let polls = self.polls.get() + 1;
        self.polls.set(polls);
        Ok(polls > self.present_after_polls && self.present.contains(query))
    }

    fn click(&self, query: &Query) -> Result<(), ScraperError> {
        self.log(format!("click:{query}"));
        if self.failing_clicks.contains(query) {
            return Err(ScraperError::Browser("element is not clickable".into()));
        }
        if *query == trigger() {
            self.opened.set(true);
        }
        Ok(())
    }
}

/// Markup that keeps changing for `changes` samples, then stays put.
pub struct StreamingPage {
    pub changes: usize,
    pub samples: Cell<usize>,
}

impl StreamingPage {
    pub fn new(changes: usize) -> Self {
        Self {
            changes,
            samples: Cell::new(0),
        }
    }
}

impl PageDriver for StreamingPage {
    fn render(&self, _url: &str) -> Result<String, ScraperError> {
        self.page_source()
    }

    fn page_source(&self) -> Result<String, ScraperError> {
        let n = self.samples.get();
        self.samples.set(n + 1);
        Ok(page(&format!("<p>{}</p>", n.min(self.changes))))
    }

    fn is_present(&self, _query: &Query) -> Result<bool, ScraperError> {
        Ok(true)
    }

    fn click(&self, _query: &Query) -> Result<(), ScraperError> {
        Ok(())
    }
}

/// Every URL is reachable except the listed ones.
#[derive(Default)]
pub struct StubReachability {
    unreachable: HashSet<String>,
    checked: RefCell<Vec<String>>,
}

impl StubReachability {
    pub fn all_reachable() -> Self {
        Self::default()
    }

    pub fn except(urls: &[&str]) -> Self {
        Self {
            unreachable: urls.iter().map(|u| u.to_string()).collect(),
            checked: RefCell::new(Vec::new()),
        }
    }

    pub fn checked(&self) -> Vec<String> {
        self.checked.borrow().clone()
    }
}

impl Reachability for StubReachability {
    fn check(&self, url: &str) -> Result<(), ScraperError> {
        self.checked.borrow_mut().push(url.to_string());
        if self.unreachable.contains(url) {
            return Err(ScraperError::Unreachable {
                url: url.to_string(),
                reason: "404 Not Found".into(),
            });
        }
        Ok(())
    }
}
