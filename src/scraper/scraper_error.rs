// scraper_error.rs
use std::time::Duration;
use thiserror::Error;

/// Errors that end the pipeline for one listing, plus the infrastructure
/// failures that can cause them.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Page not accessible or property does not exist for {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("Failed to load page in browser: {0}")]
    Render(String),

    #[error("Failed to locate amenities element: {0}")]
    Reveal(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a bounded element lookup that did not produce an element.
///
/// `NotFound` means the page never matched; `Driver` means the channel to the
/// page broke while polling. The caller decides which of the two is fatal.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("'{query}' not found within {timeout:?}")]
    NotFound { query: String, timeout: Duration },

    #[error(transparent)]
    Driver(#[from] ScraperError),
}

/// Why a single primary field came back absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("no element matches '{0}'")]
    Missing(String),

    #[error("no number in '{0}'")]
    NoNumber(String),
}

/// The category/list scan failed; the whole amenities field is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmenityScanError {
    #[error("category header #{0} has no title")]
    UntitledCategory(usize),
}
