// driver.rs
use crate::scraper::ScraperError;
use std::fmt;

/// How an element is looked up on the live page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    /// Structural CSS selector, e.g. `div.b9672i7 button.l1ovpqvx`.
    Css(String),
    /// A `<button>` whose text contains the given string.
    ButtonText(String),
}

impl Query {
    pub fn css(selector: impl Into<String>) -> Self {
        Query::Css(selector.into())
    }

    pub fn button_text(text: impl Into<String>) -> Self {
        Query::ButtonText(text.into())
    }

    /// XPath equivalent for text matches; CSS queries have none.
    pub fn to_xpath(&self) -> Option<String> {
        match self {
            Query::Css(_) => None,
            Query::ButtonText(text) => Some(format!(
                "//button[contains(text(), {})]",
                xpath_literal(text)
            )),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Css(selector) => write!(f, "{selector}"),
            Query::ButtonText(text) => write!(f, "button containing \"{text}\""),
        }
    }
}

// XPath 1.0 has no escape sequences, so mixed quotes need concat().
fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        return format!("'{text}'");
    }
    if !text.contains('"') {
        return format!("\"{text}\"");
    }
    let parts: Vec<String> = text.split('\'').map(|p| format!("'{p}'")).collect();
    format!("concat({})", parts.join(", \"'\", "))
}

/// The live, interactive rendering handle.
///
/// One driver is shared by every listing in a run and is never used
/// concurrently.
pub trait PageDriver {
    /// Loads `url` and returns the markup as soon as navigation completes.
    fn render(&self, url: &str) -> Result<String, ScraperError>;

    /// Current markup of the page, including script-generated content.
    fn page_source(&self) -> Result<String, ScraperError>;

    /// Whether `query` matches anything right now. Does not wait.
    fn is_present(&self, query: &Query) -> Result<bool, ScraperError>;

    /// Clicks the first element matching `query`.
    fn click(&self, query: &Query) -> Result<(), ScraperError>;
}
