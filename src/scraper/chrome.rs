// chrome.rs
use crate::config::BrowserConfig;
use crate::scraper::driver::{PageDriver, Query};
use crate::scraper::ScraperError;
use headless_chrome::browser::{default_executable, FetcherOptions};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::fmt;
use std::sync::Arc;
use tracing::info;

const DISABLE_IMAGES: &str = "--blink-settings=imagesEnabled=false";

/// A Chrome process with a single tab, shared by every listing in a run.
///
/// The browser is shut down when this value is dropped.
pub struct ChromeDriver {
    _browser: Browser,
    tab: Arc<Tab>,
}

fn browser_err<E: fmt::Display>(context: &str) -> impl Fn(E) -> ScraperError + '_ {
    move |e| ScraperError::Browser(format!("{context}: {e}"))
}

/// Prefers an installed Chrome; without one, Chromium is downloaded on launch
/// unless `fetch_browser` is off.
fn launch_options(config: &BrowserConfig) -> Result<LaunchOptions<'static>, ScraperError> {
    let mut args: Vec<&'static OsStr> = Vec::new();
    if config.disable_images {
        args.push(OsStr::new(DISABLE_IMAGES));
    }

    LaunchOptions::default_builder()
        .headless(config.headless)
        .args(args)
        .path(default_executable().ok())
        .fetcher_options(FetcherOptions::default().with_allow_download(config.fetch_browser))
        .build()
        .map_err(|e| ScraperError::Browser(format!("invalid launch options: {e}")))
}

impl ChromeDriver {
    pub fn launch(config: &BrowserConfig) -> Result<Self, ScraperError> {
        let options = launch_options(config)?;
        if options.path.is_none() {
            info!("No local Chrome found, fetching Chromium");
        }

        let browser = Browser::new(options).map_err(browser_err("launch failed"))?;
        let tab = browser.new_tab().map_err(browser_err("could not open tab"))?;
        tab.set_user_agent(&config.user_agent, None, None)
            .map_err(browser_err("could not set user agent"))?;

        info!(headless = config.headless, "Browser launched");
        Ok(Self {
            _browser: browser,
            tab,
        })
    }

    /// Shuts the browser down.
    pub fn close(self) {
        drop(self);
        info!("Browser closed");
    }

    fn presence_script(query: &Query) -> Result<String, ScraperError> {
        // JSON string encoding doubles as JavaScript string escaping.
        let script_err = |e: serde_json::Error| ScraperError::Browser(e.to_string());
        Ok(match query {
            Query::Css(selector) => format!(
                "document.querySelector({}) !== null",
                serde_json::to_string(selector).map_err(script_err)?
            ),
            Query::ButtonText(_) => {
                let xpath = query.to_xpath().unwrap_or_default();
                format!(
                    "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue !== null",
                    serde_json::to_string(&xpath).map_err(script_err)?
                )
            }
        })
    }
}

impl PageDriver for ChromeDriver {
    fn render(&self, url: &str) -> Result<String, ScraperError> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .and_then(|tab| tab.get_content())
            .map_err(|e| ScraperError::Render(e.to_string()))
    }

    fn page_source(&self) -> Result<String, ScraperError> {
        self.tab
            .get_content()
            .map_err(browser_err("could not read page content"))
    }

    fn is_present(&self, query: &Query) -> Result<bool, ScraperError> {
        let script = Self::presence_script(query)?;
        let result = self
            .tab
            .evaluate(&script, false)
            .map_err(browser_err("script failed"))?;

        Ok(result
            .value
            .as_ref()
            .and_then(|v| v.as_bool())
            .unwrap_or(false))
    }

    fn click(&self, query: &Query) -> Result<(), ScraperError> {
        let element = match query {
            Query::Css(selector) => self.tab.find_element(selector),
            Query::ButtonText(_) => {
                let xpath = query.to_xpath().unwrap_or_default();
                self.tab.find_element_by_xpath(&xpath)
            }
        }
        .map_err(browser_err("element not found"))?;

        element.click().map_err(browser_err("click failed"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_options_follow_config() {
        let config = BrowserConfig {
            headless: true,
            disable_images: true,
            ..BrowserConfig::default()
        };
        let options = launch_options(&config).unwrap();

        assert!(options.headless);
        assert_eq!(options.args, vec![OsStr::new(DISABLE_IMAGES)]);
        assert_eq!(options.path, default_executable().ok());
    }

    #[test]
    fn images_stay_enabled_when_asked() {
        let config = BrowserConfig {
            disable_images: false,
            ..BrowserConfig::default()
        };
        assert!(launch_options(&config).unwrap().args.is_empty());
    }
}
