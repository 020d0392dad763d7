pub mod chrome;
pub mod driver;
pub mod extractor;
pub mod locator;
pub mod models;
pub mod normalize;
pub mod reachability;
pub mod reveal;
pub mod snapshot;
pub mod wait;
mod scraper_error;

pub use chrome::ChromeDriver;
pub use extractor::ListingExtractor;
pub use reachability::HttpReachability;
pub use scraper_error::{AmenityScanError, FieldError, LocateError, ScraperError};
