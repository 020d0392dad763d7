//! Blocking wait primitives.
//!
//! The page exposes no "rendering finished" signal, so there are two ways to
//! synchronize with it: poll until a landmark element exists, or wait for the
//! markup to stop changing after an interaction. Both block the calling
//! thread; there is no cancellation.

use crate::scraper::driver::PageDriver;
use std::fmt;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default poll interval for element lookups (250ms).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy)]
pub struct WaitConfig {
    /// Maximum time to wait for the condition.
    pub timeout: Duration,
    /// How often the condition is re-checked.
    pub poll_interval: Duration,
}

impl WaitConfig {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStatus {
    Satisfied(Duration),
    TimedOut(Duration),
}

/// Checks `condition` until it returns `Ok(true)` or the timeout elapses.
///
/// The condition is always checked at least once, so a zero timeout is a
/// single probe. An `Err` from the condition stops polling immediately.
pub fn poll_until<F, E>(config: WaitConfig, mut condition: F) -> Result<WaitStatus, E>
where
    F: FnMut() -> Result<bool, E>,
{
    let start = Instant::now();

    loop {
        if condition()? {
            return Ok(WaitStatus::Satisfied(start.elapsed()));
        }

        let elapsed = start.elapsed();
        if elapsed >= config.timeout {
            return Ok(WaitStatus::TimedOut(elapsed));
        }

        thread::sleep(config.poll_interval.min(config.timeout - elapsed));
    }
}

/// How a settle wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// Two consecutive samples matched.
    Stable(Duration),
    /// The bound elapsed (always the case for a fixed delay).
    Elapsed(Duration),
    /// The page could not be sampled; waiting stopped early.
    Unobservable(Duration),
}

/// Waits for content to finish materializing after an interaction.
pub trait SettleStrategy: fmt::Debug {
    fn settle(&self, driver: &dyn PageDriver) -> Settled;
}

/// Sleeps for a constant duration.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl SettleStrategy for FixedDelay {
    fn settle(&self, _driver: &dyn PageDriver) -> Settled {
        thread::sleep(self.0);
        Settled::Elapsed(self.0)
    }
}

/// Samples the page markup every `interval` and returns once two consecutive
/// samples are identical, or after `timeout`.
#[derive(Debug, Clone, Copy)]
pub struct StableMarkup {
    pub interval: Duration,
    pub timeout: Duration,
}

impl SettleStrategy for StableMarkup {
    fn settle(&self, driver: &dyn PageDriver) -> Settled {
        let start = Instant::now();

        let mut previous = match driver.page_source() {
            Ok(markup) => markup,
            Err(e) => {
                warn!("Could not sample page while settling: {e}");
                return Settled::Unobservable(start.elapsed());
            }
        };

        loop {
            let elapsed = start.elapsed();
            if elapsed >= self.timeout {
                debug!(?elapsed, "markup still changing, settle bound reached");
                return Settled::Elapsed(elapsed);
            }

            thread::sleep(self.interval.min(self.timeout - elapsed));

            let current = match driver.page_source() {
                Ok(markup) => markup,
                Err(e) => {
                    warn!("Could not sample page while settling: {e}");
                    return Settled::Unobservable(start.elapsed());
                }
            };

            if current == previous {
                debug!(elapsed = ?start.elapsed(), "markup stable");
                return Settled::Stable(start.elapsed());
            }
            previous = current;
        }
    }
}
