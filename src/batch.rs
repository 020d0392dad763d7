// src/batch.rs
use crate::report::write_outcome;
use crate::scraper::driver::PageDriver;
use crate::scraper::reachability::Reachability;
use crate::scraper::ListingExtractor;
use std::io::{self, Write};
use tracing::{debug, info};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Runs every target through the extractor, one after another, writing one
/// report block per target.
pub struct BatchRunner<'a, D: PageDriver, R: Reachability> {
    extractor: ListingExtractor<'a, D, R>,
}

impl<'a, D: PageDriver, R: Reachability> BatchRunner<'a, D, R> {
    pub fn new(extractor: ListingExtractor<'a, D, R>) -> Self {
        Self { extractor }
    }

    /// Per-target failures are reported in `out`; only a write error ends the
    /// run early.
    pub fn run<W: Write>(&self, targets: &[String], out: &mut W) -> io::Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        for (index, target) in targets.iter().enumerate() {
            info!("📄 Listing {}/{}: {target}", index + 1, targets.len());

            let outcome = self.extractor.extract(target);
            if let Some(record) = outcome.record() {
                summary.succeeded += 1;
                debug!(
                    categories = record.amenities.as_ref().map_or(0, |a| a.len()),
                    "record ready"
                );
            } else if let Some(reason) = outcome.reason() {
                summary.failed += 1;
                debug!(reason, "record failed");
            }

            write_outcome(out, &outcome)?;
            out.flush()?;
        }

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "✅ Batch complete"
        );
        Ok(summary)
    }
}
