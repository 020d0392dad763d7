// src/report.rs
//
// Line-oriented text report for one extraction outcome.

use crate::scraper::models::{ExtractionOutcome, ListingRecord};
use std::io::{self, Write};

pub const DIVIDER_WIDTH: usize = 40;
const ABSENT: &str = "None";

pub fn write_outcome<W: Write>(out: &mut W, outcome: &ExtractionOutcome) -> io::Result<()> {
    match outcome {
        ExtractionOutcome::Success(record) => write_record(out, record)?,
        ExtractionOutcome::Failure(reason) => writeln!(out, "{reason}")?,
    }
    write_divider(out)
}

fn write_record<W: Write>(out: &mut W, record: &ListingRecord) -> io::Result<()> {
    let or_absent = |value: &Option<String>| value.clone().unwrap_or_else(|| ABSENT.to_string());

    writeln!(out, "Property Name: {}", or_absent(&record.name))?;
    writeln!(out, "Property Type: {}", or_absent(&record.property_type))?;
    writeln!(out, "Bedrooms: {}", or_absent(&record.bedroom_count))?;
    writeln!(out, "Bathrooms: {}", or_absent(&record.bathroom_count))?;
    writeln!(out, "Amenities:")?;

    if record.amenities.is_none() {
        return writeln!(out, "  No amenities available.");
    }
    for category in record.categories() {
        writeln!(out, "  {}:", category.name)?;
        for label in &category.amenities {
            writeln!(out, "    - {label}")?;
        }
    }
    Ok(())
}

fn write_divider<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{}\n", "=".repeat(DIVIDER_WIDTH))
}
