// snapshot.rs
//
// Reads listing fields out of a markup snapshot. Nothing in here touches the
// live page.

use crate::config::SelectorConfig;
use crate::scraper::models::{Amenities, AmenityCategory};
use crate::scraper::normalize::normalize;
use crate::scraper::{AmenityScanError, FieldError, ScraperError};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

const UNAVAILABLE_PREFIX: &str = "Unavailable:";

/// Selectors from [`SelectorConfig`], parsed once per run.
#[derive(Debug)]
pub struct CompiledSelectors {
    name: (String, Selector),
    property_type: (String, Selector),
    bedrooms: (String, Selector),
    bathrooms: (String, Selector),
    category_header: Selector,
    category_title: Selector,
    amenity_list: Selector,
    amenity_item: Selector,
    unavailable_marker: Selector,
}

fn parse(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn named(selector: &str) -> Result<(String, Selector), ScraperError> {
    Ok((selector.to_string(), parse(selector)?))
}

impl CompiledSelectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self, ScraperError> {
        Ok(Self {
            name: named(&config.name)?,
            property_type: named(&config.property_type)?,
            bedrooms: named(&config.bedrooms)?,
            bathrooms: named(&config.bathrooms)?,
            category_header: parse(&config.category_header)?,
            category_title: parse(&config.category_title)?,
            amenity_list: parse(&config.amenity_list)?,
            amenity_item: parse(&config.amenity_item)?,
            unavailable_marker: parse(&config.unavailable_marker)?,
        })
    }
}

/// The four primary fields, each read independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryFields {
    pub name: Result<String, FieldError>,
    pub property_type: Result<String, FieldError>,
    pub bedroom_count: Result<String, FieldError>,
    pub bathroom_count: Result<String, FieldError>,
}

impl PrimaryFields {
    pub fn read(doc: &Html, selectors: &CompiledSelectors) -> Self {
        Self {
            name: text_of(doc, &selectors.name),
            property_type: text_of(doc, &selectors.property_type),
            bedroom_count: count_in(doc, &selectors.bedrooms),
            bathroom_count: count_in(doc, &selectors.bathrooms),
        }
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

// A matched element with blank text still counts as read.
fn text_of(doc: &Html, (raw, selector): &(String, Selector)) -> Result<String, FieldError> {
    doc.select(selector)
        .next()
        .map(element_text)
        .ok_or_else(|| FieldError::Missing(raw.clone()))
}

fn count_in(doc: &Html, selector: &(String, Selector)) -> Result<String, FieldError> {
    let text = text_of(doc, selector)?;
    let number = FIRST_NUMBER.find(&text).map(|m| m.as_str().to_string());
    number.ok_or(FieldError::NoNumber(text))
}

/// Walks every category header, pairs it with the list that follows it and
/// returns the normalized labels per category.
///
/// Headers with no following list are skipped. A header without a title
/// fails the whole scan.
pub fn scan_amenities(
    doc: &Html,
    selectors: &CompiledSelectors,
) -> Result<Amenities, AmenityScanError> {
    let mut amenities = Amenities::new();

    for (index, header) in doc.select(&selectors.category_header).enumerate() {
        let title = header
            .select(&selectors.category_title)
            .next()
            .ok_or(AmenityScanError::UntitledCategory(index))?;

        let Some(list) = header
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|sibling| selectors.amenity_list.matches(sibling))
        else {
            continue;
        };

        let category = AmenityCategory {
            name: element_text(title),
            amenities: list
                .select(&selectors.amenity_item)
                .map(|item| amenity_label(item, selectors))
                .collect(),
        };
        amenities.insert(category.name, category.amenities);
    }

    Ok(amenities)
}

// An unavailable amenity is wrapped in a strike-through element and may be
// prefixed with "Unavailable:"; either way only the base label is kept.
fn amenity_label(item: ElementRef<'_>, selectors: &CompiledSelectors) -> String {
    let raw = match item.select(&selectors.unavailable_marker).next() {
        Some(marker) => element_text(marker),
        None => element_text(item),
    };
    normalize(raw.replace(UNAVAILABLE_PREFIX, "").trim())
}
