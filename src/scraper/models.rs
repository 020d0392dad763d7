use indexmap::IndexMap;

// listing
//  ├── identifier        (always present)
//  ├── name              ┐
//  ├── property_type     │ each independently optional
//  ├── bedroom_count     │
//  ├── bathroom_count    ┘
//  └── amenities         (category -> labels, document order)

/// Amenity labels grouped by category, in document order.
pub type Amenities = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmenityCategory {
    pub name: String,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    pub identifier: String,
    pub name: Option<String>,
    pub property_type: Option<String>,
    pub bedroom_count: Option<String>,
    pub bathroom_count: Option<String>,
    pub amenities: Option<Amenities>,
}

impl ListingRecord {
    /// A record where nothing beyond the identifier could be read.
    pub fn empty(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: None,
            property_type: None,
            bedroom_count: None,
            bathroom_count: None,
            amenities: None,
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = AmenityCategory> + '_ {
        self.amenities.iter().flatten().map(|(name, amenities)| AmenityCategory {
            name: name.clone(),
            amenities: amenities.clone(),
        })
    }
}

/// Result of running the pipeline for one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Success(ListingRecord),
    Failure(String),
}

impl ExtractionOutcome {
    pub fn record(&self) -> Option<&ListingRecord> {
        match self {
            ExtractionOutcome::Success(record) => Some(record),
            ExtractionOutcome::Failure(_) => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ExtractionOutcome::Success(_) => None,
            ExtractionOutcome::Failure(reason) => Some(reason),
        }
    }
}
