use anyhow::Context;
use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use super::storage::{parse_json, Dataset};
use super::types::{Area, MarketPrice, PriceRange, MAX_BEDROOMS, MIN_BEDROOMS};
use crate::error::{InvalidInput, NotFound, RentError};

const BUILTIN_DATASET: &str = include_str!("../../data/market_data.json");

/// Reasons a dataset is rejected while building a [`ReferenceTable`].
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset contains no areas")]
    NoAreas,

    #[error("duplicate area '{0}' (names are compared case-insensitively)")]
    DuplicateArea(String),

    #[error("area '{0}' has no pricing entries")]
    EmptyPricing(String),

    #[error("area '{area}': invalid pricing key '{key}', expected \"<N>_bedroom\" with N in 1..=4")]
    BedroomKey { area: String, key: String },

    #[error("area '{area}' has more than one {bedrooms}-bedroom entry")]
    DuplicateBedrooms { area: String, bedrooms: u8 },

    #[error("area '{area}', {bedrooms}-bedroom: {source}")]
    Range {
        area: String,
        bedrooms: u8,
        source: InvalidInput,
    },
}

/// Normalise an area name into its lookup key: trimmed and lower-cased.
pub fn area_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Exactly `"<N>_bedroom"`, N a single digit in the supported range.
fn parse_bedroom_key(key: &str) -> Option<u8> {
    match key.strip_suffix("_bedroom")?.as_bytes() {
        [digit @ b'0'..=b'9'] => {
            let count = digit - b'0';
            (MIN_BEDROOMS..=MAX_BEDROOMS)
                .contains(&count)
                .then_some(count)
        }
        _ => None,
    }
}

/// Read-only market reference table keyed by (area, bedroom-count).
///
/// Area lookups ignore case and surrounding whitespace; results always carry the
/// dataset's canonical spelling. Nothing mutates the table after construction.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    areas: Vec<Area>,
    index: HashMap<String, usize>,
    prices: HashMap<(String, u8), MarketPrice>,
    last_updated: Option<NaiveDate>,
    currency: Option<String>,
}

impl ReferenceTable {
    /// Validate a parsed dataset and index it.
    pub fn from_dataset(dataset: Dataset) -> Result<Self, DatasetError> {
        if dataset.areas.is_empty() {
            return Err(DatasetError::NoAreas);
        }

        let mut areas = Vec::with_capacity(dataset.areas.len());
        let mut index = HashMap::with_capacity(dataset.areas.len());
        let mut prices = HashMap::new();

        for record in dataset.areas {
            let key = area_key(&record.name);
            if index.contains_key(&key) {
                return Err(DatasetError::DuplicateArea(record.name));
            }
            if record.pricing.is_empty() {
                return Err(DatasetError::EmptyPricing(record.name));
            }

            for (bedroom_key, pricing) in record.pricing {
                let bedrooms =
                    parse_bedroom_key(&bedroom_key).ok_or_else(|| DatasetError::BedroomKey {
                        area: record.name.clone(),
                        key: bedroom_key.clone(),
                    })?;
                let range = PriceRange::new(pricing.min, pricing.avg, pricing.max).map_err(
                    |source| DatasetError::Range {
                        area: record.name.clone(),
                        bedrooms,
                        source,
                    },
                )?;
                let previous = prices.insert(
                    (key.clone(), bedrooms),
                    MarketPrice {
                        range,
                        trend: pricing.market_trend,
                    },
                );
                if previous.is_some() {
                    return Err(DatasetError::DuplicateBedrooms {
                        area: record.name,
                        bedrooms,
                    });
                }
            }

            index.insert(key, areas.len());
            areas.push(Area {
                name: record.name,
                lga: record.lga,
                tier: record.tier,
                description: record.description,
                amenities: record.amenities,
                popular_estates: record.popular_estates,
            });
        }

        debug!(areas = areas.len(), entries = prices.len(), "indexed reference table");

        Ok(Self {
            areas,
            index,
            prices,
            last_updated: dataset.last_updated,
            currency: dataset.currency,
        })
    }

    /// The dataset bundled with the crate.
    pub fn builtin() -> anyhow::Result<Self> {
        parse_json(BUILTIN_DATASET).context("Bundled market dataset is invalid")
    }

    /// Fair price range for an area and bedroom count.
    ///
    /// A count outside 1..=4 is [`InvalidInput::Bedrooms`]; a supported count the
    /// area has no data for is [`NotFound::Bedrooms`].
    pub fn get_range(&self, area: &str, bedrooms: u8) -> Result<PriceRange, RentError> {
        self.lookup(area, bedrooms).map(|(_, price)| price.range)
    }

    /// Area metadata together with its table entry for `bedrooms`.
    pub fn lookup(&self, area: &str, bedrooms: u8) -> Result<(&Area, &MarketPrice), RentError> {
        if !(MIN_BEDROOMS..=MAX_BEDROOMS).contains(&bedrooms) {
            return Err(InvalidInput::Bedrooms(bedrooms).into());
        }
        let key = area_key(area);
        let found = self.area_by_key(&key, area)?;
        let price = self
            .prices
            .get(&(key, bedrooms))
            .ok_or_else(|| NotFound::Bedrooms {
                area: found.name.clone(),
                bedrooms,
            })?;
        Ok((found, price))
    }

    pub fn area(&self, name: &str) -> Result<&Area, RentError> {
        self.area_by_key(&area_key(name), name)
    }

    fn area_by_key(&self, key: &str, requested: &str) -> Result<&Area, RentError> {
        self.index
            .get(key)
            .map(|&idx| &self.areas[idx])
            .ok_or_else(|| NotFound::Area(requested.trim().to_string()).into())
    }

    /// All areas, in dataset order.
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    /// Bedroom counts with data for an area, ascending.
    pub fn bedrooms_for(&self, area: &str) -> Result<Vec<u8>, RentError> {
        let key = area_key(area);
        self.area_by_key(&key, area)?;
        Ok((MIN_BEDROOMS..=MAX_BEDROOMS)
            .filter(|bedrooms| self.prices.contains_key(&(key.clone(), *bedrooms)))
            .collect())
    }

    /// Every area with an entry for `bedrooms`, in dataset order.
    pub fn entries_for(&self, bedrooms: u8) -> impl Iterator<Item = (&Area, &MarketPrice)> + '_ {
        self.areas.iter().filter_map(move |area| {
            self.prices
                .get(&(area_key(&area.name), bedrooms))
                .map(|price| (area, price))
        })
    }

    pub fn last_updated(&self) -> Option<NaiveDate> {
        self.last_updated
    }

    /// ISO currency code declared by the dataset, if any.
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }
}
