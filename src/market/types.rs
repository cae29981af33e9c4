use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InvalidInput;

/// Smallest bedroom count the table carries.
pub const MIN_BEDROOMS: u8 = 1;
/// Largest bedroom count the table carries.
pub const MAX_BEDROOMS: u8 = 4;

/// Fair annual rent bounds for one (area, bedroom-count) pair.
///
/// Always satisfies `0 < min <= avg <= max` with finite values; the only way to
/// obtain one is through [`PriceRange::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    min: f64,
    avg: f64,
    max: f64,
}

impl PriceRange {
    pub fn new(min: f64, avg: f64, max: f64) -> Result<Self, InvalidInput> {
        let positive = [min, avg, max]
            .iter()
            .all(|value| value.is_finite() && *value > 0.0);
        if !positive || min > avg || avg > max {
            return Err(InvalidInput::MalformedRange { min, avg, max });
        }
        Ok(Self { min, avg, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn avg(&self) -> f64 {
        self.avg
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Qualitative price grouping of areas. Presentation only, never scored.
///
/// Ordered from most to least expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Luxury,
    Premium,
    #[serde(rename = "Mid-Range", alias = "MidRange")]
    MidRange,
    Affordable,
    Budget,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Luxury,
        Tier::Premium,
        Tier::MidRange,
        Tier::Affordable,
        Tier::Budget,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Luxury => "Luxury",
            Tier::Premium => "Premium",
            Tier::MidRange => "Mid-Range",
            Tier::Affordable => "Affordable",
            Tier::Budget => "Budget",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive metadata for a submarket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Area {
    pub name: String,
    pub lga: String,
    pub tier: Tier,
    pub description: String,
    pub amenities: Vec<String>,
    pub popular_estates: Vec<String>,
}

/// Table entry for one (area, bedroom-count) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketPrice {
    pub range: PriceRange,
    pub trend: String,
}
