use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::RentError;
use crate::market::{Area, PriceRange, ReferenceTable, Tier};
use crate::scoring::{self, Verdict};

/// Full answer for one (area, bedrooms, asking) query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub area: Area,
    pub bedrooms: u8,
    pub range: PriceRange,
    pub trend: String,
    pub asking: Option<f64>,
    /// Present only when an asking price was supplied.
    pub verdict: Option<Verdict>,
}

/// One area's row in a tier comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierEntry {
    pub name: String,
    pub range: PriceRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierComparison {
    pub bedrooms: u8,
    /// Tiers in order from most to least expensive; areas by ascending average.
    pub tiers: BTreeMap<Tier, Vec<TierEntry>>,
}

/// Ties the reference table to the scoring engine.
pub struct Estimator<'a> {
    table: &'a ReferenceTable,
}

impl<'a> Estimator<'a> {
    pub fn new(table: &'a ReferenceTable) -> Self {
        Self { table }
    }

    /// Look up the fair range and, when `asking` is given, score it.
    pub fn estimate(
        &self,
        area: &str,
        bedrooms: u8,
        asking: Option<f64>,
    ) -> Result<Estimate, RentError> {
        let (found, price) = self.table.lookup(area, bedrooms)?;

        let verdict = match asking {
            None => None,
            Some(asking) => Some(scoring::score(&price.range, asking)?),
        };

        debug!(
            area = %found.name,
            bedrooms,
            asking,
            label = ?verdict.as_ref().map(|v| v.label),
            "estimated rent"
        );

        Ok(Estimate {
            area: found.clone(),
            bedrooms,
            range: scoring::range_only(&price.range),
            trend: price.trend.clone(),
            asking,
            verdict,
        })
    }

    /// Group every area with data for `bedrooms` by tier.
    pub fn compare_tiers(&self, bedrooms: u8) -> TierComparison {
        let mut tiers: BTreeMap<Tier, Vec<TierEntry>> = BTreeMap::new();
        for (area, price) in self.table.entries_for(bedrooms) {
            tiers.entry(area.tier).or_default().push(TierEntry {
                name: area.name.clone(),
                range: price.range,
            });
        }
        for entries in tiers.values_mut() {
            entries.sort_by(|a, b| a.range.avg().total_cmp(&b.range.avg()));
        }
        TierComparison { bedrooms, tiers }
    }
}
