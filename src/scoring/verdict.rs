use serde::Serialize;
use std::fmt;

/// Classification of an asking price, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum VerdictLabel {
    GreatDeal,
    FairPrice,
    Overpriced,
    ExtremeGreed,
    HighwayRobbery,
}

impl VerdictLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::GreatDeal => "Great Deal",
            VerdictLabel::FairPrice => "Fair Price",
            VerdictLabel::Overpriced => "Overpriced",
            VerdictLabel::ExtremeGreed => "Extreme Greed",
            VerdictLabel::HighwayRobbery => "Highway Robbery",
        }
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
            RiskLevel::VeryHigh => "Very High Risk",
            RiskLevel::Critical => "Critical",
        }
    }

    /// Advice shown to the tenant for this risk level.
    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskLevel::Low => "This is a fair price. You can proceed with confidence.",
            RiskLevel::Moderate => "Slightly overpriced. Try negotiating down by 10-15%.",
            RiskLevel::High => "Overpriced! Negotiate hard or look for alternatives.",
            RiskLevel::VeryHigh => "Avoid. This landlord is exploiting tenants. Look elsewhere.",
            RiskLevel::Critical => {
                "Run! This is highway robbery. Report to authorities if necessary."
            }
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an asking price sits relative to the market range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PricePosition {
    BelowMin,
    BelowAverage,
    AtAverage,
    AboveAverage,
    AboveMax { percent: f64 },
}

impl PricePosition {
    pub fn describe(&self) -> String {
        match self {
            PricePosition::BelowMin => {
                "Below market minimum (unusual, check property condition)".to_string()
            }
            PricePosition::BelowAverage => {
                "Below average (good negotiation or lower-end property)".to_string()
            }
            PricePosition::AtAverage => "At market average (typical price)".to_string(),
            PricePosition::AboveAverage => {
                "Above average but within range (higher-end property or premium features)"
                    .to_string()
            }
            PricePosition::AboveMax { percent } => {
                format!("Above market maximum by {:.0}% (likely overpriced)", percent)
            }
        }
    }
}

/// Outcome of scoring one asking price against one range.
///
/// All numeric fields are exact; rounding is left to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub label: VerdictLabel,
    /// Greed score in `[0, 100]`.
    pub score: f64,
    pub risk_level: RiskLevel,
    /// Zero when the asking price is within range.
    pub percent_above_max: f64,
    /// Signed; negative means below the market average.
    pub percent_diff_from_avg: f64,
    pub position: PricePosition,
    pub recommendation: String,
}
