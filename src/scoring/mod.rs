pub mod engine;
pub mod verdict;

pub use engine::{range_only, score};
pub use verdict::{PricePosition, RiskLevel, Verdict, VerdictLabel};
