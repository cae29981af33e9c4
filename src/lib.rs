//! Fair-rent estimation with a Greed Meter.
//!
//! Looks up the market price range for an (area, bedrooms) pair and scores an
//! asking price against it on a 0–100 scale.

pub mod config;
pub mod error;
pub mod estimate;
pub mod market;
pub mod output;
pub mod scoring;

pub use error::{InvalidInput, NotFound, RentError};
pub use estimate::{Estimate, Estimator, TierComparison, TierEntry};
pub use market::{PriceRange, ReferenceTable};
pub use scoring::{score, Verdict, VerdictLabel};
