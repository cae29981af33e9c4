pub mod storage;
pub mod table;
pub mod types;

pub use storage::{load_table, Dataset};
pub use table::{area_key, DatasetError, ReferenceTable};
pub use types::{Area, MarketPrice, PriceRange, Tier, MAX_BEDROOMS, MIN_BEDROOMS};
