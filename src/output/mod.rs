pub mod formatter;

pub use formatter::{
    format_area_hint, format_areas, format_estimate, format_json, format_money,
    format_money_full, format_range, format_tiers, format_tsv, greed_bar, should_use_colors,
    OutputOptions,
};
