use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::table::ReferenceTable;
use super::types::Tier;

/// On-disk shape of a market dataset (JSON or YAML).
///
/// Example YAML:
/// ```yaml
/// last_updated: "2025-01-15"
/// currency: NGN
/// areas:
///   - name: Yaba
///     lga: Lagos Mainland
///     tier: Mid-Range
///     pricing:
///       1_bedroom: { min: 500000, avg: 800000, max: 1200000, market_trend: "Rising" }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Dataset {
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,

    #[serde(default)]
    pub currency: Option<String>,

    pub areas: Vec<AreaRecord>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AreaRecord {
    pub name: String,

    #[serde(default)]
    pub lga: String,

    pub tier: Tier,

    #[serde(default)]
    pub description: String,

    /// Keyed by `"<N>_bedroom"`.
    pub pricing: BTreeMap<String, PricingRecord>,

    #[serde(default)]
    pub amenities: Vec<String>,

    #[serde(default)]
    pub popular_estates: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PricingRecord {
    pub min: f64,
    pub avg: f64,
    pub max: f64,

    #[serde(default)]
    pub market_trend: String,
}

enum DatasetFormat {
    Json,
    Yaml,
}

fn detect_format(path: &Path) -> Result<DatasetFormat> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("json") => Ok(DatasetFormat::Json),
        Some("yaml") | Some("yml") => Ok(DatasetFormat::Yaml),
        _ => anyhow::bail!(
            "Unsupported dataset format for {}: expected .json, .yaml or .yml",
            path.display()
        ),
    }
}

/// Parse a JSON dataset and build a table from it.
pub fn parse_json(content: &str) -> Result<ReferenceTable> {
    let dataset: Dataset =
        serde_json::from_str(content).context("Failed to parse dataset: invalid JSON")?;
    Ok(ReferenceTable::from_dataset(dataset)?)
}

/// Parse a YAML dataset and build a table from it.
pub fn parse_yaml(content: &str) -> Result<ReferenceTable> {
    let dataset: Dataset =
        serde_saphyr::from_str(content).context("Failed to parse dataset: invalid YAML")?;
    Ok(ReferenceTable::from_dataset(dataset)?)
}

/// Load a reference table from a dataset file.
///
/// The format is chosen by extension: `.json`, `.yaml` or `.yml`.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - The extension is not recognised
/// - The content cannot be parsed
/// - The dataset fails validation (bad bedroom keys, malformed ranges, duplicate areas)
pub fn load_table(path: &Path) -> Result<ReferenceTable> {
    if !path.exists() {
        anyhow::bail!("Dataset not found at {}", path.display());
    }

    let format = detect_format(path)?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset at {}", path.display()))?;

    let table = match format {
        DatasetFormat::Json => parse_json(&content),
        DatasetFormat::Yaml => parse_yaml(&content),
    }
    .with_context(|| format!("Failed to load dataset from {}", path.display()))?;

    debug!(
        path = %path.display(),
        areas = table.areas().len(),
        "loaded market dataset"
    );
    Ok(table)
}
