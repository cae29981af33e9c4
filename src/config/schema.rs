use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₦";
pub const DEFAULT_BAR_WIDTH: usize = 40;

/// User configuration. Every field is optional.
///
/// Example YAML:
/// ```yaml
/// data: ~/rent/market_data.yaml
/// currency_symbol: "₦"
/// bar_width: 40
/// color: auto
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Market dataset (JSON or YAML). The bundled dataset is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PathBuf>,

    /// Symbol prefixed to every amount in text output (default: ₦)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<String>,

    /// Width of the greed bar in cells (default: 40)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_width: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorMode>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl Config {
    /// The config written by `init`: defaults spelled out so they are easy to edit.
    pub fn starter() -> Self {
        Self {
            data: None,
            currency_symbol: Some(DEFAULT_CURRENCY_SYMBOL.to_string()),
            bar_width: Some(DEFAULT_BAR_WIDTH),
            color: Some(ColorMode::Auto),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        self.currency_symbol
            .as_deref()
            .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
    }

    pub fn bar_width(&self) -> usize {
        self.bar_width.unwrap_or(DEFAULT_BAR_WIDTH)
    }

    pub fn color(&self) -> ColorMode {
        self.color.unwrap_or_default()
    }

    /// Dataset path with a leading `~` expanded to the home directory.
    pub fn data_path(&self) -> Option<PathBuf> {
        self.data.as_deref().map(expand_home)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
