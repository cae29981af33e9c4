use super::schema::Config;

const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 200;
const MAX_SYMBOL_CHARS: usize = 8;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(width) = config.bar_width {
        if !(MIN_BAR_WIDTH..=MAX_BAR_WIDTH).contains(&width) {
            errors.push(format!(
                "bar_width: must be between {} and {}, got {}",
                MIN_BAR_WIDTH, MAX_BAR_WIDTH, width
            ));
        }
    }

    if let Some(ref symbol) = config.currency_symbol {
        if symbol.trim().is_empty() {
            errors.push("currency_symbol: must not be empty".to_string());
        } else if symbol.chars().count() > MAX_SYMBOL_CHARS {
            errors.push(format!(
                "currency_symbol: at most {} characters, got '{}'",
                MAX_SYMBOL_CHARS, symbol
            ));
        }
    }

    if let Some(ref data) = config.data {
        let ext = data
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        if !matches!(ext.as_deref(), Some("json") | Some("yaml") | Some("yml")) {
            errors.push(format!(
                "data: '{}' must be a .json, .yaml or .yml file",
                data.display()
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
