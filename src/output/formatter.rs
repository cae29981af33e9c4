use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::config::{ColorMode, Config};
use crate::estimate::{Estimate, TierComparison};
use crate::market::{PriceRange, ReferenceTable, Tier};
use crate::scoring::{RiskLevel, Verdict, VerdictLabel};

const DEFAULT_RULE_WIDTH: usize = 70;
const MIN_RULE_WIDTH: usize = 20;

/// Presentation settings shared by the text formatters.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputOptions {
    pub use_colors: bool,
    pub currency_symbol: String,
    pub bar_width: usize,
    pub rule_width: usize,
}

impl OutputOptions {
    /// Resolve options from config, the `--no-color` flag and the terminal.
    pub fn from_config(config: &Config, no_color: bool) -> Self {
        Self {
            use_colors: !no_color && should_use_colors(config.color()),
            currency_symbol: config.currency_symbol().to_string(),
            bar_width: config.bar_width(),
            rule_width: get_rule_width(),
        }
    }

    /// Colourless options with default widths.
    pub fn plain() -> Self {
        Self::from_config(&Config::default(), true).with_rule_width(DEFAULT_RULE_WIDTH)
    }

    pub fn with_rule_width(mut self, width: usize) -> Self {
        self.rule_width = width;
        self
    }
}

/// Check whether colours apply: forced by config, or auto-detected from a TTY stdout
pub fn should_use_colors(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Rule width: terminal width capped at the default, default for pipes
fn get_rule_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| (w as usize).clamp(MIN_RULE_WIDTH, DEFAULT_RULE_WIDTH))
        .unwrap_or(DEFAULT_RULE_WIDTH)
}

/// Format an amount in compact notation (₦1.5M, ₦800k)
pub fn format_money(amount: f64, symbol: &str) -> String {
    let formatted = if amount >= 1_000_000.0 {
        format!("{:.1}M", amount / 1_000_000.0)
    } else {
        format!("{:.0}k", amount / 1_000.0)
    };

    // Trim trailing .0 (e.g., "2.0M" -> "2M")
    format!("{}{}", symbol, formatted.replace(".0M", "M"))
}

/// Format an amount with thousands separators (₦1,500,000). Fractions keep two decimals.
pub fn format_money_full(amount: f64, symbol: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let sign = if amount < 0.0 { "-" } else { "" };
    match cents % 100 {
        0 => format!("{}{}{}", sign, symbol, whole),
        frac => format!("{}{}{}.{:02}", sign, symbol, whole, frac),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// "₦500k - ₦1.2M (avg: ₦800k)"
pub fn format_range(range: &PriceRange, symbol: &str) -> String {
    format!(
        "{} - {} (avg: {})",
        format_money(range.min(), symbol),
        format_money(range.max(), symbol),
        format_money(range.avg(), symbol)
    )
}

/// Render a greed score as a bar of `width` cells
pub fn greed_bar(score: f64, width: usize) -> String {
    let filled = ((score.clamp(0.0, 100.0) / 100.0) * width as f64).floor() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn verdict_icon(verdict: &Verdict) -> &'static str {
    match (verdict.label, verdict.risk_level) {
        (VerdictLabel::GreatDeal, _) => "🎉",
        (_, RiskLevel::Low) => "✅",
        (_, RiskLevel::Moderate) => "⚠️",
        (_, RiskLevel::High) => "🚨",
        (_, RiskLevel::VeryHigh) => "🔥",
        (_, RiskLevel::Critical) => "💀",
    }
}

fn paint_risk(text: &str, risk: RiskLevel, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match risk {
        RiskLevel::Low => text.green().to_string(),
        RiskLevel::Moderate => text.yellow().to_string(),
        RiskLevel::High => text.bright_red().to_string(),
        RiskLevel::VeryHigh => text.red().to_string(),
        RiskLevel::Critical => text.red().bold().to_string(),
    }
}

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// Multi-line report for one estimate
pub fn format_estimate(estimate: &Estimate, opts: &OutputOptions) -> String {
    let symbol = opts.currency_symbol.as_str();
    let rule = "=".repeat(opts.rule_width);
    let area = &estimate.area;
    let range = &estimate.range;
    let mut out = Vec::new();

    out.push(rule.clone());
    out.push(heading(
        &format!("🏠 RENT ESTIMATE - {}", area.name),
        opts.use_colors,
    ));
    out.push(rule.clone());
    out.push(String::new());

    if area.lga.is_empty() {
        out.push(format!("📍 LOCATION: {}", area.name));
    } else {
        out.push(format!("📍 LOCATION: {} ({} LGA)", area.name, area.lga));
    }
    out.push(format!("🛏️  BEDROOMS: {}-bedroom apartment", estimate.bedrooms));
    out.push(format!("🏆 TIER: {}", area.tier));
    if !area.description.is_empty() {
        out.push(format!("📝 DESCRIPTION: {}", area.description));
    }
    out.push(String::new());

    out.push(heading("💰 FAIR PRICE RANGE (Annual):", opts.use_colors));
    out.push(format!("   Minimum: {}", format_money_full(range.min(), symbol)));
    out.push(format!("   Average: {}", format_money_full(range.avg(), symbol)));
    out.push(format!("   Maximum: {}", format_money_full(range.max(), symbol)));
    out.push(format!("   Summary: {}", format_range(range, symbol)));
    out.push(String::new());

    if !estimate.trend.is_empty() {
        out.push(format!("📈 MARKET TREND: {}", estimate.trend));
        out.push(String::new());
    }
    if !area.amenities.is_empty() {
        out.push(format!("✨ TYPICAL AMENITIES: {}", area.amenities.join(", ")));
        out.push(String::new());
    }
    if !area.popular_estates.is_empty() {
        out.push(format!("🏘️  POPULAR ESTATES: {}", area.popular_estates.join(", ")));
        out.push(String::new());
    }

    let recommendation = match (&estimate.verdict, estimate.asking) {
        (Some(verdict), Some(asking)) => {
            out.extend(format_greed_meter(verdict, asking, opts));
            out.push(String::new());
            paint_risk(&verdict.recommendation, verdict.risk_level, opts.use_colors)
        }
        _ => format!("Fair price range: {}", format_range(range, symbol)),
    };

    out.push(heading("💡 RECOMMENDATION:", opts.use_colors));
    out.push(format!("   {}", recommendation));
    out.push(String::new());
    out.push(rule);

    out.join("\n")
}

fn format_greed_meter(verdict: &Verdict, asking: f64, opts: &OutputOptions) -> Vec<String> {
    let symbol = opts.currency_symbol.as_str();
    let label = format!(
        "{} {}",
        verdict_icon(verdict),
        verdict.label.as_str().to_uppercase()
    );
    let mut lines = vec![
        format!("💵 ASKING PRICE: {}", format_money_full(asking, symbol)),
        String::new(),
        heading("🔥 GREED METER ANALYSIS:", opts.use_colors),
        format!(
            "   Verdict: {}",
            paint_risk(&label, verdict.risk_level, opts.use_colors)
        ),
        format!("   Risk Level: {}", verdict.risk_level),
        format!("   Position: {}", verdict.position.describe()),
        format!(
            "   Difference from Average: {:+.1}%",
            verdict.percent_diff_from_avg
        ),
    ];
    if verdict.percent_above_max > 0.0 {
        lines.push(format!(
            "   ⚠️  Above Maximum by: {:.1}%",
            verdict.percent_above_max
        ));
    }
    lines.push(format!(
        "   Greed Score: {:.0}/100 {}",
        verdict.score.floor(),
        paint_risk(
            &greed_bar(verdict.score, opts.bar_width),
            verdict.risk_level,
            opts.use_colors
        )
    ));
    lines
}

/// Areas per tier for one bedroom count, cheapest first within each tier
pub fn format_tiers(comparison: &TierComparison, opts: &OutputOptions) -> String {
    if comparison.tiers.is_empty() {
        return format!("No areas have {}-bedroom data.", comparison.bedrooms);
    }

    let symbol = opts.currency_symbol.as_str();
    let name_width = comparison
        .tiers
        .values()
        .flatten()
        .map(|entry| entry.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = vec![heading(
        &format!("{}-bedroom rent by tier", comparison.bedrooms),
        opts.use_colors,
    )];
    for (tier, entries) in &comparison.tiers {
        out.push(String::new());
        out.push(heading(&format!("{}:", tier), opts.use_colors));
        for entry in entries {
            out.push(format!(
                "  {:<width$}  {}",
                entry.name,
                format_range(&entry.range, symbol),
                width = name_width
            ));
        }
    }
    out.join("\n")
}

/// Every area in the table grouped by tier, with available bedroom counts
pub fn format_areas(table: &ReferenceTable, opts: &OutputOptions) -> String {
    let mut out = Vec::new();
    for tier in Tier::ALL {
        let areas: Vec<_> = table.areas().iter().filter(|a| a.tier == tier).collect();
        if areas.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(String::new());
        }
        out.push(heading(&format!("{}:", tier), opts.use_colors));
        for area in areas {
            let bedrooms = table
                .bedrooms_for(&area.name)
                .unwrap_or_default()
                .iter()
                .map(|b| b.to_string())
                .collect::<Vec<_>>()
                .join(",");
            out.push(format!("  • {} ({} bd)", area.name, bedrooms));
        }
    }
    if let Some(date) = table.last_updated() {
        out.push(String::new());
        out.push(format!("Data last updated: {}", date));
    }
    out.join("\n")
}

/// One-line hint listing every known area name
pub fn format_area_hint(table: &ReferenceTable) -> String {
    let names: Vec<_> = table.areas().iter().map(|a| a.name.as_str()).collect();
    format!("Available areas: {}", names.join(", "))
}

/// Pretty JSON with exact (unrounded) numbers
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize result as JSON")
}

/// Tab-separated values for scripting
/// Columns: area, bedrooms, min, avg, max, asking, label, score (no headers, no colors)
pub fn format_tsv(estimate: &Estimate) -> String {
    let asking = estimate
        .asking
        .map(|a| a.to_string())
        .unwrap_or_default();
    let (label, score) = match &estimate.verdict {
        Some(verdict) => (format!("{:?}", verdict.label), verdict.score.to_string()),
        None => (String::new(), String::new()),
    };
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        estimate.area.name,
        estimate.bedrooms,
        estimate.range.min(),
        estimate.range.avg(),
        estimate.range.max(),
        asking,
        label,
        score
    )
}
