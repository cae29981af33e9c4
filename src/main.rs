use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, Level};

use rent_oracle::config;
use rent_oracle::market::{self, ReferenceTable, MAX_BEDROOMS, MIN_BEDROOMS};
use rent_oracle::output::{self, OutputOptions};
use rent_oracle::{Estimator, NotFound, RentError};

const EXIT_SUCCESS: i32 = 0;
const EXIT_NOT_FOUND: i32 = 1;
const EXIT_INVALID_INPUT: i32 = 2;
const EXIT_DATA: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
    Tsv,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the fair rent range, and run the Greed Meter if an asking price is given
    Estimate {
        /// Area name, e.g. "Lekki Phase 1" (case-insensitive)
        area: String,

        /// Number of bedrooms (1-4)
        #[arg(value_parser = clap::value_parser!(u8).range(MIN_BEDROOMS as i64..=MAX_BEDROOMS as i64))]
        bedrooms: u8,

        /// Annual asking price; commas and underscores are ignored
        #[arg(allow_negative_numbers = true, value_parser = parse_amount)]
        asking: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Compare rent across tiers for a bedroom count
    Compare {
        /// Number of bedrooms (1-4)
        #[arg(value_parser = clap::value_parser!(u8).range(MIN_BEDROOMS as i64..=MAX_BEDROOMS as i64))]
        bedrooms: u8,

        /// Output format (tsv is not supported here)
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List every known area by tier
    Areas,
    /// Write a starter config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "rent-oracle")]
#[command(about = "Fair rent estimates and a Greed Meter for asking prices", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/rent-oracle/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Market dataset (.json, .yaml or .yml); overrides the config and the bundled data
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

fn parse_amount(s: &str) -> Result<f64, String> {
    let cleaned: String = s.chars().filter(|c| *c != ',' && *c != '_').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a number", s))
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Report a lookup or scoring failure and pick its exit code.
fn report(err: &RentError, table: &ReferenceTable) -> i32 {
    eprintln!("Error: {}", err);
    match err {
        RentError::NotFound(NotFound::Area(_)) => {
            eprintln!("{}", output::format_area_hint(table));
            EXIT_NOT_FOUND
        }
        RentError::NotFound(NotFound::Bedrooms { area, .. }) => {
            if let Ok(available) = table.bedrooms_for(area) {
                let list: Vec<_> = available.iter().map(|b| b.to_string()).collect();
                eprintln!("Available bedroom counts for {}: {}", area, list.join(", "));
            }
            EXIT_NOT_FOUND
        }
        RentError::InvalidInput(_) => EXIT_INVALID_INPUT,
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { force } = cli.command {
        let path = match config_path.map(Ok).unwrap_or_else(config::get_config_path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        if let Err(e) = config::write_starter_config(&path, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Config written to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // Load the market table: --data, then config, then the bundled dataset
    let table = match cli.data.or_else(|| config.data_path()) {
        Some(path) => market::load_table(&path),
        None => ReferenceTable::builtin(),
    };
    let table = match table {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Data error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };
    debug!(areas = table.areas().len(), "market table ready");

    let opts = OutputOptions::from_config(&config, cli.no_color);
    let estimator = Estimator::new(&table);

    let exit_code = match cli.command {
        Commands::Estimate {
            area,
            bedrooms,
            asking,
            format,
        } => match estimator.estimate(&area, bedrooms, asking) {
            Ok(estimate) => match format {
                Format::Text => {
                    println!("{}", output::format_estimate(&estimate, &opts));
                    EXIT_SUCCESS
                }
                Format::Tsv => {
                    println!("{}", output::format_tsv(&estimate));
                    EXIT_SUCCESS
                }
                Format::Json => match output::format_json(&estimate) {
                    Ok(json) => {
                        println!("{}", json);
                        EXIT_SUCCESS
                    }
                    Err(e) => {
                        eprintln!("Error: {:#}", e);
                        EXIT_DATA
                    }
                },
            },
            Err(e) => report(&e, &table),
        },
        Commands::Compare { bedrooms, format } => {
            let comparison = estimator.compare_tiers(bedrooms);
            match format {
                Format::Json => match output::format_json(&comparison) {
                    Ok(json) => {
                        println!("{}", json);
                        EXIT_SUCCESS
                    }
                    Err(e) => {
                        eprintln!("Error: {:#}", e);
                        EXIT_DATA
                    }
                },
                Format::Text | Format::Tsv => {
                    println!("{}", output::format_tiers(&comparison, &opts));
                    EXIT_SUCCESS
                }
            }
        }
        Commands::Areas => {
            println!("{}", output::format_areas(&table, &opts));
            EXIT_SUCCESS
        }
        Commands::Init { .. } => unreachable!("init is handled before the table loads"),
    };

    debug!(elapsed = ?start_time.elapsed(), exit_code, "done");
    std::process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,500,000"), Ok(1_500_000.0));
        assert_eq!(parse_amount("2_500_000.5"), Ok(2_500_000.5));
        assert_eq!(parse_amount("-5"), Ok(-5.0));
        assert!(parse_amount("lots").is_err());
    }

    #[test]
    fn test_estimate_args() {
        let cli = Cli::try_parse_from(["rent-oracle", "estimate", "Yaba", "1", "700000"]).unwrap();
        match cli.command {
            Commands::Estimate {
                area,
                bedrooms,
                asking,
                ..
            } => {
                assert_eq!(area, "Yaba");
                assert_eq!(bedrooms, 1);
                assert_eq!(asking, Some(700_000.0));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bedrooms_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["rent-oracle", "estimate", "Yaba", "5"]).is_err());
        assert!(Cli::try_parse_from(["rent-oracle", "compare", "0"]).is_err());
    }

    #[test]
    fn test_report_exit_codes() {
        let table = ReferenceTable::builtin().unwrap();
        let not_found: RentError = NotFound::Area("Atlantis".to_string()).into();
        assert_eq!(report(&not_found, &table), EXIT_NOT_FOUND);
        let invalid: RentError = rent_oracle::InvalidInput::NonPositiveAsking(0.0).into();
        assert_eq!(report(&invalid, &table), EXIT_INVALID_INPUT);
    }
}
