//! wealthrank CLI - where an income and a net worth rank within a country.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;
use wealthrank::{
    estimate_threshold, CountryProfile, CountryTable, Quantity, QuantityRank, RankReport,
};

#[derive(Parser)]
#[command(name = "wealthrank")]
#[command(version)]
#[command(about = "Estimate income and wealth percentile ranks within a country")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON country table to use instead of the built-in one
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank an income and a net worth within a country
    Rank {
        /// Country code, e.g. CN or US
        #[arg(long)]
        country: String,

        /// Annual pre-tax personal income
        #[arg(long, allow_negative_numbers = true)]
        income: f64,

        /// Total household net worth
        #[arg(long, allow_negative_numbers = true)]
        wealth: f64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Income and net worth needed to reach the top share of a country
    Threshold {
        /// Country code, e.g. CN or US
        #[arg(long)]
        country: String,

        /// Top share of the population, in percent
        #[arg(long, default_value_t = 1.0)]
        top: f64,
    },

    /// List the configured countries
    Countries,
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let table = match &cli.config {
        Some(path) => CountryTable::load(path)
            .with_context(|| format!("loading country table from {}", path.display()))?,
        None => CountryTable::builtin(),
    };
    debug!(countries = table.len(), "country table ready");

    match cli.command {
        Commands::Rank {
            country,
            income,
            wealth,
            json,
        } => {
            let profile = lookup(&table, &country)?;
            let report = RankReport::assess(profile, income, wealth);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Threshold { country, top } => {
            let profile = lookup(&table, &country)?;
            print_thresholds(profile, top)?;
        }
        Commands::Countries => {
            for profile in table.iter() {
                println!(
                    "{}  {:<16} {}  population {}",
                    profile.code(),
                    profile.display_name(),
                    profile.currency_symbol(),
                    format_short_scale(profile.population_size()),
                );
            }
        }
    }

    Ok(())
}

fn lookup<'a>(table: &'a CountryTable, code: &str) -> Result<&'a CountryProfile> {
    table.get(code).with_context(|| {
        let known: Vec<_> = table.iter().map(|p| p.code()).collect();
        format!("unknown country {code:?} (known: {})", known.join(", "))
    })
}

fn label(quantity: Quantity) -> &'static str {
    match quantity {
        Quantity::Income => "Annual income",
        Quantity::Wealth => "Household net worth",
    }
}

fn print_report(report: &RankReport) {
    println!(
        "{} ({}), population {}",
        report.country_name,
        report.country_code,
        format_short_scale(report.population_size)
    );
    for rank in report.ranks() {
        println!();
        print_rank(rank, &report.currency_symbol);
    }
    println!();
    println!(
        "Estimates assume log-normal distributions fitted to national medians; \
         they are not a lookup of real tax records."
    );
}

fn print_rank(rank: &QuantityRank, currency: &str) {
    let estimation = &rank.estimation;
    println!(
        "{}: {currency}{}",
        label(rank.quantity),
        format_amount(rank.value)
    );
    println!(
        "  better than {:.1}% of the population (Top {:.1}%)",
        estimation.better_than_percent(),
        estimation.top_percent()
    );
    println!(
        "  estimated absolute rank: #{}",
        format_short_scale(estimation.absolute_rank)
    );
    if estimation.clamped {
        println!("  (at the limit of what the model can resolve)");
    }
}

fn print_thresholds(profile: &CountryProfile, top: f64) -> Result<()> {
    if !(top > 0.0 && top < 100.0) {
        bail!("top share must be strictly between 0 and 100, got {top}");
    }
    let percentile = 1.0 - top / 100.0;
    println!(
        "{} ({}): entry level for the top {top}%",
        profile.display_name(),
        profile.code()
    );
    for quantity in Quantity::ALL {
        let model = profile.model(quantity);
        let threshold = estimate_threshold(percentile, model.median(), model.shape_parameter())
            .with_context(|| format!("no {quantity} threshold for percentile {percentile}"))?;
        println!(
            "  {}: {}{}",
            label(quantity),
            profile.currency_symbol(),
            format_amount(threshold)
        );
    }
    Ok(())
}

/// Groups digits in threes: `1411750000` → `1,411,750,000`.
fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Whole-unit amount with thousands separators.
fn format_amount(value: f64) -> String {
    if !value.is_finite() || value.abs() >= 1e18 {
        return format!("{value:e}");
    }
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{}", format_thousands(rounded.abs() as u64))
}

/// Short-scale abbreviation for large counts: `705875000` → `705.88M`.
fn format_short_scale(n: u64) -> String {
    let x = n as f64;
    if x >= 1e9 {
        format!("{:.2}B", x / 1e9)
    } else if x >= 1e6 {
        format!("{:.2}M", x / 1e6)
    } else if x >= 1e4 {
        format!("{:.1}K", x / 1e3)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_rank_with_negative_wealth() {
        let cli = Cli::try_parse_from([
            "wealthrank",
            "rank",
            "--country",
            "cn",
            "--income",
            "70000",
            "--wealth",
            "-5000",
        ])
        .unwrap();
        match cli.command {
            Commands::Rank {
                country,
                income,
                wealth,
                json,
            } => {
                assert_eq!(country, "cn");
                assert_eq!(income, 70_000.0);
                assert_eq!(wealth, -5_000.0);
                assert!(!json);
            }
            _ => panic!("expected rank command"),
        }
    }

    #[test]
    fn test_infinite_income_ranks_at_the_top() {
        let cli = Cli::try_parse_from([
            "wealthrank", "rank", "--country", "US", "--income", "inf", "--wealth", "0",
        ])
        .unwrap();
        let Commands::Rank { income, wealth, .. } = cli.command else {
            panic!("expected rank command");
        };
        let table = CountryTable::builtin();
        let report = RankReport::assess(table.get("US").unwrap(), income, wealth);
        let income_rank = report.get(Quantity::Income);
        assert_eq!(income_rank.estimation.percentile, wealthrank::estimator::PERCENTILE_CEILING);
        assert!(income_rank.estimation.better_than_percent() > 99.0);
    }

    #[test]
    fn test_parse_global_config() {
        let cli =
            Cli::try_parse_from(["wealthrank", "countries", "--config", "table.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("table.json")));
        assert!(matches!(cli.command, Commands::Countries));
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(1_411_750_000), "1,411,750,000");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(70_000.4), "70,000");
        assert_eq!(format_amount(-5_000.0), "-5,000");
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(f64::INFINITY), "inf");
    }

    #[test]
    fn test_format_short_scale() {
        assert_eq!(format_short_scale(1_411_750_000), "1.41B");
        assert_eq!(format_short_scale(705_875_000), "705.88M");
        assert_eq!(format_short_scale(12_345), "12.3K");
        assert_eq!(format_short_scale(9_999), "9999");
    }

    #[test]
    fn test_lookup_lists_known_codes() {
        let table = CountryTable::builtin();
        assert_eq!(lookup(&table, "de").unwrap().code(), "DE");
        let err = lookup(&table, "FR").unwrap_err().to_string();
        assert!(err.contains("CN, US, JP, UK, DE"), "{err}");
    }

    #[test]
    fn test_threshold_rejects_bad_share() {
        let table = CountryTable::builtin();
        let profile = table.get("US").unwrap();
        assert!(print_thresholds(profile, 0.0).is_err());
        assert!(print_thresholds(profile, 100.0).is_err());
        assert!(print_thresholds(profile, f64::NAN).is_err());
        assert!(print_thresholds(profile, 10.0).is_ok());
    }
}
