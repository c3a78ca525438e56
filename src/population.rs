//! Population models and the per-country configuration table.
//!
//! A [`CountryTable`] is read-only input to the estimator: one
//! [`CountryProfile`] per country, each carrying a log-normal
//! [`PopulationModel`] for income and one for wealth. All validation happens
//! when the table is built, so a profile obtained from a table always holds
//! usable models.
//!
//! Tables come either from [`CountryTable::builtin`] or from a JSON array of
//! [`CountryRecord`] objects:
//!
//! ```json
//! [
//!   {
//!     "code": "CN",
//!     "display_name": "China",
//!     "currency_symbol": "¥",
//!     "population_size": 1411750000,
//!     "median_income": 35000,
//!     "median_wealth": 120000,
//!     "income_shape_parameter": 0.7,
//!     "wealth_shape_parameter": 1.1
//!   }
//! ]
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distributions::LogNormal;
use crate::error::{ConfigError, Result};

/// The quantity being ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    /// Annual pre-tax personal income.
    Income,
    /// Total household net worth.
    Wealth,
}

impl Quantity {
    pub const ALL: [Quantity; 2] = [Quantity::Income, Quantity::Wealth];
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Income => f.write_str("income"),
            Quantity::Wealth => f.write_str("wealth"),
        }
    }
}

/// Log-normal distribution of one quantity across a population of
/// `population_size` individuals.
///
/// Invariants: `median > 0`, `shape_parameter > 0` (both finite) and
/// `population_size >= 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationModel {
    median: f64,
    distribution: LogNormal,
    population_size: u64,
}

impl PopulationModel {
    /// # Errors
    /// [`ConfigError::EmptyPopulation`] for a zero population and
    /// [`ConfigError::Model`] for a non-positive or non-finite median or
    /// shape parameter.
    ///
    /// # Examples
    /// ```
    /// use wealthrank::population::PopulationModel;
    /// let model = PopulationModel::new(35_000.0, 0.7, 1_411_750_000).unwrap();
    /// assert_eq!(model.median(), 35_000.0);
    /// assert!(PopulationModel::new(35_000.0, -0.7, 1_000).is_err());
    /// ```
    pub fn new(median: f64, shape_parameter: f64, population_size: u64) -> Result<Self> {
        if population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        let distribution = LogNormal::from_median(median, shape_parameter)?;
        Ok(Self {
            median,
            distribution,
            population_size,
        })
    }

    pub fn median(&self) -> f64 {
        self.median
    }

    pub fn shape_parameter(&self) -> f64 {
        self.distribution.sigma()
    }

    pub fn population_size(&self) -> u64 {
        self.population_size
    }

    pub fn distribution(&self) -> &LogNormal {
        &self.distribution
    }
}

/// Serialized form of one country's constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub code: String,
    pub display_name: String,
    pub currency_symbol: String,
    pub population_size: u64,
    pub median_income: f64,
    pub median_wealth: f64,
    pub income_shape_parameter: f64,
    pub wealth_shape_parameter: f64,
}

/// A validated country entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryProfile {
    record: CountryRecord,
    income: PopulationModel,
    wealth: PopulationModel,
}

impl TryFrom<CountryRecord> for CountryProfile {
    type Error = ConfigError;

    /// Normalizes the code to trimmed upper case and validates both models.
    fn try_from(mut record: CountryRecord) -> Result<Self> {
        record.code = record.code.trim().to_ascii_uppercase();
        if record.code.is_empty() {
            return Err(ConfigError::MissingCode);
        }

        let model = |quantity: Quantity, median: f64, shape: f64| {
            PopulationModel::new(median, shape, record.population_size).map_err(|source| {
                ConfigError::InvalidCountry {
                    code: record.code.clone(),
                    quantity,
                    source: Box::new(source),
                }
            })
        };
        let income = model(
            Quantity::Income,
            record.median_income,
            record.income_shape_parameter,
        )?;
        let wealth = model(
            Quantity::Wealth,
            record.median_wealth,
            record.wealth_shape_parameter,
        )?;

        Ok(Self {
            record,
            income,
            wealth,
        })
    }
}

impl CountryProfile {
    pub fn code(&self) -> &str {
        &self.record.code
    }

    pub fn display_name(&self) -> &str {
        &self.record.display_name
    }

    pub fn currency_symbol(&self) -> &str {
        &self.record.currency_symbol
    }

    pub fn population_size(&self) -> u64 {
        self.record.population_size
    }

    pub fn model(&self, quantity: Quantity) -> &PopulationModel {
        match quantity {
            Quantity::Income => &self.income,
            Quantity::Wealth => &self.wealth,
        }
    }

    pub fn record(&self) -> &CountryRecord {
        &self.record
    }
}

/// Ordered, read-only set of country profiles with unique codes.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryTable {
    profiles: Vec<CountryProfile>,
}

impl CountryTable {
    /// Validates every record and rejects duplicate codes (compared after
    /// upper-casing) and empty tables.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = CountryRecord>,
    {
        let mut seen = HashSet::new();
        let mut profiles = Vec::new();
        for record in records {
            let profile = CountryProfile::try_from(record)?;
            if !seen.insert(profile.code().to_owned()) {
                return Err(ConfigError::DuplicateCountry(profile.code().to_owned()));
            }
            profiles.push(profile);
        }
        if profiles.is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        debug!(countries = profiles.len(), "country table built");
        Ok(Self { profiles })
    }

    /// The five countries shipped with the application.
    pub fn builtin() -> Self {
        Self::from_records(builtin_records()).expect("built-in country table is valid")
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<CountryRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Reads a JSON country table from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&json)?;
        debug!(path = %path.display(), countries = table.len(), "loaded country table");
        Ok(table)
    }

    /// Case-insensitive lookup by country code.
    pub fn get(&self, code: &str) -> Option<&CountryProfile> {
        let code = code.trim();
        self.profiles
            .iter()
            .find(|p| p.code().eq_ignore_ascii_case(code))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountryProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    code: &str,
    display_name: &str,
    currency_symbol: &str,
    population_size: u64,
    median_income: f64,
    median_wealth: f64,
    income_shape_parameter: f64,
    wealth_shape_parameter: f64,
) -> CountryRecord {
    CountryRecord {
        code: code.to_owned(),
        display_name: display_name.to_owned(),
        currency_symbol: currency_symbol.to_owned(),
        population_size,
        median_income,
        median_wealth,
        income_shape_parameter,
        wealth_shape_parameter,
    }
}

fn builtin_records() -> Vec<CountryRecord> {
    vec![
        record("CN", "China", "¥", 1_411_750_000, 35_000.0, 120_000.0, 0.7, 1.1),
        record("US", "United States", "$", 331_900_000, 45_000.0, 190_000.0, 0.8, 1.5),
        record("JP", "Japan", "¥", 125_700_000, 4_000_000.0, 15_000_000.0, 0.6, 0.9),
        record("UK", "United Kingdom", "£", 67_330_000, 31_000.0, 150_000.0, 0.65, 1.2),
        record("DE", "Germany", "€", 83_200_000, 28_000.0, 110_000.0, 0.6, 1.1),
    ]
}
