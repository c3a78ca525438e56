use std::path::PathBuf;

use thiserror::Error;

use crate::distributions::DistributionError;
use crate::population::Quantity;

/// Errors raised while building population models or loading a country
/// table. These describe broken configuration, never a bad observation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid population model: {0}")]
    Model(#[from] DistributionError),

    #[error("population size must be at least 1")]
    EmptyPopulation,

    #[error("country {code}: invalid {quantity} model: {source}")]
    InvalidCountry {
        code: String,
        quantity: Quantity,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("country code must not be empty")]
    MissingCode,

    #[error("duplicate country code: {0}")]
    DuplicateCountry(String),

    #[error("country table is empty")]
    EmptyTable,

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed country table: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
