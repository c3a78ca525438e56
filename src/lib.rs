//! # wealthrank
//!
//! Where does an income or a net worth rank within a country?
//!
//! Each country's income and wealth are modelled as log-normal
//! distributions anchored at their medians. An observation maps to a
//! percentile through the log-normal CDF, and the percentile maps to an
//! estimated absolute rank in the population.
//!
//! ## Modules
//!
//! - [`special`] — error function and standard normal CDF/quantile
//! - [`distributions`] — validated normal and log-normal distributions
//! - [`estimator`] — percentile, absolute rank and threshold estimation
//! - [`population`] — population models and the country table
//! - [`report`] — combined income and wealth ranking for one country
//! - [`simulate`] — synthetic populations for Monte Carlo cross-checks
//!
//! ## Example
//!
//! ```
//! use wealthrank::{estimate_absolute_rank, estimate_percentile};
//!
//! // Twice the median income, shape 0.7: z = ln 2 / 0.7 ≈ 0.99
//! let p = estimate_percentile(70_000.0, 35_000.0, 0.7);
//! assert!((p - 0.839).abs() < 1e-3);
//!
//! let rank = estimate_absolute_rank(p, 1_411_750_000);
//! assert!(rank > 220_000_000 && rank < 235_000_000);
//! ```
//!
//! ## Design
//!
//! - **Pure and total**: estimation never fails. Degenerate observations
//!   fall back to the lowest percentile; the caller can inspect
//!   [`Estimation::clamped`].
//! - **Fail fast on configuration**: invalid medians, shape parameters or
//!   population sizes are rejected when a [`PopulationModel`] or
//!   [`CountryTable`] is built.

pub mod distributions;
pub mod error;
pub mod estimator;
pub mod population;
pub mod report;
pub mod simulate;
pub mod special;

pub use error::ConfigError;
pub use estimator::{
    estimate, estimate_absolute_rank, estimate_percentile, estimate_threshold, Estimation,
};
pub use population::{CountryProfile, CountryRecord, CountryTable, PopulationModel, Quantity};
pub use report::{QuantityRank, RankReport};
