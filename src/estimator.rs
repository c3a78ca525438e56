//! Percentile and rank estimation under a log-normal population model.
//!
//! Both estimators are total: every input, however degenerate, yields a
//! number. Observations at or below [`OBSERVATION_FLOOR`], NaN observations
//! and invalid model parameters produce [`PERCENTILE_FLOOR`], the most
//! conservative estimate. Everything else is clamped into
//! `[PERCENTILE_FLOOR, PERCENTILE_CEILING]`, so an infinite observation sits
//! on the ceiling and no one is reported as beyond the whole population.
//! [`Estimation::clamped`] tells the caller when a bound was hit.

use serde::Serialize;

use crate::distributions::LogNormal;
use crate::population::PopulationModel;

/// Lowest percentile ever reported.
pub const PERCENTILE_FLOOR: f64 = 0.0001;

/// Highest percentile ever reported.
pub const PERCENTILE_CEILING: f64 = 0.9999;

/// Observations at or below this value map straight to [`PERCENTILE_FLOOR`].
pub const OBSERVATION_FLOOR: f64 = 1.0;

/// Fraction of a log-normal population at or below `value`.
///
/// With `μ = ln(median)` and `z = (ln(value) − μ) / shape_parameter`, the
/// result is `Φ(z) = ½·(1 + erf(z/√2))`, the CDF of
/// [`LogNormal::from_median`], clamped into
/// `[PERCENTILE_FLOOR, PERCENTILE_CEILING]`.
///
/// Non-decreasing in `value` over the whole extended real line, and exactly
/// centred: `value == median` gives `0.5`. Values `<= 1` (including `−∞`),
/// NaN, and non-positive or non-finite model parameters give
/// [`PERCENTILE_FLOOR`]. `+∞` gives [`PERCENTILE_CEILING`].
///
/// # Examples
/// ```
/// use wealthrank::estimator::estimate_percentile;
/// assert!((estimate_percentile(35_000.0, 35_000.0, 0.7) - 0.5).abs() < 1e-6);
/// assert!((estimate_percentile(70_000.0, 35_000.0, 0.7) - 0.839).abs() < 1e-3);
/// assert_eq!(estimate_percentile(0.0, 35_000.0, 0.7), 0.0001);
/// assert_eq!(estimate_percentile(1e300, 35_000.0, 0.7), 0.9999);
/// assert_eq!(estimate_percentile(f64::INFINITY, 35_000.0, 0.7), 0.9999);
/// ```
pub fn estimate_percentile(value: f64, median: f64, shape_parameter: f64) -> f64 {
    if value.is_nan() || value <= OBSERVATION_FLOOR {
        return PERCENTILE_FLOOR;
    }
    let Ok(distribution) = LogNormal::from_median(median, shape_parameter) else {
        return PERCENTILE_FLOOR;
    };
    clamp_percentile(distribution.cdf(value))
}

/// NaN goes to the floor; everything else into
/// `[PERCENTILE_FLOOR, PERCENTILE_CEILING]`.
fn clamp_percentile(percentile: f64) -> f64 {
    if percentile.is_nan() {
        return PERCENTILE_FLOOR;
    }
    percentile.clamp(PERCENTILE_FLOOR, PERCENTILE_CEILING)
}

/// Estimated number of people ranked above `percentile` in a population of
/// `population_size`: `floor(population_size · (1 − percentile))`, at least 1
/// and at most `population_size`.
///
/// Non-increasing in `percentile`. Percentiles outside `[0, 1]` are clamped
/// into it; NaN ranks at the bottom. An empty population still reports 1.
///
/// # Examples
/// ```
/// use wealthrank::estimator::estimate_absolute_rank;
/// assert_eq!(estimate_absolute_rank(0.5, 1_411_750_000), 705_875_000);
/// assert_eq!(estimate_absolute_rank(1.0, 1_000), 1);
/// assert_eq!(estimate_absolute_rank(0.0, 1_000), 1_000);
/// ```
pub fn estimate_absolute_rank(percentile: f64, population_size: u64) -> u64 {
    if population_size == 0 {
        return 1;
    }
    let percentile = if percentile.is_nan() {
        0.0
    } else {
        percentile.clamp(0.0, 1.0)
    };
    let above = (population_size as f64 * (1.0 - percentile)).floor();
    (above as u64).clamp(1, population_size)
}

/// Observation value needed to reach `percentile`: `exp(μ + σ·Φ⁻¹(p))`.
///
/// Returns `None` if `percentile` is outside `(0, 1)` or the model
/// parameters are invalid.
///
/// # Examples
/// ```
/// use wealthrank::estimator::estimate_threshold;
/// let top_ten = estimate_threshold(0.9, 45_000.0, 0.8).unwrap();
/// assert!((top_ten - 45_000.0 * (0.8_f64 * 1.2815516).exp()).abs() < 1.0);
/// ```
pub fn estimate_threshold(percentile: f64, median: f64, shape_parameter: f64) -> Option<f64> {
    LogNormal::from_median(median, shape_parameter)
        .ok()?
        .quantile(percentile)
}

/// Percentile and absolute rank of one observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimation {
    /// Fraction of the population at or below the observation.
    pub percentile: f64,
    /// Estimated number of people ranked above the observation.
    pub absolute_rank: u64,
    /// True when `percentile` sits on the floor or ceiling.
    pub clamped: bool,
}

impl Estimation {
    /// Builds an estimate from a percentile, first clamped into
    /// `[PERCENTILE_FLOOR, PERCENTILE_CEILING]` (NaN to the floor).
    pub fn from_percentile(percentile: f64, population_size: u64) -> Self {
        let percentile = clamp_percentile(percentile);
        Self {
            percentile,
            absolute_rank: estimate_absolute_rank(percentile, population_size),
            clamped: percentile <= PERCENTILE_FLOOR || percentile >= PERCENTILE_CEILING,
        }
    }

    /// "Better than X% of the population."
    pub fn better_than_percent(&self) -> f64 {
        self.percentile * 100.0
    }

    /// "Top Y%", the share of the population at or above the observation.
    pub fn top_percent(&self) -> f64 {
        (1.0 - self.percentile) * 100.0
    }
}

/// Estimates percentile and absolute rank of `value` under `model`.
///
/// # Examples
/// ```
/// use wealthrank::estimator::estimate;
/// use wealthrank::population::PopulationModel;
///
/// let model = PopulationModel::new(35_000.0, 0.7, 1_411_750_000).unwrap();
/// let result = estimate(70_000.0, &model);
/// assert!((result.percentile - 0.839).abs() < 1e-3);
/// assert!(result.absolute_rank > 220_000_000 && result.absolute_rank < 235_000_000);
/// assert!(!result.clamped);
/// ```
pub fn estimate(value: f64, model: &PopulationModel) -> Estimation {
    let percentile = estimate_percentile(value, model.median(), model.shape_parameter());
    Estimation::from_percentile(percentile, model.population_size())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn median_fixes_point(median in 1.0001_f64..1e10, shape in 0.05_f64..3.0) {
            let p = estimate_percentile(median, median, shape);
            prop_assert!((p - 0.5).abs() < 1e-6, "f(m, m, {shape}) = {p}");
        }

        #[test]
        fn monotonic_in_value(
            v1 in 1.0_f64..1e9,
            v2 in 1.0_f64..1e9,
            median in 1e3_f64..1e7,
            shape in 0.1_f64..2.0,
        ) {
            let (lo, hi) = if v1 <= v2 { (v1, v2) } else { (v2, v1) };
            prop_assert!(
                estimate_percentile(lo, median, shape) <= estimate_percentile(hi, median, shape),
                "not monotonic between {lo} and {hi}"
            );
        }

        #[test]
        fn symmetric_in_log_space(
            k in 1.0001_f64..50.0,
            median in 1e3_f64..1e7,
            shape in 0.1_f64..2.0,
        ) {
            let sum = estimate_percentile(median * k, median, shape)
                + estimate_percentile(median / k, median, shape);
            prop_assert!((sum - 1.0).abs() < 1e-4, "sum = {sum}");
        }

        #[test]
        fn always_within_bounds(
            value in proptest::num::f64::ANY,
            median in proptest::num::f64::ANY,
            shape in proptest::num::f64::ANY,
        ) {
            let p = estimate_percentile(value, median, shape);
            prop_assert!((PERCENTILE_FLOOR..=PERCENTILE_CEILING).contains(&p), "p = {p}");
        }

        #[test]
        fn rank_monotonic_and_positive(
            p1 in 0.0_f64..=1.0,
            p2 in 0.0_f64..=1.0,
            population in 1_u64..10_000_000_000,
        ) {
            let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
            let rank_lo = estimate_absolute_rank(lo, population);
            let rank_hi = estimate_absolute_rank(hi, population);
            prop_assert!(rank_hi <= rank_lo);
            prop_assert!(rank_hi >= 1);
            prop_assert!(rank_lo <= population);
        }
    }
}
