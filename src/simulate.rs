//! Synthetic populations for cross-checking the closed-form estimator.
//!
//! Draws a log-normal sample from a [`PopulationModel`] and measures the
//! empirical fraction at or below an observation. With enough draws this
//! converges to [`estimate_percentile`](crate::estimator::estimate_percentile)
//! before clamping, which makes a sign or scale error in the CDF show up
//! immediately.
//!
//! # Reproducibility
//!
//! Use [`create_rng`] with a fixed seed. `SmallRng` is deterministic for a
//! given seed on the same platform.

use std::f64::consts::TAU;

use rand::Rng;

use crate::population::PopulationModel;

/// Creates a fast, seeded random number generator.
///
/// # Examples
/// ```
/// use wealthrank::simulate::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!((0.0..1.0).contains(&x));
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Draws one standard normal deviate.
///
/// # Algorithm
/// Box–Muller transform, keeping the cosine branch only.
/// Reference: Box & Muller (1958), "A Note on the Generation of Random
/// Normal Deviates", *Ann. Math. Statist.* 29(2).
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // u1 ∈ (0, 1] keeps ln(u1) finite
    let u1 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Draws `n` values from the model's log-normal distribution.
///
/// # Examples
/// ```
/// use wealthrank::population::PopulationModel;
/// use wealthrank::simulate::{create_rng, draw_population};
///
/// let model = PopulationModel::new(45_000.0, 0.8, 331_900_000).unwrap();
/// let sample = draw_population(&model, 1_000, &mut create_rng(7));
/// assert_eq!(sample.len(), 1_000);
/// assert!(sample.iter().all(|&x| x > 0.0));
/// ```
pub fn draw_population<R: Rng>(model: &PopulationModel, n: usize, rng: &mut R) -> Vec<f64> {
    let distribution = model.distribution();
    let (mu, sigma) = (distribution.mu(), distribution.sigma());
    (0..n)
        .map(|_| (mu + sigma * standard_normal(rng)).exp())
        .collect()
}

/// Fraction of `sample` at or below `value`.
///
/// # Returns
/// - `None` if `sample` is empty or `value` is NaN.
///
/// # Complexity
/// O(n log n) for the sort, then O(log n) binary search.
///
/// # Examples
/// ```
/// use wealthrank::simulate::empirical_percentile;
/// let sample = [5.0, 1.0, 3.0, 2.0];
/// assert_eq!(empirical_percentile(&sample, 2.0), Some(0.5));
/// assert_eq!(empirical_percentile(&sample, 0.5), Some(0.0));
/// assert_eq!(empirical_percentile(&[], 1.0), None);
/// ```
pub fn empirical_percentile(sample: &[f64], value: f64) -> Option<f64> {
    if sample.is_empty() || value.is_nan() {
        return None;
    }
    let mut sorted = sample.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let at_or_below = sorted.partition_point(|&x| x <= value);
    Some(at_or_below as f64 / sorted.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::estimate_percentile;
    use crate::population::{CountryTable, Quantity};

    #[test]
    fn test_same_seed_same_sample() {
        let model = PopulationModel::new(31_000.0, 0.65, 67_330_000).unwrap();
        let a = draw_population(&model, 100, &mut create_rng(42));
        let b = draw_population(&model, 100, &mut create_rng(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_draws_are_positive_and_finite() {
        let model = PopulationModel::new(15_000_000.0, 0.9, 125_700_000).unwrap();
        let sample = draw_population(&model, 10_000, &mut create_rng(1));
        assert!(sample.iter().all(|x| x.is_finite() && *x > 0.0));
    }

    #[test]
    fn test_empirical_percentile_bounds() {
        let sample = [1.0, 2.0, 3.0];
        assert_eq!(empirical_percentile(&sample, 100.0), Some(1.0));
        assert_eq!(empirical_percentile(&sample, 3.0), Some(1.0));
        assert_eq!(empirical_percentile(&sample, f64::NAN), None);
    }

    #[test]
    fn test_sample_median_near_model_median() {
        let model = PopulationModel::new(35_000.0, 0.7, 1_411_750_000).unwrap();
        let sample = draw_population(&model, 50_000, &mut create_rng(3));
        let below = empirical_percentile(&sample, 35_000.0).unwrap();
        assert!((below - 0.5).abs() < 0.01, "fraction below median: {below}");
    }

    #[test]
    fn test_closed_form_agrees_with_simulation() {
        let table = CountryTable::builtin();
        let mut rng = create_rng(2024);
        for profile in table.iter() {
            for quantity in Quantity::ALL {
                let model = profile.model(quantity);
                let sample = draw_population(model, 100_000, &mut rng);
                for factor in [0.25, 0.5, 1.0, 2.0, 4.0] {
                    let value = model.median() * factor;
                    let closed =
                        estimate_percentile(value, model.median(), model.shape_parameter());
                    let empirical = empirical_percentile(&sample, value).unwrap();
                    assert!(
                        (closed - empirical).abs() < 0.01,
                        "{} {quantity} at {value}: closed {closed}, simulated {empirical}",
                        profile.code()
                    );
                }
            }
        }
    }
}
