//! Probability distributions.
//!
//! Validated normal and log-normal distribution types with analytical
//! moments and CDF/inverse-CDF evaluation.
//!
//! | Distribution | Parameters | Median | Mean |
//! |---|---|---|---|
//! | [`Normal`] | μ, σ | μ | μ |
//! | [`LogNormal`] | μ, σ (of ln X) | exp(μ) | exp(μ+σ²/2) |
//!
//! Income and wealth models are usually quoted by their median rather than
//! μ, so [`LogNormal::from_median`] anchors the distribution at `median`
//! with `μ = ln(median)`.

use thiserror::Error;

use crate::special;

/// Error type for invalid distribution parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    /// Parameters violate distribution constraints.
    #[error("invalid distribution parameters: {0}")]
    InvalidParameters(String),
}

// ============================================================================
// Normal Distribution
// ============================================================================

/// Normal (Gaussian) distribution N(μ, σ²).
///
/// - PDF: φ(x) = (1/(σ√(2π))) exp(−(x−μ)²/(2σ²))
/// - CDF: Φ((x−μ)/σ)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mu: f64,
    sigma: f64,
}

impl Normal {
    /// Creates a new normal distribution N(μ, σ).
    ///
    /// # Errors
    /// Returns `Err` if `sigma ≤ 0` or parameters are not finite.
    pub fn new(mu: f64, sigma: f64) -> Result<Self, DistributionError> {
        if !mu.is_finite() || !sigma.is_finite() || sigma <= 0.0 {
            return Err(DistributionError::InvalidParameters(format!(
                "Normal requires finite μ and σ > 0, got μ={mu}, σ={sigma}"
            )));
        }
        Ok(Self { mu, sigma })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Standard score `(x − μ)/σ`.
    pub fn z_score(&self, x: f64) -> f64 {
        (x - self.mu) / self.sigma
    }

    pub fn pdf(&self, x: f64) -> f64 {
        special::standard_normal_pdf(self.z_score(x)) / self.sigma
    }

    pub fn cdf(&self, x: f64) -> f64 {
        special::standard_normal_cdf(self.z_score(x))
    }

    /// Inverse CDF (quantile): μ + σ·Φ⁻¹(p).
    ///
    /// Returns `None` if `p` is outside `(0, 1)`.
    pub fn quantile(&self, p: f64) -> Option<f64> {
        if p.is_nan() || p <= 0.0 || p >= 1.0 {
            return None;
        }
        Some(self.mu + self.sigma * special::inverse_normal_cdf(p))
    }
}

// ============================================================================
// LogNormal Distribution
// ============================================================================

/// Log-normal distribution: if X ~ LogNormal(μ, σ), then ln(X) ~ N(μ, σ²).
///
/// - CDF: Φ((ln(x)−μ)/σ) for x > 0, 0 otherwise
/// - Median: exp(μ)
/// - Mean: exp(μ + σ²/2)
/// - Variance: (exp(σ²) − 1) · exp(2μ + σ²)
///
/// Reference: Johnson, Kotz & Balakrishnan (1994), *Continuous Univariate
/// Distributions*, Vol. 1, Chapter 14.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNormal {
    log: Normal,
}

impl LogNormal {
    /// Creates a log-normal distribution from the mean and standard deviation
    /// of ln(X).
    ///
    /// # Errors
    /// Returns `Err` if `sigma ≤ 0` or parameters are not finite.
    pub fn new(mu: f64, sigma: f64) -> Result<Self, DistributionError> {
        Normal::new(mu, sigma)
            .map(|log| Self { log })
            .map_err(|_| {
                DistributionError::InvalidParameters(format!(
                    "LogNormal requires finite μ and σ > 0, got μ={mu}, σ={sigma}"
                ))
            })
    }

    /// Creates a log-normal distribution whose median is `median`.
    ///
    /// # Errors
    /// Returns `Err` if `median ≤ 0`, `sigma ≤ 0`, or either is not finite.
    ///
    /// # Examples
    /// ```
    /// use wealthrank::distributions::LogNormal;
    /// let incomes = LogNormal::from_median(35_000.0, 0.7).unwrap();
    /// assert!((incomes.cdf(35_000.0) - 0.5).abs() < 1e-7);
    /// assert!(LogNormal::from_median(0.0, 0.7).is_err());
    /// ```
    pub fn from_median(median: f64, sigma: f64) -> Result<Self, DistributionError> {
        if !median.is_finite() || median <= 0.0 {
            return Err(DistributionError::InvalidParameters(format!(
                "LogNormal requires a finite median > 0, got {median}"
            )));
        }
        Self::new(median.ln(), sigma)
    }

    pub fn mu(&self) -> f64 {
        self.log.mu()
    }

    pub fn sigma(&self) -> f64 {
        self.log.sigma()
    }

    /// Median = exp(μ).
    pub fn median(&self) -> f64 {
        self.mu().exp()
    }

    /// Mean = exp(μ + σ²/2).
    pub fn mean(&self) -> f64 {
        (self.mu() + self.sigma() * self.sigma() / 2.0).exp()
    }

    /// Variance = (exp(σ²) − 1) · exp(2μ + σ²).
    pub fn variance(&self) -> f64 {
        let s2 = self.sigma() * self.sigma();
        (s2.exp() - 1.0) * (2.0 * self.mu() + s2).exp()
    }

    /// Standard score of ln(x) under the underlying normal.
    ///
    /// `-∞` for `x = 0`, NaN for negative `x`.
    pub fn z_score(&self, x: f64) -> f64 {
        self.log.z_score(x.ln())
    }

    /// PDF for x > 0.
    pub fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        special::standard_normal_pdf(self.z_score(x)) / (x * self.sigma())
    }

    /// CDF: Φ((ln(x)−μ)/σ) for x > 0.
    pub fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        special::standard_normal_cdf(self.z_score(x))
    }

    /// Inverse CDF: exp(μ + σ·Φ⁻¹(p)).
    ///
    /// Returns `None` if `p` is outside `(0, 1)`.
    pub fn quantile(&self, p: f64) -> Option<f64> {
        self.log.quantile(p).map(f64::exp)
    }
}
