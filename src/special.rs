//! Special mathematical functions.
//!
//! The error function family and the standard normal distribution, which
//! together give the log-normal CDF used by the percentile estimator.
//!
//! # Sign conventions
//!
//! `erf` is odd (`erf(−x) = −erf(x)`) and `erfc(−x) = 2 − erfc(x)`. Both are
//! derived from a single evaluation of `erfc(|x|)`, so the symmetry holds
//! exactly in floating point, not just to approximation accuracy.

use std::f64::consts::FRAC_1_SQRT_2;

/// 1/√(2π) ≈ 0.3989422804014327
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Evaluates `erfc(z)` for `z ≥ 0`.
///
/// Chebyshev-fitted exponential approximation from Press et al.,
/// *Numerical Recipes* (2nd ed.), §6.2 (`erfcc`). Fractional error
/// < 1.2 × 10⁻⁷.
///
/// The raw fit gives `erfc(0) ≈ 1 + 3·10⁻⁸`; capping at 1 pins `erfc(0) = 1`
/// and keeps erf and Φ monotone across zero.
fn erfc_upper(z: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87
                                    + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    (t * (-z * z + poly).exp()).min(1.0)
}

/// Complementary error function erfc(x) = 1 − erf(x).
///
/// Keeps full relative precision in the far tail, where `1.0 - erf(x)`
/// cancels to zero. Negative arguments use `erfc(−x) = 2 − erfc(x)`.
///
/// # Accuracy
/// Fractional error < 1.2 × 10⁻⁷ everywhere.
///
/// # Examples
/// ```
/// use wealthrank::special::erfc;
/// assert_eq!(erfc(0.0), 1.0);
/// assert!((erfc(1.0) - 0.1572992070).abs() < 1e-7);
/// assert!((erfc(-1.0) - 1.8427007930).abs() < 1e-7);
/// ```
pub fn erfc(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x >= 0.0 {
        erfc_upper(x)
    } else {
        2.0 - erfc_upper(-x)
    }
}

/// Error function erf(x) = (2/√π) ∫₀ˣ exp(−t²) dt.
///
/// Computed as `sign(x)·(1 − erfc(|x|))`, so `erf(−x) == −erf(x)` holds
/// bit for bit.
///
/// # Examples
/// ```
/// use wealthrank::special::erf;
/// assert_eq!(erf(0.0), 0.0);
/// assert!((erf(1.0) - 0.8427007929).abs() < 1e-6);
/// assert_eq!(erf(-0.5), -erf(0.5));
/// ```
pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let magnitude = 1.0 - erfc_upper(x.abs());
    if x.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Standard normal CDF Φ(x) = P(Z ≤ x) for Z ~ N(0,1).
///
/// Uses `Φ(x) = ½·erfc(−x/√2)`, which keeps full relative precision in the
/// lower tail. Equal to `½·(1 + erf(x/√2))`.
///
/// # Examples
/// ```
/// use wealthrank::special::standard_normal_cdf;
/// assert_eq!(standard_normal_cdf(0.0), 0.5);
/// assert!((standard_normal_cdf(1.96) - 0.975).abs() < 1e-4);
/// ```
pub fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

/// Standard normal PDF φ(x) = (1/√(2π)) exp(−x²/2).
pub fn standard_normal_pdf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Inverse standard normal CDF (quantile function).
///
/// Given `p ∈ (0, 1)`, returns `z` such that `Φ(z) = p`.
///
/// # Algorithm
/// P. J. Acklam's rational approximation: a central region
/// `|p − ½| ≤ ½ − p_low` and two tail regions in `√(−2 ln q)`.
///
/// # Accuracy
/// Relative error < 1.15 × 10⁻⁹.
///
/// # Returns
/// - `f64::NAN` if `p` is outside `[0, 1]` or NaN.
/// - `f64::NEG_INFINITY` if `p == 0.0`, `f64::INFINITY` if `p == 1.0`.
///
/// # Examples
/// ```
/// use wealthrank::special::inverse_normal_cdf;
/// assert_eq!(inverse_normal_cdf(0.5), 0.0);
/// assert!((inverse_normal_cdf(0.975) - 1.959964).abs() < 1e-5);
/// ```
pub fn inverse_normal_cdf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.024_25;

    let tail = |q: f64| {
        let num = ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
        let den = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
        num / den
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p > 1.0 - P_LOW {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    } else {
        let q = p - 0.5;
        let r = q * q;
        let num = (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q;
        let den = ((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0;
        num / den
    }
}
