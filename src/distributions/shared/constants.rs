// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Mathematical Constants Module** - *High-Precision Constants for Distribution Kernels*
//!
//! Coefficient tables and mathematical constants backing the scalar
//! special-function kernels. All tables are stored at double precision and
//! lifted into the working precision type at the point of use via
//! [`Precision::of`](crate::precision::Precision::of); the narrower types
//! round once per coefficient, which keeps a single source of truth for
//! every precision level.

/// Acklam's inverse normal CDF approximation coefficients (central region numerator).
///
/// Rational function coefficients for computing the inverse standard normal
/// cumulative distribution function Φ⁻¹(p) using Peter John Acklam's minimax
/// rational approximation. Covers the central probability region
/// `0.02425 < p < 0.97575` with relative error below 1.15e-9.
pub(crate) const A: [f64; 6] = [
    -3.969683028665376e+01,
    2.209460984245205e+02,
    -2.759285104469687e+02,
    1.383577518672690e+02,
    -3.066479806614716e+01,
    2.506628277459239e+00,
];

/// Acklam's inverse normal CDF approximation coefficients (central region denominator).
///
/// Denominator polynomial paired with [`A`] to form the complete central-region
/// rational approximation for normal quantile computation.
pub(crate) const B: [f64; 5] = [
    -5.447609879822406e+01,
    1.615858368580409e+02,
    -1.556989798598866e+02,
    6.680131188771972e+01,
    -1.328068155288572e+01,
];

/// Acklam's inverse normal CDF approximation coefficients (tail region numerator).
///
/// Specialised coefficients for the extreme tails where `p < 0.02425` or
/// `p > 0.97575`, beyond roughly ±2σ from the mean.
pub(crate) const C: [f64; 6] = [
    -7.784894002430293e-03,
    -3.223964580411365e-01,
    -2.400758277161838e+00,
    -2.549732539343734e+00,
    4.374664141464968e+00,
    2.938163982698783e+00,
];

/// Acklam's inverse normal CDF approximation coefficients (tail region denominator).
///
/// Denominator polynomial paired with [`C`] for the tail-region rational
/// approximation.
pub(crate) const D: [f64; 4] = [
    7.784695709041462e-03,
    3.224671290700398e-01,
    2.445134137142996e+00,
    3.754408661907416e+00,
];

/// Probability breakpoint between the central and tail branches of Acklam's
/// inverse normal approximation (≈ 2σ).
pub(crate) const P_LOW: f64 = 0.02425; // upper break-point is 1.0 - P_LOW

/// Lanczos approximation coefficients for high-precision log-gamma evaluation.
///
/// Coefficient array for the Lanczos approximation with auxiliary parameter
/// g = 7 and n = 9 terms, achieving near machine precision across the positive
/// real domain (negative arguments go through the reflection formula).
pub(crate) const COF: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Natural logarithm of π: ln(π) ≈ 1.144729885849400.
///
/// Used by the log-gamma reflection formula for arguments below one half.
pub const LN_PI: f64 = 1.1447298858494002;

/// Half of the natural logarithm of 2π: ½ln(2π) ≈ 0.918938533204673.
///
/// Leading constant of the Lanczos log-gamma approximation.
pub const HALF_LOG_TWO_PI: f64 = 0.918_938_533_204_672_741_780_329_736_406;
