// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Precision Abstraction** - *Floating-Point Genericity for Distribution Kernels*
//!
//! Every kernel in this crate is written once, generically, and instantiated at
//! three precision levels: half (`f16`, behind the on-by-default `f16` feature),
//! single (`f32`) and double (`f64`). The [`Precision`] trait is the bound that
//! makes this possible: `num_traits::Float + FloatConst` supply the arithmetic
//! and the mathematical constants, and the single extra method [`Precision::of`]
//! lifts `f64` coefficient literals (Lanczos tables, Acklam polynomials,
//! branch thresholds) into the working type.
//!
//! Iteration tolerances are never hard-coded to double precision: kernels derive
//! them from `Self::epsilon()` and `Self::min_positive_value()`, so the same
//! Newton loop converges at every precision level.

use std::fmt::{Debug, Display};

use num_traits::{Float, FloatConst};

/// Floating-point bound for all distribution kernels in this crate.
///
/// Implemented for `f64`, `f32`, and (with the `f16` feature) `half::f16`.
/// The trait is deliberately small: everything numerical comes from
/// [`num_traits::Float`] and [`num_traits::FloatConst`]; the only addition is
/// an explicit, infallible lift for `f64` literals. Each implementation spells
/// the lift out per type, so no fallible `NumCast` round-trip sits on the hot
/// path.
///
/// `Send + Sync + 'static` are part of the bound so constructed distributions
/// are shareable across threads by construction.
pub trait Precision: Float + FloatConst + Debug + Display + Send + Sync + 'static {
    /// Lifts an `f64` literal into this precision.
    ///
    /// Lossy for narrower types; values below the target type's smallest
    /// positive normal flush to zero, which the kernels rely on for
    /// precision-scaled branch thresholds (an `f64` cutoff like `1e-200`
    /// simply disables its branch at `f32` and `f16`).
    fn of(v: f64) -> Self;
}

impl Precision for f64 {
    #[inline(always)]
    fn of(v: f64) -> Self {
        v
    }
}

impl Precision for f32 {
    #[inline(always)]
    fn of(v: f64) -> Self {
        v as f32
    }
}

#[cfg(feature = "f16")]
impl Precision for half::f16 {
    #[inline(always)]
    fn of(v: f64) -> Self {
        half::f16::from_f64(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lift_is_exact_for_f64() {
        assert_eq!(f64::of(0.6826894921370859), 0.6826894921370859);
    }

    #[test]
    fn lift_rounds_to_nearest_for_f32() {
        assert_eq!(f32::of(0.5), 0.5_f32);
        assert_eq!(f32::of(1.0 / 3.0), (1.0_f64 / 3.0) as f32);
    }

    #[test]
    fn sub_normal_thresholds_flush_to_zero_when_narrow() {
        // Branch cutoffs written for f64 must vanish (not wrap or saturate)
        // at narrower precisions.
        assert_eq!(f32::of(1e-200), 0.0_f32);
        assert!(f64::of(1e-200) > 0.0);
    }

    #[cfg(feature = "f16")]
    #[test]
    fn lift_reaches_f16() {
        use half::f16;
        assert_eq!(f16::of(2.0), f16::from_f64(2.0));
        assert_eq!(f16::of(1e-200), f16::from_f64(0.0));
    }
}
