// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Statistical Distributions Module** - *Probability Distribution Computing*
//!
//! Statistical distribution engines providing probability density functions
//! (PDFs), cumulative distribution functions (CDFs), survival functions,
//! quantile functions and closed-form moments with numerical precision
//! guarantees.
//!
//! ## Core Statistical Functions
//! Each distribution provides a complete statistical interface:
//! - **Probability density functions**: Log-space PDF evaluation with numerical stability
//! - **Cumulative distribution functions**: CDF computation via regularised incomplete gamma
//! - **Survival functions**: Dedicated upper-tail paths, never `1 - CDF` subtraction
//! - **Quantile functions**: Inverse CDF calculation using robust seeding and refinement
//! - **Moments**: Mean, variance, skewness, kurtosis and friends in closed form
//!
//! ## Computational Architecture
//! Distribution calculations employ established numerical techniques for accuracy:
//! - **Rational approximations**: Optimised polynomial and rational function approximations
//! - **Series expansions**: Convergent series with adaptive truncation for transcendental functions
//! - **Continued fractions**: Lentz evaluation for upper-tail incomplete gamma
//! - **Safeguarded Newton**: Bracketed, damped refinement for quantile inversion
//!
//! ### Precision Genericity
//! Every engine is generic over the working [`Precision`](crate::precision::Precision):
//! the same algorithms run at half, single and double precision, with iteration
//! tolerances derived from the working type's epsilon rather than hard-coded
//! double-precision constants.
//!
//! ### Error Philosophy
//! Invalid inputs are never silently absorbed: each evaluation consults the
//! engine's [`Policy`](crate::policy::Policy), which decides per error
//! category whether to raise, substitute a sentinel, or log and continue.
//!
//! ## Numerical Precision and Stability
//! All distribution implementations prioritise numerical accuracy across parameter ranges.
//! See `./tests` for specific tolerance requirements, where behaviour is measured against SciPy.
//! Whilst these pass on the development machine, platform specific differences may impact your
//! test results, and thus one should keep this in mind when evaluating this library's fit for your use case.
//!
//! ## Disclaimer
//! This implementation is provided on a best-effort basis and is intended for
//! general scientific and engineering use. While every attempt has been made to
//! match the accuracy and behaviour of established libraries such as SciPy, we
//! make no guarantees as to correctness, fitness for any particular purpose, or
//! suitability for uses such as in life-critical, safety-critical, or financial applications.
//!
//! Results may differ from other libraries due to platform, compiler, or implementation
//! differences. Edge cases and special values are handled explicitly for compatibility
//! with SciPy (v1.16) but users are responsible for independently verifying that these
//! functions meet their accuracy and reliability requirements.
//!
//! By using these functions, you accept all responsibility for outcomes or decisions
//! based upon its results.

/// # **Shared Distribution Utilities** - *Common Infrastructure for Distribution Computing*
///
/// Foundational utilities, constants, and special functions shared across all
/// probability distributions, providing consistent numerical methods.
///
/// ## Modules
/// - **`constants`**: Mathematical constants and rational approximation coefficients
/// - **`scalar`**: Precision-generic special functions
pub mod shared {
    pub mod constants;
    pub mod scalar;
}

/// # **Distribution Traits** - *Common Statistical Interface*
///
/// The [`Distribution`](traits::Distribution) and
/// [`ContinuousDistribution`](traits::ContinuousDistribution) traits shared by
/// every engine in this module.
pub mod traits;

/// # **Univariate Distributions** - *Single-Variable Probability Distributions*
///
/// Univariate probability distribution engines with full statistical function
/// implementations: density, cumulative, survival, quantile and moments.
pub mod univariate {
    pub mod chi_squared;
}
