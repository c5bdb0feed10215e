// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Distribution Traits** - *Common Interface for Probability Distributions*
//!
//! Object views over the distribution engines. [`Distribution`] covers the
//! closed-form summary statistics; [`ContinuousDistribution`] adds the density,
//! cumulative, survival and quantile surface. Everything is generic over the
//! working [`Precision`], so the same trait bounds serve half, single and
//! double precision engines.
//!
//! Point evaluations return [`DistResult`] because the configured numeric
//! policy decides whether an invalid input is an error or a sentinel; the
//! summary statistics are total functions of valid parameters, so they return
//! plain values.

use crate::errors::DistResult;
use crate::precision::Precision;

/// Common interface for all probability distributions.
///
/// Implementors guarantee the parameters were validated at construction, so
/// every method here is a closed-form expression over valid parameters.
pub trait Distribution<T: Precision> {
    /// Mean of the distribution.
    fn mean(&self) -> T;

    /// Variance of the distribution.
    fn variance(&self) -> T;

    /// Standard deviation of the distribution.
    fn std_dev(&self) -> T {
        self.variance().sqrt()
    }

    /// Median of the distribution.
    fn median(&self) -> T;

    /// Mode of the distribution.
    fn mode(&self) -> T;

    /// Skewness (third standardised moment).
    fn skewness(&self) -> T;

    /// Kurtosis (fourth standardised moment), i.e. 3 for a normal
    /// distribution.
    fn kurtosis(&self) -> T {
        self.kurtosis_excess() + T::of(3.0)
    }

    /// Excess kurtosis, i.e. kurtosis minus 3.
    fn kurtosis_excess(&self) -> T;

    /// Coefficient of variation, σ/μ.
    fn coefficient_of_variation(&self) -> T {
        self.std_dev() / self.mean()
    }
}

/// Interface for continuous probability distributions.
///
/// The fallible methods route invalid inputs through the distribution's
/// numeric policy: depending on configuration the same out-of-domain argument
/// surfaces as an `Err`, a sentinel value, or a logged sentinel. See
/// [`Policy`](crate::policy::Policy).
pub trait ContinuousDistribution<T: Precision>: Distribution<T> {
    /// Support of the distribution as `(lower, upper)` bounds, where density
    /// is non-zero only inside the closed interval.
    fn support(&self) -> (T, T);

    /// Probability density function at `x`.
    fn pdf(&self, x: T) -> DistResult<T>;

    /// Natural log of the probability density at `x`.
    ///
    /// Computed in log space throughout, so it stays finite where `pdf`
    /// itself underflows.
    fn ln_pdf(&self, x: T) -> DistResult<T>;

    /// Cumulative distribution function, P(X ≤ x).
    fn cdf(&self, x: T) -> DistResult<T>;

    /// Survival function, P(X > x).
    ///
    /// Evaluated on its own upper-tail path, keeping relative accuracy where
    /// `1 - cdf(x)` would cancel to zero.
    fn sf(&self, x: T) -> DistResult<T>;

    /// Quantile function (inverse CDF): the `x` with P(X ≤ x) = p.
    fn quantile(&self, p: T) -> DistResult<T>;

    /// Inverse survival function: the `x` with P(X > x) = q.
    fn isf(&self, q: T) -> DistResult<T>;

    /// Hazard rate, pdf(x) / sf(x).
    ///
    /// The default is the plain ratio; engines override it to route a
    /// vanished denominator through their numeric policy.
    fn hazard(&self, x: T) -> DistResult<T> {
        let density = self.pdf(x)?;
        let survival = self.sf(x)?;
        Ok(density / survival)
    }

    /// Cumulative hazard, −ln sf(x).
    fn chf(&self, x: T) -> DistResult<T> {
        let survival = self.sf(x)?;
        Ok(-survival.ln())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_bounds_compile() {
        // Verifies the trait surface composes under generic bounds. The
        // behavioural tests live with the concrete distributions.
        fn _summaries<T: Precision, D: Distribution<T>>(d: &D) -> T {
            d.mean() + d.std_dev() + d.kurtosis()
        }

        fn _point_evals<T: Precision, D: ContinuousDistribution<T>>(
            d: &D,
            x: T,
        ) -> DistResult<T> {
            Ok(d.pdf(x)? + d.cdf(x)? + d.sf(x)? + d.hazard(x)?)
        }
    }
}
