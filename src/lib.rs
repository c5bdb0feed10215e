// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under the Mozilla Public License (MPL) 2.0.
// See LICENSE for details.

//! Precision-generic probability distribution engines with policy-driven
//! numerical error handling.
//!
//! Each engine is a stateless value: construct it with validated parameters,
//! then evaluate densities, cumulative/survival probabilities, quantiles and
//! closed-form moments from any thread. Evaluations run at half, single or
//! double precision behind the [`Precision`] trait, and route every numerical
//! fault through a configurable [`Policy`] instead of silently producing
//! NaNs. See [`distributions`] for the numerical architecture.

pub mod distributions;
pub mod errors;
pub mod policy;
pub mod precision;

pub use distributions::traits::{ContinuousDistribution, Distribution};
pub use distributions::univariate::chi_squared::ChiSquared;
pub use errors::{DistError, DistResult};
pub use policy::{ErrorHandling, Policy, PrecisionHandling};
pub use precision::Precision;
