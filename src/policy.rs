// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Numeric Policy** - *Configurable Edge-Condition Handling for Distribution Kernels*
//!
//! A [`Policy`] describes how the engine reacts to numerical edge conditions:
//! domain violations, overflow, underflow, and precision loss. It never alters
//! the mathematical definition of a distribution, only the error-reporting
//! behaviour around edge inputs. Policies are plain `Copy` configuration
//! values passed at construction time and stored inside the distribution;
//! no global or thread-local state is involved.
//!
//! ## Handling Modes
//! - **Raise**: the condition returns an explicit [`DistError`](crate::errors::DistError)
//! - **Sentinel**: the condition maps to the category's well-defined sentinel
//!   (NaN for domain, `+∞` for overflow, `0` for underflow)
//! - **Log**: the sentinel is returned and a warning is emitted through the
//!   [`log`] facade
//!
//! Precision loss is a separate, non-fatal category: it can be ignored or
//! logged, but it never fails an evaluation.
//!
//! ## Built-in Configurations
//! - [`Policy::default`] — domain violations raise, overflow/underflow map to
//!   sentinels, precision loss is silent, out-of-support points evaluate to
//!   their limit value (SciPy-compatible behaviour with explicit failures for
//!   caller mistakes).
//! - [`Policy::strict`] — everything raises, out-of-support points are domain
//!   errors, precision loss is logged.
//! - [`Policy::permissive`] — every category maps to its sentinel.

use log::warn;

use crate::errors::{DistError, DistResult};
use crate::precision::Precision;

/// Per-category handling behaviour for a fatal error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorHandling {
    /// Return an explicit error.
    Raise,
    /// Substitute the category's sentinel value and continue.
    Sentinel,
    /// Emit a warning through the `log` facade, then substitute the sentinel.
    Log,
}

/// Handling behaviour for the non-fatal precision-loss category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecisionHandling {
    /// Continue silently.
    Ignore,
    /// Emit a warning through the `log` facade, then continue.
    Log,
}

/// Numeric policy: per-category edge-condition handling for one distribution.
///
/// Fields are public so callers can adjust a single category with
/// struct-update syntax:
///
/// ```
/// use dist_kernels::policy::{ErrorHandling, Policy};
///
/// let p = Policy {
///     overflow: ErrorHandling::Raise,
///     ..Policy::default()
/// };
/// assert_eq!(p.domain, ErrorHandling::Raise);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// Parameters or arguments outside the mathematically valid range.
    pub domain: ErrorHandling,
    /// Result magnitude exceeds the representable range (sentinel `+∞`).
    pub overflow: ErrorHandling,
    /// Non-zero result vanishes below the representable range (sentinel `0`).
    pub underflow: ErrorHandling,
    /// Result may carry reduced significant digits. Non-fatal.
    pub precision_loss: PrecisionHandling,
    /// When `true`, evaluation points outside the support are domain
    /// violations instead of taking the mathematical limit value.
    pub strict_support: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            domain: ErrorHandling::Raise,
            overflow: ErrorHandling::Sentinel,
            underflow: ErrorHandling::Sentinel,
            precision_loss: PrecisionHandling::Ignore,
            strict_support: false,
        }
    }
}

impl Policy {
    /// Every category raises; out-of-support evaluation points are domain
    /// errors; precision loss is logged.
    pub const fn strict() -> Self {
        Self {
            domain: ErrorHandling::Raise,
            overflow: ErrorHandling::Raise,
            underflow: ErrorHandling::Raise,
            precision_loss: PrecisionHandling::Log,
            strict_support: true,
        }
    }

    /// Every category maps to its sentinel value; nothing raises or logs.
    pub const fn permissive() -> Self {
        Self {
            domain: ErrorHandling::Sentinel,
            overflow: ErrorHandling::Sentinel,
            underflow: ErrorHandling::Sentinel,
            precision_loss: PrecisionHandling::Ignore,
            strict_support: false,
        }
    }

    /// Consults the domain category. Sentinel: NaN.
    pub(crate) fn domain_violation<T: Precision>(&self, msg: String) -> DistResult<T> {
        match self.domain {
            ErrorHandling::Raise => Err(DistError::Domain(msg)),
            ErrorHandling::Sentinel => Ok(T::nan()),
            ErrorHandling::Log => {
                warn!("domain error (continuing with NaN): {msg}");
                Ok(T::nan())
            }
        }
    }

    /// Consults the overflow category. Sentinel: `+∞`.
    pub(crate) fn overflow<T: Precision>(&self, msg: String) -> DistResult<T> {
        match self.overflow {
            ErrorHandling::Raise => Err(DistError::Overflow(msg)),
            ErrorHandling::Sentinel => Ok(T::infinity()),
            ErrorHandling::Log => {
                warn!("overflow (continuing with +inf): {msg}");
                Ok(T::infinity())
            }
        }
    }

    /// Consults the underflow category. Sentinel: `0`.
    pub(crate) fn underflow<T: Precision>(&self, msg: String) -> DistResult<T> {
        match self.underflow {
            ErrorHandling::Raise => Err(DistError::Underflow(msg)),
            ErrorHandling::Sentinel => Ok(T::zero()),
            ErrorHandling::Log => {
                warn!("underflow (continuing with 0): {msg}");
                Ok(T::zero())
            }
        }
    }

    /// Reports precision loss. Never fails the evaluation.
    pub(crate) fn precision_loss(&self, msg: &str) {
        if self.precision_loss == PrecisionHandling::Log {
            warn!("precision loss: {msg}");
        }
    }
}
