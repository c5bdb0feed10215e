// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Types** - *Distribution Evaluation Error Handling*
//!
//! Error types for distribution construction and evaluation with structured
//! error reporting. Whether a given condition surfaces as one of these errors
//! or as a sentinel value is decided by the active [`Policy`](crate::policy::Policy),
//! never by the kernel itself.
//!
//! ## Error Categories
//! - **Domain Errors**: Parameters or arguments outside the mathematically valid range
//! - **Overflow Errors**: Result magnitude exceeds the representable range of the precision type
//! - **Underflow Errors**: Mathematically non-zero result vanishes below the representable range
//!
//! Precision loss is deliberately *not* an error variant: it is a non-fatal
//! warning category routed through the policy's logging mode.
//!
//! All errors carry a contextual message in `function: detail` form.

use thiserror::Error;

/// Error type for all distribution operations.
///
/// Each variant includes a contextual message string naming the operation and
/// the offending value, enabling precise debugging and error reporting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DistError {
    /// Parameter or argument outside the mathematically valid range:
    /// non-positive degrees of freedom, a probability outside `[0, 1]`,
    /// NaN where a probability or evaluation point is expected, or an
    /// out-of-support evaluation point under strict support.
    #[error("Domain error: {0}")]
    Domain(String),

    /// Intermediate or final result magnitude exceeds the representable
    /// range of the precision type (for example a density pole at the
    /// support edge, or the preimage of `p = 1` under the quantile map).
    #[error("Overflow: {0}")]
    Overflow(String),

    /// Mathematically non-zero result too small for the precision type.
    #[error("Underflow: {0}")]
    Underflow(String),
}

/// Convenience alias for distribution evaluation results.
pub type DistResult<T> = Result<T, DistError>;
