#![allow(unused)]

// Blended comparison: absolute near zero, relative once |e| > 1. NaN and
// signed infinity expectations must be reproduced exactly.
fn close(a: f64, e: f64, tol: f64) -> bool {
    if e.is_nan() {
        return a.is_nan();
    }
    if e.is_infinite() {
        return a.is_infinite() && a.is_sign_positive() == e.is_sign_positive();
    }
    (a - e).abs() <= tol * 1.0_f64.max(e.abs())
}

pub fn assert_close(a: f64, e: f64, tol: f64) {
    assert!(close(a, e, tol), "mismatch: got {a}, expect {e} (tol={tol})");
}

pub fn assert_slice_close(a: &[f64], e: &[f64], tol: f64) {
    assert_eq!(a.len(), e.len(), "len mismatch");
    for (i, (&ai, &ei)) in a.iter().zip(e.iter()).enumerate() {
        assert!(
            close(ai, ei, tol),
            "idx {i}: got {ai}, expect {ei} (tol={tol})"
        );
    }
}

/// Strict relative comparison for tail quantities, where the blended form of
/// `assert_close` would accept anything tiny.
pub fn assert_rel_close(a: f64, e: f64, tol: f64) {
    assert!(e != 0.0, "assert_rel_close needs a non-zero expectation");
    assert!(
        (a / e - 1.0).abs() <= tol,
        "relative mismatch: got {a}, expect {e} (tol={tol})"
    );
}
