// src/test_util.rs

use crate::{Bar, PriceSeries, Timestamp};
use std::num::NonZero;

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() <= e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

pub fn nz(n: usize) -> NonZero<usize> {
    NonZero::new(n).unwrap()
}

/// Convenience: bar with just a close price and timestamp (OHLC all equal to close).
pub fn bar(close: f64, time: Timestamp) -> Bar {
    Bar::new(time, close, close, close, close)
}

/// Series of close-only bars at times 1, 2, 3, ...
pub fn series(closes: &[f64]) -> PriceSeries {
    PriceSeries::new(closes.iter().zip(1..).map(|(&c, t)| bar(c, t)).collect()).unwrap()
}
