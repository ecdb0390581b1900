#![allow(dead_code)]

use serde::{Deserialize, de::DeserializeOwned};
use vnstock_ta::{Bar, PriceSeries, Timestamp};

/// Daily bars as exported from the market data provider, times in unix seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub time: Timestamp,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl From<&RefBar> for Bar {
    fn from(r: &RefBar) -> Self {
        Bar::new(r.time, r.open, r.high, r.low, r.close).with_volume(r.volume)
    }
}

/// Reference value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub time: Timestamp,
    pub expected: f64,
}

/// Reference MACD row with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefMacd {
    pub time: Timestamp,
    pub macd: f64,
    pub signal: f64,
    pub diff: f64,
}

pub const OHLCV_PATH: &str = "tests/fixtures/data/vnm-1d.csv";
pub const DATED_OHLCV_PATH: &str = "tests/fixtures/data/vnm-1d-dated.csv";

/// Load reference bars.
pub fn load_reference_bars() -> Vec<RefBar> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

/// Reference bars as a validated series.
pub fn load_reference_series() -> PriceSeries {
    let bars = load_reference_bars().iter().map(Bar::from).collect();
    PriceSeries::new(bars).expect("reference bars are ordered")
}

/// Load single-value reference data (SMA, EMA).
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

/// Load MACD reference data (macd, signal, diff).
pub fn load_macd_ref(path: &str) -> Vec<RefMacd> {
    load_records(path, "invalid MACD reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Checks a computed column against sparse reference values keyed by time.
///
/// Rows without a reference value must be missing; every reference value must
/// be matched.
pub fn assert_column_matches(
    series: &PriceSeries,
    values: &[Option<f64>],
    reference: &[RefValue],
    tolerance: f64,
    label: &str,
) {
    assert_eq!(values.len(), series.len(), "{label}: misaligned column");

    let mut ref_idx = 0;
    for (bar, value) in series.iter().zip(values) {
        if ref_idx < reference.len() && bar.time == reference[ref_idx].time {
            let value =
                value.unwrap_or_else(|| panic!("{label} missing at t={}", bar.time));
            assert_near(
                value,
                reference[ref_idx].expected,
                tolerance,
                &format!("{label} at bar {ref_idx} (t={})", bar.time),
            );
            ref_idx += 1;
        } else {
            assert_eq!(*value, None, "{label} should be missing at t={}", bar.time);
        }
    }

    assert_eq!(
        ref_idx,
        reference.len(),
        "not all reference values checked: {ref_idx}/{}",
        reference.len()
    );
}

/// Generate a reference match test for one moving-average column.
///
/// Usage: `reference_test!(sma_20, compute_sma, 20, "SMA20", "tests/fixtures/data/sma-20-close.csv", 1e-6);`
#[allow(unused_macros)]
macro_rules! reference_test {
    ($name:ident, $compute:ident, $window:expr, $column:expr, $ref_path:expr, $tolerance:expr) => {
        mod $name {
            use super::fixtures::*;
            use super::*;
            use vnstock_ta::*;

            #[test]
            fn matches_reference() {
                let series = load_reference_series();
                let reference = load_ref_values($ref_path);

                let frame = $compute(&series, $window).unwrap();
                let column = frame.column($column).expect("column present");

                assert_column_matches(&series, column.values(), &reference, $tolerance, $column);
            }
        }
    };
}

#[allow(unused_imports)]
pub(crate) use reference_test;

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
