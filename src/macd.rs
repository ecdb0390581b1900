use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use serde::{Deserialize, Serialize};

use crate::{
    Ema, EmaConfig, Indicator, IndicatorConfig, IndicatorSeries, InvalidWindow, Ohlcv, Price,
    PriceSource, Result,
};

const DEFAULT_SHORT: NonZero<usize> = NonZero::new(12).unwrap();
const DEFAULT_LONG: NonZero<usize> = NonZero::new(26).unwrap();
const DEFAULT_SIGNAL: NonZero<usize> = NonZero::new(9).unwrap();

/// Configuration for the [`Macd`] indicator.
///
/// Built through [`MacdConfig::builder`], which rejects a short window that is
/// not strictly below the long one. Defaults to the conventional 12/26/9 on
/// closing price.
///
/// # Example
///
/// ```
/// use vnstock_ta::MacdConfig;
/// use std::num::NonZero;
///
/// let config = MacdConfig::builder()
///     .short(NonZero::new(5).unwrap())
///     .long(NonZero::new(35).unwrap())
///     .signal(NonZero::new(5).unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!((config.short(), config.long(), config.signal()), (5, 35, 5));
/// assert!(MacdConfig::builder().short(NonZero::new(30).unwrap()).build().is_err());
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MacdConfig {
    short: NonZero<usize>,
    long: NonZero<usize>,
    signal: NonZero<usize>,
    source: PriceSource,
}

impl IndicatorConfig for MacdConfig {
    #[inline]
    fn source(&self) -> PriceSource {
        self.source
    }

    fn column_name(&self) -> String {
        "MACD".to_owned()
    }
}

impl MacdConfig {
    /// Returns a builder preset to 12/26/9 on closing price.
    #[must_use]
    pub fn builder() -> MacdConfigBuilder {
        MacdConfigBuilder {
            config: Self::default(),
        }
    }

    /// Short (fast) EMA window.
    #[inline]
    #[must_use]
    pub fn short(&self) -> usize {
        self.short.get()
    }

    /// Long (slow) EMA window.
    #[inline]
    #[must_use]
    pub fn long(&self) -> usize {
        self.long.get()
    }

    /// Signal line EMA window.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> usize {
        self.signal.get()
    }
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            short: DEFAULT_SHORT,
            long: DEFAULT_LONG,
            signal: DEFAULT_SIGNAL,
            source: PriceSource::Close,
        }
    }
}

impl Display for MacdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MacdConfig({}, {}, {}, {})",
            self.short, self.long, self.signal, self.source
        )
    }
}

/// Builder for [`MacdConfig`].
pub struct MacdConfigBuilder {
    config: MacdConfig,
}

impl MacdConfigBuilder {
    #[must_use]
    pub fn short(mut self, short: NonZero<usize>) -> Self {
        self.config.short = short;
        self
    }

    #[must_use]
    pub fn long(mut self, long: NonZero<usize>) -> Self {
        self.config.long = long;
        self
    }

    #[must_use]
    pub fn signal(mut self, signal: NonZero<usize>) -> Self {
        self.config.signal = signal;
        self
    }

    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.config.source = source;
        self
    }

    /// Builds the config.
    ///
    /// # Errors
    ///
    /// [`InvalidWindow::ShortNotBelowLong`] when `short >= long`.
    pub fn build(self) -> Result<MacdConfig> {
        let config = self.config;
        if config.short >= config.long {
            return Err(InvalidWindow::ShortNotBelowLong {
                short: config.short(),
                long: config.long(),
            }
            .into());
        }

        Ok(config)
    }
}

/// Plain MACD window lengths as they arrive from callers or config files.
///
/// Unvalidated; [`MacdParams::config`] turns them into a [`MacdConfig`].
/// Missing fields deserialize to the 12/26/9 defaults.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    pub short: usize,
    pub long: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            short: DEFAULT_SHORT.get(),
            long: DEFAULT_LONG.get(),
            signal: DEFAULT_SIGNAL.get(),
        }
    }
}

impl MacdParams {
    #[must_use]
    pub fn new(short: usize, long: usize, signal: usize) -> Self {
        Self {
            short,
            long,
            signal,
        }
    }

    /// Validates the windows into a config on the given price source.
    ///
    /// # Errors
    ///
    /// [`InvalidWindow::Zero`] if any window is zero,
    /// [`InvalidWindow::ShortNotBelowLong`] if `short >= long`.
    pub fn config(self, source: PriceSource) -> Result<MacdConfig> {
        let positive = |n| NonZero::new(n).ok_or(InvalidWindow::Zero);

        MacdConfig::builder()
            .short(positive(self.short)?)
            .long(positive(self.long)?)
            .signal(positive(self.signal)?)
            .source(source)
            .build()
    }
}

/// One MACD output: the line, its signal and their difference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MacdValue {
    macd: Price,
    signal: Price,
    diff: Price,
}

impl MacdValue {
    /// MACD line: `EMA(short) − EMA(long)`.
    #[inline]
    #[must_use]
    pub fn macd(&self) -> Price {
        self.macd
    }

    /// Signal line: EMA of the MACD line.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> Price {
        self.signal
    }

    /// Histogram: `macd − signal`.
    #[inline]
    #[must_use]
    pub fn diff(&self) -> Price {
        self.diff
    }
}

impl Display for MacdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD(m: {}, s: {}, d: {})",
            self.macd, self.signal, self.diff
        )
    }
}

/// Moving Average Convergence Divergence (MACD).
///
/// ```text
/// MACD[i]   = EMA(price, short)[i] − EMA(price, long)[i]
/// signal[i] = EMA(MACD, signal)[i]
/// diff[i]   = MACD[i] − signal[i]
/// ```
///
/// All three EMAs are seeded with their first input (see [`Ema`]), so a value
/// is produced from the first bar. A constant price yields zeros throughout.
///
/// # Example
///
/// ```
/// use vnstock_ta::{Bar, Macd, MacdConfig};
///
/// let mut macd = Macd::new(MacdConfig::default());
/// let v = macd.compute(&Bar::new(1, 100.0, 100.0, 100.0, 100.0)).unwrap();
///
/// assert_eq!((v.macd(), v.signal(), v.diff()), (0.0, 0.0, 0.0));
/// ```
#[derive(Clone, Debug)]
pub struct Macd {
    config: MacdConfig,
    short: Ema,
    long: Ema,
    signal: Ema,
    current: Option<MacdValue>,
}

impl Indicator for Macd {
    type Config = MacdConfig;
    type Output = MacdValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            short: Ema::new(EmaConfig::close(config.short)),
            long: Ema::new(EmaConfig::close(config.long)),
            signal: Ema::new(EmaConfig::close(config.signal)),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<MacdValue> {
        let price = self.config.source.extract(bar);

        let macd = self.short.update(price) - self.long.update(price);
        let signal = self.signal.update(macd);

        self.current = Some(MacdValue {
            macd,
            signal,
            diff: macd - signal,
        });

        self.current
    }

    #[inline]
    fn value(&self) -> Option<MacdValue> {
        self.current
    }

    fn config(&self) -> &MacdConfig {
        &self.config
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({}, {}, {}, {})",
            self.config.short, self.config.long, self.config.signal, self.config.source
        )
    }
}

/// MACD columns aligned with the series they were computed from.
///
/// Column names are `MACD`, `signal` and `diff`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MacdResult {
    macd: IndicatorSeries,
    signal: IndicatorSeries,
    diff: IndicatorSeries,
}

impl MacdResult {
    pub(crate) fn from_values(values: &[MacdValue]) -> Self {
        let column = |name: &str, pick: fn(&MacdValue) -> Price| {
            IndicatorSeries::new(name, values.iter().map(|v| Some(pick(v))).collect())
        };

        Self {
            macd: column("MACD", MacdValue::macd),
            signal: column("signal", MacdValue::signal),
            diff: column("diff", MacdValue::diff),
        }
    }

    /// The MACD line.
    #[must_use]
    pub fn macd(&self) -> &IndicatorSeries {
        &self.macd
    }

    /// The signal line.
    #[must_use]
    pub fn signal(&self) -> &IndicatorSeries {
        &self.signal
    }

    /// The histogram, `MACD − signal`.
    #[must_use]
    pub fn diff(&self) -> &IndicatorSeries {
        &self.diff
    }

    /// All three columns in `MACD`, `signal`, `diff` order.
    #[must_use]
    pub fn columns(&self) -> [&IndicatorSeries; 3] {
        [&self.macd, &self.signal, &self.diff]
    }

    /// Number of rows, equal to the source series length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{
        Error,
        test_util::{bar, nz},
    };

    fn macd(short: usize, long: usize, signal: usize) -> Macd {
        Macd::new(MacdParams::new(short, long, signal).config(PriceSource::Close).unwrap())
    }

    mod config {
        use super::*;

        #[test]
        fn defaults_are_12_26_9_close() {
            let config = MacdConfig::default();
            assert_eq!((config.short(), config.long(), config.signal()), (12, 26, 9));
            assert_eq!(config.source(), PriceSource::Close);
            assert_eq!(MacdParams::default().config(PriceSource::Close).unwrap(), config);
        }

        #[test]
        fn rejects_short_equal_to_long() {
            let err = MacdConfig::builder().short(nz(26)).build().unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidWindow(InvalidWindow::ShortNotBelowLong { short: 26, long: 26 })
            ));
        }

        #[test]
        fn rejects_short_above_long() {
            let err = MacdParams::new(26, 12, 9).config(PriceSource::Close).unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidWindow(InvalidWindow::ShortNotBelowLong { short: 26, long: 12 })
            ));
        }

        #[test]
        fn rejects_zero_windows() {
            for params in [
                MacdParams::new(0, 26, 9),
                MacdParams::new(12, 0, 9),
                MacdParams::new(12, 26, 0),
            ] {
                let err = params.config(PriceSource::Close).unwrap_err();
                assert!(
                    matches!(err, Error::InvalidWindow(InvalidWindow::Zero)),
                    "{params:?}: {err}"
                );
            }
        }

        #[test]
        fn params_deserialize_with_defaults() {
            let params: MacdParams = serde_json::from_str(r#"{"signal": 5}"#).unwrap();
            assert_eq!(params, MacdParams::new(12, 26, 5));
        }

        #[test]
        fn display_config() {
            assert_eq!(
                MacdConfig::default().to_string(),
                "MacdConfig(12, 26, 9, Close)"
            );
        }
    }

    mod computation {
        use super::*;

        #[test]
        fn first_bar_is_all_zero() {
            let v = macd(3, 7, 4).compute(&bar(50.0, 1)).unwrap();
            assert_eq!((v.macd(), v.signal(), v.diff()), (0.0, 0.0, 0.0));
        }

        #[test]
        fn second_bar_by_hand() {
            // short EMA(3): α = 0.5 → 10 + 0.5 × 10 = 15
            // long EMA(7): α = 0.25 → 10 + 0.25 × 10 = 12.5
            // MACD = 2.5; signal EMA(3) from 0 → 1.25; diff = 1.25
            let mut macd = macd(3, 7, 3);
            macd.compute(&bar(10.0, 1));
            let v = macd.compute(&bar(20.0, 2)).unwrap();
            assert_eq!(v.macd(), 2.5);
            assert_eq!(v.signal(), 1.25);
            assert_eq!(v.diff(), 1.25);
        }

        #[test]
        fn constant_price_is_flat_zero() {
            let mut macd = macd(12, 26, 9);
            for t in 1..=100 {
                let v = macd.compute(&bar(100.0, t)).unwrap();
                assert_eq!((v.macd(), v.signal(), v.diff()), (0.0, 0.0, 0.0));
            }
        }

        #[test]
        fn rising_price_gives_positive_macd() {
            let mut macd = macd(12, 26, 9);
            let mut last = None;
            for t in 1..=60 {
                #[allow(clippy::cast_precision_loss)]
                let close = 100.0 + t as f64;
                last = macd.compute(&bar(close, t));
            }
            let v = last.unwrap();
            assert!(v.macd() > 0.0);
            assert_eq!(v.diff(), v.macd() - v.signal());
        }
    }

    mod result {
        use super::*;

        #[test]
        fn columns_are_named_and_aligned() {
            let mut macd = macd(3, 7, 3);
            let values: Vec<_> = [10.0, 20.0, 15.0]
                .into_iter()
                .zip(1..)
                .filter_map(|(c, t)| macd.compute(&bar(c, t)))
                .collect();

            let result = MacdResult::from_values(&values);

            assert_eq!(result.len(), 3);
            let names: Vec<_> = result
                .columns()
                .into_iter()
                .map(IndicatorSeries::name)
                .collect();
            assert_eq!(names, ["MACD", "signal", "diff"]);
            assert_eq!(result.macd()[1], Some(2.5));
            assert_eq!(result.diff()[1], Some(1.25));
        }
    }

    mod display {
        use super::*;

        #[test]
        fn formats_indicator_and_value() {
            let mut macd = macd(12, 26, 9);
            assert_eq!(macd.to_string(), "MACD(12, 26, 9, Close)");
            let v = macd.compute(&bar(1.0, 1)).unwrap();
            assert_eq!(v.to_string(), "MACD(m: 0, s: 0, d: 0)");
        }
    }
}
