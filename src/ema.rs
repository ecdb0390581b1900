use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{Indicator, IndicatorConfig, Ohlcv, Price, PriceSource};

/// Configuration for the Exponential Moving Average ([`Ema`]) indicator.
///
/// # Example
///
/// ```
/// use vnstock_ta::{EmaConfig, IndicatorConfig};
/// use std::num::NonZero;
///
/// let config = EmaConfig::close(NonZero::new(3).unwrap());
///
/// assert_eq!(config.length(), 3);
/// assert_eq!(config.alpha(), 0.5);
/// assert_eq!(config.column_name(), "EMA3");
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct EmaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for EmaConfig {
    #[inline]
    fn source(&self) -> PriceSource {
        self.source
    }

    fn column_name(&self) -> String {
        format!("EMA{}", self.length)
    }
}

impl EmaConfig {
    /// EMA over `length` bars of the given price source.
    #[must_use]
    pub fn new(length: NonZero<usize>, source: PriceSource) -> Self {
        Self {
            length: length.get(),
            source,
        }
    }

    /// EMA on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::new(length, PriceSource::Close)
    }

    /// Window length (number of bars).
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Smoothing factor `α = 2 / (length + 1)`.
    #[inline]
    #[must_use]
    pub fn alpha(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let span = (self.length + 1) as f64;
        2.0 / span
    }
}

impl Display for EmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmaConfig({}, {})", self.length, self.source)
    }
}

/// Exponential Moving Average (EMA).
///
/// A recursively weighted average that favours recent prices, with the
/// standard smoothing factor `α = 2 / (length + 1)`:
///
/// ```text
/// EMA[0] = price[0]
/// EMA[i] = α × price[i] + (1 − α) × EMA[i − 1]
/// ```
///
/// The recursion is seeded with the first price, so a value is produced from
/// the very first bar and is never missing. Each step is evaluated as a single
/// fused multiply-add `EMA[i − 1] + α × (price[i] − EMA[i − 1])`, which keeps a
/// constant input exactly constant.
///
/// # Example
///
/// ```
/// use vnstock_ta::{Bar, Ema, EmaConfig};
/// use std::num::NonZero;
///
/// // EMA(3): α = 0.5
/// let mut ema = Ema::new(EmaConfig::close(NonZero::new(3).unwrap()));
/// let bar = |time, close| Bar::new(time, close, close, close, close);
///
/// assert_eq!(ema.compute(&bar(1, 10.0)), Some(10.0));
/// assert_eq!(ema.compute(&bar(2, 20.0)), Some(15.0));
/// ```
#[derive(Clone, Debug)]
pub struct Ema {
    config: EmaConfig,
    alpha: f64,
    current: Option<Price>,
}

impl Ema {
    /// Feeds a raw price, bypassing the price source.
    ///
    /// Used to smooth derived series such as the MACD line.
    #[inline]
    pub fn update(&mut self, price: Price) -> Price {
        let next = match self.current {
            Some(previous) => self.alpha.mul_add(price - previous, previous),
            None => price,
        };

        self.current = Some(next);
        next
    }
}

impl Indicator for Ema {
    type Config = EmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            alpha: config.alpha(),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<Price> {
        Some(self.update(self.config.source.extract(bar)))
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }

    fn config(&self) -> &EmaConfig {
        &self.config
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({}, {})", self.config.length, self.config.source)
    }
}
