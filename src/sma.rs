use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{Indicator, IndicatorConfig, Ohlcv, Price, PriceSource, price_window::PriceWindow};

/// Configuration for the Simple Moving Average ([`Sma`]) indicator.
///
/// # Example
///
/// ```rust
/// use vnstock_ta::{IndicatorConfig, SmaConfig};
/// use std::num::NonZero;
///
/// let config = SmaConfig::close(NonZero::new(20).unwrap());
/// assert_eq!(config.length(), 20);
/// assert_eq!(config.column_name(), "SMA20");
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SmaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for SmaConfig {
    #[inline]
    fn source(&self) -> PriceSource {
        self.source
    }

    fn column_name(&self) -> String {
        format!("SMA{}", self.length)
    }
}

impl SmaConfig {
    /// SMA over `length` bars of the given price source.
    #[must_use]
    pub fn new(length: NonZero<usize>, source: PriceSource) -> Self {
        Self {
            length: length.get(),
            source,
        }
    }

    /// SMA on closing price.
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
}

impl Display for SmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SmaConfig({}, {})", self.length, self.source)
    }
}

/// Simple Moving Average (SMA).
///
/// Trailing (not centered) unweighted mean of the last *n* prices, where *n*
/// is the configured window length. Returns `None` until *n* bars were seen;
/// those leading positions are missing, never zero.
///
/// Uses a running sum for O(1) updates per bar.
///
/// # Example
///
/// ```rust
/// use vnstock_ta::{Bar, Sma, SmaConfig};
/// use std::num::NonZero;
///
/// let mut sma = Sma::new(SmaConfig::close(NonZero::new(3).unwrap()));
/// let bar = |time, close| Bar::new(time, close, close, close, close);
///
/// assert_eq!(sma.compute(&bar(1, 10.0)), None);
/// assert_eq!(sma.compute(&bar(2, 20.0)), None);
/// assert_eq!(sma.compute(&bar(3, 30.0)), Some(20.0));
/// ```
#[derive(Clone, Debug)]
pub struct Sma {
    config: SmaConfig,
    window: PriceWindow,
    current: Option<Price>,
}

impl Sma {
    /// Feeds a raw price, bypassing the price source.
    #[inline]
    pub fn update(&mut self, price: Price) -> Option<Price> {
        self.window.push(price);

        #[allow(clippy::cast_precision_loss)]
        let length = self.config.length as f64;
        self.current = self.window.sum().map(|sum| sum / length);

        self.current
    }
}

impl Indicator for Sma {
    type Config = SmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            window: PriceWindow::new(config.length),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<Price> {
        self.update(self.config.source.extract(bar))
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }

    fn config(&self) -> &SmaConfig {
        &self.config
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({}, {})", self.config.length, self.config.source)
    }
}
