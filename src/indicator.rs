use crate::{Ohlcv, PriceSource};

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// Configuration for a technical [`Indicator`].
///
/// Every indicator has a corresponding config type that holds its parameters
/// (window lengths, price source). Configs are value types: cheap to copy,
/// compare, and hash.
pub trait IndicatorConfig: Sized + Copy + PartialEq + Eq + Hash + Display + Debug {
    /// Price source to extract from each bar.
    fn source(&self) -> PriceSource;

    /// Column name of the indicator output, e.g. `SMA20` or `EMA12`.
    fn column_name(&self) -> String;
}

/// A streaming technical indicator.
///
/// Indicators maintain internal state and update incrementally on each call to
/// [`compute`](Indicator::compute), one bar per call in ascending time order.
/// Output is `None` while the indicator is undefined for the bars seen so far.
///
/// # Example
///
/// ```
/// use vnstock_ta::{Bar, Indicator, Sma, SmaConfig};
/// use std::num::NonZero;
///
/// let mut sma = Sma::new(SmaConfig::close(NonZero::new(3).unwrap()));
///
/// assert_eq!(sma.compute(&Bar::new(1, 10.0, 10.0, 10.0, 10.0)), None);
/// assert_eq!(sma.compute(&Bar::new(2, 20.0, 20.0, 20.0, 20.0)), None);
/// assert_eq!(sma.compute(&Bar::new(3, 30.0, 30.0, 30.0, 30.0)), Some(20.0));
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Computed output type. `f64` for simple indicators,
    /// a struct for composite ones (e.g. MACD).
    type Output: Copy + Send + Sync + Display + Debug;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// Feeds the next bar and returns the updated indicator value,
    /// or `None` if it is not yet defined.
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<Self::Output>;

    /// Returns the last computed indicator value without advancing state.
    fn value(&self) -> Option<Self::Output>;

    /// Config this indicator was built from.
    fn config(&self) -> &Self::Config;
}
