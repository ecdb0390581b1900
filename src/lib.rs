//! Moving averages and MACD over historical price series.
//!
//! A [`PriceSeries`] holds ascending, uniquely timestamped bars of any type
//! implementing [`Ohlcv`]. [`compute_sma`], [`compute_ema`] and
//! [`compute_macd`] derive indicator columns aligned index-for-index with
//! that series, ready to hand to a chart renderer.
//!
//! Each indicator is also available as a streaming [`Indicator`] ([`Sma`],
//! [`Ema`], [`Macd`]) fed one bar at a time. The batch functions are folds of
//! these, so both paths produce identical values.
//!
//! ```
//! use vnstock_ta::{Bar, PriceSeries, compute_sma};
//!
//! let bars = [10.0, 11.0, 12.0, 13.0, 14.0]
//!     .iter()
//!     .zip(1..)
//!     .map(|(&close, time)| Bar::new(time, close, close, close, close))
//!     .collect();
//! let series = PriceSeries::new(bars).unwrap();
//!
//! let sma = compute_sma(&series, 3).unwrap();
//! assert_eq!(
//!     sma.column("SMA3").unwrap().values(),
//!     &[None, None, Some(11.0), Some(12.0), Some(13.0)]
//! );
//! ```

mod bundle;
#[cfg(feature = "csv")]
mod csv_input;
mod ema;
mod engine;
mod error;
mod indicator;
mod macd;
mod ohlcv;
mod price_source;
mod price_window;
mod series;
mod sma;
mod windows;

pub use crate::bundle::{IndicatorBundle, IndicatorRequest};
pub use crate::engine::{IndicatorEngine, compute_ema, compute_macd, compute_sma};
pub use crate::error::{Error, InvalidWindow, Result};
pub use crate::indicator::{Indicator, IndicatorConfig};
pub use crate::ohlcv::{Bar, Ohlcv, Price, Timestamp};
pub use crate::price_source::PriceSource;
pub use crate::series::{Instrument, InstrumentKind, IndicatorFrame, IndicatorSeries, PriceSeries};
pub use crate::windows::Windows;

pub use crate::ema::{Ema, EmaConfig};
pub use crate::macd::{Macd, MacdConfig, MacdConfigBuilder, MacdParams, MacdResult, MacdValue};
pub use crate::sma::{Sma, SmaConfig};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, bar: &impl Ohlcv) -> Option<$output> {
                <Self as Indicator>::compute(self, bar)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }
        }
    };
}

impl_indicator_methods!(Sma, SmaConfig, Price);
impl_indicator_methods!(Ema, EmaConfig, Price);
impl_indicator_methods!(Macd, MacdConfig, MacdValue);

#[cfg(test)]
mod test_util;
