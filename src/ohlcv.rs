use serde::{Deserialize, Serialize};

/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Bar timestamp, unix seconds or any other ascending sequence number.
///
/// Must be strictly ascending within a [`PriceSeries`](crate::PriceSeries).
pub type Timestamp = u64;

/// OHLC(V) bar data used as input to all indicators.
///
/// Implement this on your own kline/candle type to avoid conversion.
/// Indicators accept `&impl Ohlcv` and extract the configured
/// [`PriceSource`](crate::PriceSource) internally.
///
/// # Example
///
/// ```
/// use vnstock_ta::{Ohlcv, Price, Timestamp};
///
/// struct MyCandle {
///     o: f64, h: f64, l: f64, c: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyCandle {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn time(&self) -> Timestamp { self.ts }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing price of the bar.
    fn close(&self) -> Price;

    /// Bar timestamp.
    fn time(&self) -> Timestamp;

    /// Traded volume, if the data source reports it.
    fn volume(&self) -> Option<f64> {
        None
    }
}

/// A plain OHLC(V) bar.
///
/// Field names match the columns delivered by the upstream market data
/// provider (`time,open,high,low,close,volume`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    #[serde(default)]
    pub volume: Option<f64>,
}

impl Bar {
    /// Bar without volume.
    #[must_use]
    pub fn new(time: Timestamp, open: Price, high: Price, low: Price, close: Price) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    /// Sets the traded volume.
    #[must_use]
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}

impl Ohlcv for Bar {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn time(&self) -> Timestamp {
        self.time
    }

    fn volume(&self) -> Option<f64> {
        self.volume
    }
}

impl<T: Ohlcv> Ohlcv for &T {
    fn open(&self) -> Price {
        (**self).open()
    }

    fn high(&self) -> Price {
        (**self).high()
    }

    fn low(&self) -> Price {
        (**self).low()
    }

    fn close(&self) -> Price {
        (**self).close()
    }

    fn time(&self) -> Timestamp {
        (**self).time()
    }

    fn volume(&self) -> Option<f64> {
        (**self).volume()
    }
}
