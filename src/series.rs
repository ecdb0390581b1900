use std::{fmt::Display, ops::Index};

use serde::{Deserialize, Serialize};

use crate::{Bar, Error, Ohlcv, Price, PriceSource, Result, Timestamp};

/// Kind of instrument a series describes.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    /// A listed stock, identified by its ticker (e.g. `VNM`).
    #[default]
    Stock,
    /// A market index (e.g. `VNINDEX`).
    Index,
}

/// Ticker and kind of the instrument behind a [`PriceSeries`].
#[derive(PartialEq, Eq, Hash, Clone, Debug, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    #[serde(default)]
    pub kind: InstrumentKind,
}

impl Instrument {
    #[must_use]
    pub fn stock(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            kind: InstrumentKind::Stock,
        }
    }

    #[must_use]
    pub fn index(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            kind: InstrumentKind::Index,
        }
    }
}

impl Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.symbol)
    }
}

/// Bars ordered by strictly ascending time, with finite prices.
///
/// Construction validates both. An empty series is allowed, but every
/// indicator computation on it fails with [`Error::EmptySeries`].
///
/// Generic over the bar type so callers can keep their own candles; defaults
/// to [`Bar`].
#[derive(Clone, Debug, PartialEq)]
pub struct PriceSeries<B = Bar> {
    instrument: Option<Instrument>,
    bars: Vec<B>,
}

impl<B: Ohlcv> PriceSeries<B> {
    /// Wraps `bars` after checking their times strictly ascend and their
    /// prices are finite.
    ///
    /// # Errors
    ///
    /// [`Error::NonFinitePrice`] at the first bar with a NaN or infinite
    /// open, high, low or close, [`Error::UnorderedBars`] at the first bar
    /// whose time is not after its predecessor's.
    pub fn new(bars: Vec<B>) -> Result<Self> {
        if let Some(index) = bars.iter().position(|bar| !has_finite_prices(bar)) {
            return Err(Error::NonFinitePrice { index });
        }

        if let Some((index, pair)) = bars
            .windows(2)
            .enumerate()
            .find(|(_, pair)| pair[1].time() <= pair[0].time())
        {
            return Err(Error::UnorderedBars {
                index: index + 1,
                previous: pair[0].time(),
                current: pair[1].time(),
            });
        }

        Ok(Self {
            instrument: None,
            bars,
        })
    }

    /// Attaches instrument metadata.
    #[must_use]
    pub fn with_instrument(mut self, instrument: Instrument) -> Self {
        self.instrument = Some(instrument);
        self
    }

    #[must_use]
    pub fn instrument(&self) -> Option<&Instrument> {
        self.instrument.as_ref()
    }

    #[must_use]
    pub fn bars(&self) -> &[B] {
        &self.bars
    }

    pub fn iter(&self) -> std::slice::Iter<'_, B> {
        self.bars.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// First and last bar times, `None` for an empty series.
    #[must_use]
    pub fn time_range(&self) -> Option<(Timestamp, Timestamp)> {
        Some((self.bars.first()?.time(), self.bars.last()?.time()))
    }

    /// Bar times in order.
    #[must_use]
    pub fn times(&self) -> Vec<Timestamp> {
        self.bars.iter().map(Ohlcv::time).collect()
    }

    /// Prices extracted with `source`, one per bar.
    #[must_use]
    pub fn prices(&self, source: PriceSource) -> Vec<Price> {
        self.bars.iter().map(|bar| source.extract(bar)).collect()
    }

    /// Consumes the series, returning its bars.
    #[must_use]
    pub fn into_bars(self) -> Vec<B> {
        self.bars
    }

    pub(crate) fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptySeries);
        }
        Ok(())
    }
}

fn has_finite_prices(bar: &impl Ohlcv) -> bool {
    bar.open().is_finite()
        && bar.high().is_finite()
        && bar.low().is_finite()
        && bar.close().is_finite()
}

impl<B: Ohlcv> TryFrom<Vec<B>> for PriceSeries<B> {
    type Error = Error;

    fn try_from(bars: Vec<B>) -> Result<Self> {
        Self::new(bars)
    }
}

impl<'a, B> IntoIterator for &'a PriceSeries<B> {
    type Item = &'a B;
    type IntoIter = std::slice::Iter<'a, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

/// One named indicator column aligned with its source series.
///
/// `None` marks a missing value, e.g. the leading positions of an SMA.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IndicatorSeries {
    name: String,
    values: Vec<Option<Price>>,
}

impl IndicatorSeries {
    pub(crate) fn new(name: impl Into<String>, values: Vec<Option<Price>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Column name, e.g. `SMA20`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn values(&self) -> &[Option<Price>] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<Price>> + '_ {
        self.values.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most recent value, `None` if missing or the column is empty.
    #[must_use]
    pub fn last(&self) -> Option<Price> {
        self.values.last().copied().flatten()
    }

    /// Number of leading missing values.
    #[must_use]
    pub fn missing_prefix(&self) -> usize {
        self.values.iter().take_while(|v| v.is_none()).count()
    }
}

impl Index<usize> for IndicatorSeries {
    type Output = Option<Price>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

/// Indicator columns grouped under their names, in request order.
#[derive(Clone, Debug, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct IndicatorFrame {
    columns: Vec<IndicatorSeries>,
}

impl IndicatorFrame {
    pub(crate) fn new(columns: Vec<IndicatorSeries>) -> Self {
        Self { columns }
    }

    /// Column by name, e.g. `frame.column("EMA12")`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&IndicatorSeries> {
        self.columns.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn columns(&self) -> &[IndicatorSeries] {
        &self.columns
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(IndicatorSeries::name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndicatorSeries> {
        self.columns.iter()
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<'a> IntoIterator for &'a IndicatorFrame {
    type Item = &'a IndicatorSeries;
    type IntoIter = std::slice::Iter<'a, IndicatorSeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
