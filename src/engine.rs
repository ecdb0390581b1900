use log::{debug, trace};

use crate::{
    Ema, EmaConfig, Indicator, IndicatorConfig, IndicatorFrame, IndicatorSeries, Macd,
    MacdParams, MacdResult, Ohlcv, PriceSeries, PriceSource, Result, Sma, SmaConfig, Windows,
};

/// Batch indicator computation over a whole [`PriceSeries`].
///
/// Every method is a pure function of its inputs: it validates the request,
/// folds the streaming indicator over the bars and returns fresh columns
/// aligned with the series. Window parameters are validated before the series
/// is checked for emptiness.
///
/// ```
/// use vnstock_ta::{Bar, IndicatorEngine, PriceSeries, PriceSource};
///
/// let series = PriceSeries::new(vec![
///     Bar::new(1, 10.0, 14.0, 8.0, 12.0),
///     Bar::new(2, 12.0, 18.0, 10.0, 16.0),
/// ])
/// .unwrap();
///
/// let engine = IndicatorEngine::new().with_source(PriceSource::HL2);
/// let sma = engine.sma(&series, 2).unwrap();
///
/// // HL2: (14 + 8) / 2 = 11, (18 + 10) / 2 = 14
/// assert_eq!(sma.column("SMA2").unwrap().values(), &[None, Some(12.5)]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IndicatorEngine {
    source: PriceSource,
}

impl IndicatorEngine {
    /// Engine computing on closing prices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes on `source` instead of closing prices.
    #[must_use]
    pub fn with_source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    /// Price source the engine computes on.
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }

    /// Simple moving averages, one `SMA{w}` column per distinct window.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidWindow`](crate::Error::InvalidWindow) for a zero or
    /// missing window, [`Error::EmptySeries`](crate::Error::EmptySeries) for
    /// a series without bars.
    pub fn sma<B: Ohlcv>(
        &self,
        series: &PriceSeries<B>,
        windows: impl Into<Windows>,
    ) -> Result<IndicatorFrame> {
        let lengths = windows.into().validate()?;
        series.ensure_not_empty()?;

        debug!(
            "computing SMA{lengths:?} on {} over {} bars",
            self.source,
            series.len()
        );

        let columns = lengths
            .into_iter()
            .map(|length| fold::<Sma, _>(series, SmaConfig::new(length, self.source)))
            .collect();

        Ok(IndicatorFrame::new(columns))
    }

    /// Exponential moving averages, one `EMA{w}` column per distinct window.
    ///
    /// # Errors
    ///
    /// Same as [`sma`](Self::sma).
    pub fn ema<B: Ohlcv>(
        &self,
        series: &PriceSeries<B>,
        windows: impl Into<Windows>,
    ) -> Result<IndicatorFrame> {
        let lengths = windows.into().validate()?;
        series.ensure_not_empty()?;

        debug!(
            "computing EMA{lengths:?} on {} over {} bars",
            self.source,
            series.len()
        );

        let columns = lengths
            .into_iter()
            .map(|length| fold::<Ema, _>(series, EmaConfig::new(length, self.source)))
            .collect();

        Ok(IndicatorFrame::new(columns))
    }

    /// MACD line, signal line and their difference.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidWindow`](crate::Error::InvalidWindow) if any window is
    /// zero or `short >= long`,
    /// [`Error::EmptySeries`](crate::Error::EmptySeries) for a series without
    /// bars.
    pub fn macd<B: Ohlcv>(
        &self,
        series: &PriceSeries<B>,
        params: MacdParams,
    ) -> Result<MacdResult> {
        let config = params.config(self.source)?;
        series.ensure_not_empty()?;

        debug!("computing {config} over {} bars", series.len());

        let mut macd = Macd::new(config);
        let values: Vec<_> = series.iter().filter_map(|bar| macd.compute(bar)).collect();

        Ok(MacdResult::from_values(&values))
    }
}

/// Feeds every bar through a fresh indicator, one output per bar.
fn fold<I, B>(series: &PriceSeries<B>, config: I::Config) -> IndicatorSeries
where
    I: Indicator<Output = crate::Price>,
    B: Ohlcv,
{
    let mut indicator = I::new(config);
    let values = series.iter().map(|bar| indicator.compute(bar)).collect();

    trace!("{indicator} done");

    IndicatorSeries::new(config.column_name(), values)
}

/// [`IndicatorEngine::sma`] on closing prices.
///
/// # Errors
///
/// See [`IndicatorEngine::sma`].
pub fn compute_sma<B: Ohlcv>(
    series: &PriceSeries<B>,
    windows: impl Into<Windows>,
) -> Result<IndicatorFrame> {
    IndicatorEngine::new().sma(series, windows)
}

/// [`IndicatorEngine::ema`] on closing prices.
///
/// # Errors
///
/// See [`IndicatorEngine::ema`].
pub fn compute_ema<B: Ohlcv>(
    series: &PriceSeries<B>,
    windows: impl Into<Windows>,
) -> Result<IndicatorFrame> {
    IndicatorEngine::new().ema(series, windows)
}

/// [`IndicatorEngine::macd`] on closing prices.
///
/// The conventional parameters are `12, 26, 9` ([`MacdParams::default`]).
///
/// # Errors
///
/// See [`IndicatorEngine::macd`].
pub fn compute_macd<B: Ohlcv>(
    series: &PriceSeries<B>,
    short: usize,
    long: usize,
    signal: usize,
) -> Result<MacdResult> {
    IndicatorEngine::new().macd(series, MacdParams::new(short, long, signal))
}
