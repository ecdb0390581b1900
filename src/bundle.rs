use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    IndicatorEngine, IndicatorFrame, IndicatorSeries, MacdParams, MacdResult, Ohlcv, PriceSeries,
    PriceSource, Result, Windows,
};

/// Which indicators to derive from a series, and on which price.
///
/// Deserializable so it can live in a config file next to the chart settings.
/// Absent indicators are not computed.
///
/// ```
/// use vnstock_ta::{IndicatorRequest, MacdParams, PriceSource, Windows};
///
/// let request: IndicatorRequest = serde_json::from_str(
///     r#"{ "sma": [20, 50], "ema": 12, "macd": {} }"#,
/// ).unwrap();
///
/// assert_eq!(request.source, PriceSource::Close);
/// assert_eq!(request.sma, Some(Windows::from([20, 50])));
/// assert_eq!(request.ema, Some(Windows::from(12)));
/// assert_eq!(request.macd, Some(MacdParams::default()));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorRequest {
    pub source: PriceSource,
    pub sma: Option<Windows>,
    pub ema: Option<Windows>,
    pub macd: Option<MacdParams>,
}

impl IndicatorRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    #[must_use]
    pub fn with_sma(mut self, windows: impl Into<Windows>) -> Self {
        self.sma = Some(windows.into());
        self
    }

    #[must_use]
    pub fn with_ema(mut self, windows: impl Into<Windows>) -> Self {
        self.ema = Some(windows.into());
        self
    }

    #[must_use]
    pub fn with_macd(mut self, params: MacdParams) -> Self {
        self.macd = Some(params);
        self
    }
}

/// Indicator outputs handed to a chart renderer.
///
/// Each indicator is present exactly when it was requested, so a renderer
/// overlays what is there instead of probing for it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IndicatorBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    sma: Option<IndicatorFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ema: Option<IndicatorFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    macd: Option<MacdResult>,
}

impl IndicatorBundle {
    /// Computes everything `request` asks for.
    ///
    /// # Errors
    ///
    /// The first error of any requested computation; nothing is returned
    /// alongside it. An empty request succeeds with an empty bundle.
    pub fn compute<B: Ohlcv>(
        series: &PriceSeries<B>,
        request: &IndicatorRequest,
    ) -> Result<Self> {
        let engine = IndicatorEngine::new().with_source(request.source);

        debug!(
            "bundle for {} over {} bars: sma={:?} ema={:?} macd={:?}",
            series.instrument().map_or("<unnamed>", |i| i.symbol.as_str()),
            series.len(),
            request.sma,
            request.ema,
            request.macd,
        );

        Ok(Self {
            sma: request
                .sma
                .as_ref()
                .map(|w| engine.sma(series, w))
                .transpose()?,
            ema: request
                .ema
                .as_ref()
                .map(|w| engine.ema(series, w))
                .transpose()?,
            macd: request
                .macd
                .map(|params| engine.macd(series, params))
                .transpose()?,
        })
    }

    #[must_use]
    pub fn sma(&self) -> Option<&IndicatorFrame> {
        self.sma.as_ref()
    }

    #[must_use]
    pub fn ema(&self) -> Option<&IndicatorFrame> {
        self.ema.as_ref()
    }

    #[must_use]
    pub fn macd(&self) -> Option<&MacdResult> {
        self.macd.as_ref()
    }

    /// Moving average columns drawn over the price chart, SMA before EMA.
    pub fn overlays(&self) -> impl Iterator<Item = &IndicatorSeries> {
        self.sma
            .iter()
            .chain(self.ema.iter())
            .flat_map(IndicatorFrame::iter)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sma.is_none() && self.ema.is_none() && self.macd.is_none()
    }
}
