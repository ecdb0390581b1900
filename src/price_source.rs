use crate::{Ohlcv, Price};

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// Price extracted from an [`Ohlcv`] bar before feeding into an indicator.
///
/// Closing price unless configured otherwise.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    #[default]
    Close,
    /// Median price: `(high + low) / 2`.
    HL2,
    /// Typical price: `(high + low + close) / 3`.
    HLC3,
    /// Average price: `(open + high + low + close) / 4`.
    OHLC4,
    /// Weighted close: `(high + low + close + close) / 4`.
    HLCC4,
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl PriceSource {
    #[inline]
    pub(crate) fn extract(self, bar: &impl Ohlcv) -> Price {
        match self {
            Self::Open => bar.open(),
            Self::High => bar.high(),
            Self::Low => bar.low(),
            Self::Close => bar.close(),
            Self::HL2 => f64::midpoint(bar.high(), bar.low()),
            Self::HLC3 => (bar.high() + bar.low() + bar.close()) / 3.0,
            Self::OHLC4 => (bar.open() + bar.high() + bar.low() + bar.close()) / 4.0,
            Self::HLCC4 => (bar.high() + bar.low() + bar.close() + bar.close()) / 4.0,
        }
    }
}
