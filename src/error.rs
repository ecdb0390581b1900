use crate::Timestamp;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by series construction and indicator computation.
///
/// All of these are input validation failures. Nothing is retried and no
/// partial result accompanies an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The price series has no bars.
    #[error("price series has no bars")]
    EmptySeries,

    /// A window length or MACD parameter set is unusable.
    #[error("invalid window: {0}")]
    InvalidWindow(#[from] InvalidWindow),

    /// Bar times are not strictly ascending.
    #[error("bar {index} has time {current}, not after previous time {previous}")]
    UnorderedBars {
        index: usize,
        previous: Timestamp,
        current: Timestamp,
    },

    /// A bar carries a NaN or infinite open, high, low or close.
    #[error("bar {index} has a non-finite price")]
    NonFinitePrice { index: usize },

    /// The CSV input could not be read or a row could not be decoded.
    #[cfg(feature = "csv")]
    #[error("csv input: {0}")]
    Csv(#[from] ::csv::Error),

    /// A CSV row carries a time that is neither unix seconds nor a date.
    #[cfg(feature = "csv")]
    #[error("row {row}: unrecognised time {value:?}")]
    InvalidTime { row: usize, value: String },
}

/// Reason a window request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidWindow {
    /// A window length of zero bars.
    #[error("window length must be positive")]
    Zero,

    /// An empty set of window lengths.
    #[error("at least one window length is required")]
    NoWindows,

    /// MACD short EMA window not strictly below the long one.
    #[error("MACD short window {short} must be below long window {long}")]
    ShortNotBelowLong { short: usize, long: usize },
}
