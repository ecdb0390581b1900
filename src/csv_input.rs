//! CSV input for [`PriceSeries`].

use std::{io, path::Path};

use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use serde::Deserialize;

use crate::{Bar, Error, Price, PriceSeries, Result, Timestamp};

/// One CSV record as written by the upstream market data provider.
#[derive(Debug, Deserialize)]
struct Row {
    time: String,
    open: Price,
    high: Price,
    low: Price,
    close: Price,
    #[serde(default)]
    volume: Option<f64>,
}

impl PriceSeries<Bar> {
    /// Reads bars from `time,open,high,low,close[,volume]` CSV with a header
    /// row.
    ///
    /// `time` is unix seconds, `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`, the
    /// latter two read as UTC.
    ///
    /// # Errors
    ///
    /// [`Error::Csv`] for unreadable input or undecodable rows,
    /// [`Error::InvalidTime`] for an unrecognised time,
    /// [`Error::NonFinitePrice`] for `NaN` or `inf` prices,
    /// [`Error::UnorderedBars`] if times do not strictly ascend.
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let bars = reader
            .deserialize::<Row>()
            .enumerate()
            .map(|(index, row)| -> Result<Bar> {
                let row = row?;
                let time = parse_time(&row.time).ok_or_else(|| Error::InvalidTime {
                    row: index + 1,
                    value: row.time.clone(),
                })?;

                Ok(Bar {
                    time,
                    open: row.open,
                    high: row.high,
                    low: row.low,
                    close: row.close,
                    volume: row.volume,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("read {} bars from csv", bars.len());

        Self::new(bars)
    }

    /// Reads bars from a CSV file. See [`from_csv_reader`](Self::from_csv_reader).
    ///
    /// # Errors
    ///
    /// As [`from_csv_reader`](Self::from_csv_reader), plus [`Error::Csv`] if
    /// the file cannot be opened.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(csv::Error::from)?;
        Self::from_csv_reader(io::BufReader::new(file))
    }
}

fn parse_time(raw: &str) -> Option<Timestamp> {
    if let Ok(seconds) = raw.parse::<Timestamp>() {
        return Some(seconds);
    }

    let datetime = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    Timestamp::try_from(datetime.and_utc().timestamp()).ok()
}
