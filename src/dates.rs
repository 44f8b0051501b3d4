//! Compact day-of-year date encoding.
//!
//! DSSAT date columns use a five-character `YYDDD` encoding: the 2-digit
//! year followed by the 1-based day of the year, zero-padded to 3 digits.
//! Input dates arrive as `YYYYMMDD` text, with or without `/` separators.
use chrono::{Datelike, Duration, NaiveDate};

/// Sentinel written by the offset-bearing entry point when a date cannot be
/// encoded. DSSAT readers treat it as a missing value.
pub const MISSING_DATE: &str = "-99";

/// Parse compact `YYYYMMDD` date text, tolerating `/` separators anywhere.
///
/// The year, month, and day are read from fixed character offsets after the
/// separators are stripped; anything that does not yield a real calendar
/// date is `None`.
pub fn parse_compact(text: &str) -> Option<NaiveDate> {
    let digits: String = text.chars().filter(|c| *c != '/').collect();
    let year: i32 = digits.get(0..4)?.parse().ok()?;
    let month: u32 = digits.get(4..6)?.parse().ok()?;
    let day: u32 = digits.get(6..)?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The `YYDDD` encoding of one calendar date.
pub fn day_of_year_code(date: NaiveDate) -> String {
    format!("{:02}{:03}", date.year().rem_euclid(100), date.ordinal())
}

/// Encoder for date columns, configured with the fallback default date.
///
/// The two entry points fail differently on purpose: [`encode`] substitutes
/// the configured default date, while [`encode_offset`] writes the
/// [`MISSING_DATE`] sentinel. Call sites depend on both behaviors, so they
/// are kept distinct.
///
/// [`encode`]: DateCodec::encode
/// [`encode_offset`]: DateCodec::encode_offset
#[derive(Debug, Clone, Copy)]
pub struct DateCodec {
    default: NaiveDate,
}

impl DateCodec {
    pub fn new(default: NaiveDate) -> Self {
        Self { default }
    }

    /// Encode date text as `YYDDD`, substituting the configured default date
    /// when the text does not parse.
    pub fn encode(&self, text: &str) -> String {
        match parse_compact(text) {
            Some(date) => day_of_year_code(date),
            None => day_of_year_code(self.default),
        }
    }

    /// Encode date text shifted by `days` as `YYDDD`, returning the
    /// [`MISSING_DATE`] sentinel when the text does not parse or the shift
    /// leaves the calendar.
    pub fn encode_offset(&self, text: &str, days: i64) -> String {
        parse_compact(text)
            .and_then(|date| {
                Duration::try_days(days).and_then(|delta| date.checked_add_signed(delta))
            })
            .map(day_of_year_code)
            .unwrap_or_else(|| MISSING_DATE.to_string())
    }
}
