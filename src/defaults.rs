//! Per-column-kind default values.
//!
//! Every column in a DSSAT file holds one of four kinds of value: a real
//! number, an integer, a text code, or a date. When a record is missing a
//! field, the layout assembler substitutes the default configured for that
//! column's kind rather than leaving the column malformed.
use std::fmt::Display;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::dates;
use crate::error::{ConfigError, ConfigResult};

/// Which kind of value a column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Real,
    Integer,
    Text,
    Date,
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FieldKind::Real => "R",
            FieldKind::Integer => "I",
            FieldKind::Text => "C",
            FieldKind::Date => "D",
        };

        write!(f, "{s}")
    }
}

/// Default value substituted for a missing field, per column kind.
///
/// Deserializable so an export configuration can override any of them; the
/// date accepts the compact `YYYYMMDD` form (with or without separators) and
/// is rejected at this boundary if it is not a real calendar date.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub real: String,
    pub integer: String,
    pub text: String,
    #[serde(deserialize_with = "compact_date")]
    pub date: NaiveDate,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            real: "0.00".to_string(),
            integer: "0".to_string(),
            text: String::new(),
            date: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
        }
    }
}

impl Defaults {
    /// The textual default for a column of the given kind. Dates render in
    /// the compact `YYYYMMDD` input form, not the encoded output form.
    pub fn for_kind(&self, kind: FieldKind) -> String {
        match kind {
            FieldKind::Real => self.real.clone(),
            FieldKind::Integer => self.integer.clone(),
            FieldKind::Text => self.text.clone(),
            FieldKind::Date => self.date.format("%Y%m%d").to_string(),
        }
    }

    /// Replace the default date from compact text, validating it.
    pub fn with_date_text(mut self, text: &str) -> ConfigResult<Self> {
        self.date = dates::parse_compact(text)
            .ok_or_else(|| ConfigError::InvalidDefaultDate(text.to_string()))?;
        Ok(self)
    }
}

fn compact_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    dates::parse_compact(&text)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid compact date '{text}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        assert_eq!(FieldKind::Real.to_string(), "R");
        assert_eq!(FieldKind::Integer.to_string(), "I");
        assert_eq!(FieldKind::Text.to_string(), "C");
        assert_eq!(FieldKind::Date.to_string(), "D");
    }

    #[test]
    fn test_stock_defaults() {
        let d = Defaults::default();
        assert_eq!(d.for_kind(FieldKind::Real), "0.00");
        assert_eq!(d.for_kind(FieldKind::Integer), "0");
        assert_eq!(d.for_kind(FieldKind::Text), "");
        assert_eq!(d.for_kind(FieldKind::Date), "20110101");
    }

    #[test]
    fn test_with_date_text() {
        let d = Defaults::default().with_date_text("19820725").unwrap();
        assert_eq!(d.date, NaiveDate::from_ymd_opt(1982, 7, 25).unwrap());

        let e = Defaults::default().with_date_text("not-a-date");
        assert!(e.is_err(), "a garbage default date must be rejected");
    }

    #[test]
    fn test_deserialize_overrides() {
        let d: Defaults = serde_json::from_value(serde_json::json!({
            "real": "-99.0",
            "date": "19820101"
        }))
        .unwrap();
        assert_eq!(d.real, "-99.0");
        assert_eq!(d.integer, "0");
        assert_eq!(d.date, NaiveDate::from_ymd_opt(1982, 1, 1).unwrap());
    }

    #[test]
    fn test_deserialize_rejects_bad_date() {
        let e = serde_json::from_value::<Defaults>(serde_json::json!({"date": "1982"}));
        assert!(e.is_err());
    }
}
