//! Weather time-series file naming.
//!
//! Every weather time series exported for the model needs a short file-name
//! code. The code is derived from station metadata where possible (the
//! 4-character station id, or the first 4 characters of the station name)
//! and extended with the series' start year and duration in years. Stations
//! with no usable metadata, and codes that would collide with one already
//! issued, draw instead from a counter-based fallback sequence, so every
//! request yields a unique label.
use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::debug;

/// First value of the counter-based fallback sequence, rendered as uppercase
/// hexadecimal (`AAAA`, `AAAB`, ...).
const FALLBACK_SEED: u32 = 0xAAAA;

/// 2-digit years at or below this value belong to the 2000s, the rest to the
/// 1900s.
const CENTURY_PIVOT: i32 = 15;

/// Longest series duration representable in the 2-digit suffix.
const MAX_DURATION: i32 = 99;

/// Session-scoped allocator of weather file codes.
///
/// The registry lives for exactly one export run: repeated requests for the
/// same station key return the label issued the first time, and no label is
/// ever issued twice. Nothing is persisted across runs.
#[derive(Debug)]
pub struct StationCodeAllocator {
    used: HashSet<String>,
    by_key: HashMap<String, String>,
    next_fallback: u32,
}

impl Default for StationCodeAllocator {
    fn default() -> Self {
        Self {
            used: HashSet::new(),
            by_key: HashMap::new(),
            next_fallback: FALLBACK_SEED,
        }
    }
}

impl StationCodeAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate (or look up) the file code for one weather time series.
    ///
    /// `key` identifies the series for deduplication; an empty key yields an
    /// empty label and registers nothing, leaving the "no name available"
    /// case to the caller. `series_dates` are the series' date texts in
    /// order; only the first and last contribute to the year/duration
    /// suffix.
    pub fn allocate(
        &mut self,
        key: &str,
        station_id: &str,
        station_name: &str,
        series_dates: &[&str],
    ) -> String {
        if key.is_empty() {
            return String::new();
        }
        if let Some(label) = self.by_key.get(key) {
            return label.clone();
        }

        let mut code = match derived_code(station_id, station_name) {
            Some(code) => code,
            None => {
                debug!(key, "station metadata unusable, drawing fallback code");
                self.next_fallback_code()
            }
        };
        let suffix = year_span_suffix(series_dates);

        let mut label = format!("{code}{suffix}");
        while self.used.contains(&label) {
            debug!(%label, "weather file code already issued, redrawing");
            code = self.next_fallback_code();
            label = format!("{code}{suffix}");
        }

        self.used.insert(label.clone());
        self.by_key.insert(key.to_string(), label.clone());
        label
    }

    /// Allocate the file code straight from a weather data record, reading
    /// the `wst_id`, `wst_name`, and daily records' `w_date` fields.
    pub fn allocate_for(&mut self, weather: &Value) -> String {
        let key = text_or_empty(weather, "wst_id");
        let name = text_or_empty(weather, "wst_name");
        let dates: Vec<&str> = weather
            .get("dailyWeather")
            .and_then(Value::as_array)
            .map(|records| {
                records
                    .iter()
                    .map(|r| r.get("w_date").and_then(Value::as_str).unwrap_or(""))
                    .collect()
            })
            .unwrap_or_default();

        self.allocate(key, key, name, &dates)
    }

    fn next_fallback_code(&mut self) -> String {
        let code = format!("{:X}", self.next_fallback);
        self.next_fallback += 1;
        code
    }
}

fn text_or_empty<'a>(record: &'a Value, field: &str) -> &'a str {
    record.get(field).and_then(Value::as_str).unwrap_or("")
}

/// The 4-character base code from station metadata, if the metadata allows.
fn derived_code(station_id: &str, station_name: &str) -> Option<String> {
    if station_id.chars().count() == 4 {
        return Some(station_id.to_string());
    }
    if station_name.chars().count() >= 4 {
        return Some(station_name.chars().take(4).collect());
    }
    None
}

/// The start-year/duration suffix, e.g. `"8201"` for a series covering 1982.
///
/// The 2-digit years are characters 2..4 of the first and last date texts.
/// If either is unavailable the suffix is empty; if both are present but the
/// span cannot be computed, the duration falls back to `"01"`.
fn year_span_suffix(series_dates: &[&str]) -> String {
    let start = match two_digit_year(series_dates.first()) {
        Some(year) => year,
        None => return String::new(),
    };
    let end = match two_digit_year(series_dates.last()) {
        Some(year) => year,
        None => return String::new(),
    };

    let mut suffix = start.to_string();
    match (pivot_to_four_digits(start), pivot_to_four_digits(end)) {
        (Some(start_year), Some(end_year)) => {
            let duration = (end_year - start_year + 1).min(MAX_DURATION);
            suffix.push_str(&format!("{duration:02}"));
        }
        _ => suffix.push_str("01"),
    }
    suffix
}

fn two_digit_year<'a>(date: Option<&&'a str>) -> Option<&'a str> {
    let text = *date?;
    let year = text.get(2..4)?.trim();
    if year.is_empty() {
        None
    } else {
        Some(year)
    }
}

fn pivot_to_four_digits(two_digit: &str) -> Option<i32> {
    let year: i32 = two_digit.parse().ok()?;
    if year <= CENTURY_PIVOT {
        Some(year + 2000)
    } else {
        Some(year + 1900)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_station_id_used_verbatim() {
        let mut alloc = StationCodeAllocator::new();
        let label = alloc.allocate("st1", "UFGA", "Gainesville, FL", &["19820101", "19821231"]);
        assert_eq!(label, "UFGA8201");
    }

    #[test]
    fn test_name_prefix_when_id_is_not_four_chars() {
        let mut alloc = StationCodeAllocator::new();
        let label = alloc.allocate("st1", "UF", "Gainesville, FL", &["19820101", "19821231"]);
        assert_eq!(label, "Gain8201");
    }

    #[test]
    fn test_fallback_counter_when_metadata_is_degenerate() {
        let mut alloc = StationCodeAllocator::new();
        let a = alloc.allocate("st1", "UF", "GNV", &["19820101", "19821231"]);
        let b = alloc.allocate("st2", "", "", &["19820101", "19821231"]);
        assert_eq!(a, "AAAA8201");
        assert_eq!(b, "AAAB8201");
    }

    #[test]
    fn test_idempotent_per_key() {
        let mut alloc = StationCodeAllocator::new();
        let first = alloc.allocate("st1", "UFGA", "", &["19820101", "19821231"]);
        let second = alloc.allocate("st1", "UFGA", "", &["19820101", "19821231"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_collisions_redraw_from_counter() {
        let mut alloc = StationCodeAllocator::new();
        let a = alloc.allocate("st1", "UFGA", "", &["19820101", "19821231"]);
        let b = alloc.allocate("st2", "UFGA", "", &["19820101", "19821231"]);
        assert_eq!(a, "UFGA8201");
        assert_eq!(b, "AAAA8201");
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_key_yields_empty_label() {
        let mut alloc = StationCodeAllocator::new();
        assert_eq!(alloc.allocate("", "UFGA", "", &["19820101"]), "");
        assert_eq!(alloc.allocate("", "UFGA", "", &["19820101"]), "");
    }

    #[test]
    fn test_suffix_duration_spans_years() {
        let mut alloc = StationCodeAllocator::new();
        let label = alloc.allocate("st1", "UFGA", "", &["19990101", "20011231"]);
        assert_eq!(label, "UFGA9903");
    }

    #[test]
    fn test_suffix_century_pivot() {
        let mut alloc = StationCodeAllocator::new();
        let label = alloc.allocate("st1", "UFGA", "", &["20100101", "20151231"]);
        assert_eq!(label, "UFGA1006");
    }

    #[test]
    fn test_suffix_duration_clamped() {
        let mut alloc = StationCodeAllocator::new();
        let label = alloc.allocate("st1", "UFGA", "", &["19160101", "20151231"]);
        assert_eq!(label, "UFGA1699");
    }

    #[test]
    fn test_suffix_empty_without_dates() {
        let mut alloc = StationCodeAllocator::new();
        assert_eq!(alloc.allocate("st1", "UFGA", "", &[]), "UFGA");
        assert_eq!(alloc.allocate("st2", "UFGB", "", &["82", "83"]), "UFGB");
    }

    #[test]
    fn test_suffix_unparseable_span_defaults_to_one() {
        let mut alloc = StationCodeAllocator::new();
        let label = alloc.allocate("st1", "UFGA", "", &["19xz0101", "19yy1231"]);
        assert_eq!(label, "UFGAxz01");
    }

    #[test]
    fn test_allocate_for_weather_record() {
        let weather = json!({
            "wst_id": "UFGA",
            "wst_name": "Gainesville, FL",
            "dailyWeather": [
                {"w_date": "19820101", "srad": 5.9},
                {"w_date": "19821231", "srad": 2.0}
            ]
        });
        let mut alloc = StationCodeAllocator::new();
        assert_eq!(alloc.allocate_for(&weather), "UFGA8201");
        assert_eq!(alloc.allocate_for(&weather), "UFGA8201");
    }

    #[test]
    fn test_allocate_for_without_station_key() {
        let mut alloc = StationCodeAllocator::new();
        assert_eq!(alloc.allocate_for(&json!({"wst_name": "nowhere"})), "");
    }
}
