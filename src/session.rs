//! One export run: configuration, diagnostics, and naming state.
//!
//! An [`ExportSession`] brackets a single export: it owns the configured
//! defaults, the date codec, the diagnostic sink, and the weather file-code
//! registry, and is dropped when the run ends. The external layout assembler
//! drives it field by field, pulling named fields out of record values and
//! receiving ready-to-place column text.
use std::borrow::Cow;

use serde_json::Value;

use crate::dates::DateCodec;
use crate::defaults::{Defaults, FieldKind};
use crate::diag::DiagnosticSink;
use crate::numeric;
use crate::station::StationCodeAllocator;

/// The textual content of a record's field.
///
/// Strings are borrowed, numbers and booleans are stringified, and a
/// missing or null field (or a non-record `record`) yields the empty
/// missing-value sentinel.
pub fn field_text<'a>(record: &'a Value, name: &str) -> Cow<'a, str> {
    match record.get(name) {
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(Value::Number(n)) => Cow::Owned(n.to_string()),
        Some(Value::Bool(b)) => Cow::Owned(b.to_string()),
        _ => Cow::Borrowed(""),
    }
}

/// State for one export run.
pub struct ExportSession {
    defaults: Defaults,
    dates: DateCodec,
    sink: DiagnosticSink,
    stations: StationCodeAllocator,
}

impl Default for ExportSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportSession {
    pub fn new() -> Self {
        Self::with_defaults(Defaults::default())
    }

    pub fn with_defaults(defaults: Defaults) -> Self {
        let dates = DateCodec::new(defaults.date);
        Self {
            defaults,
            dates,
            sink: DiagnosticSink::new(),
            stations: StationCodeAllocator::new(),
        }
    }

    /// A real-number column: `record[name]` formatted into `width`
    /// characters, with the configured real default when missing.
    pub fn real_field(&mut self, width: usize, record: &Value, name: &str) -> String {
        let default = self.defaults.for_kind(FieldKind::Real);
        self.numeric_field(width, record, name, &default)
    }

    /// An integer column, with the configured integer default when missing.
    pub fn integer_field(&mut self, width: usize, record: &Value, name: &str) -> String {
        let default = self.defaults.for_kind(FieldKind::Integer);
        self.numeric_field(width, record, name, &default)
    }

    /// A numeric column with a caller-chosen default, for the handful of
    /// columns whose documented default is not the per-kind one.
    pub fn numeric_field(
        &mut self,
        width: usize,
        record: &Value,
        name: &str,
        default: &str,
    ) -> String {
        let raw = field_text(record, name);
        let (text, warning) = numeric::format_decimal(width, &raw, default);
        if let Some(warning) = warning {
            self.sink.push(&warning);
        }
        text
    }

    /// A date column in the `YYDDD` encoding, substituting the configured
    /// default date when the field is missing or unparseable.
    pub fn date_field(&self, record: &Value, name: &str) -> String {
        self.dates.encode(&field_text(record, name))
    }

    /// A date column shifted by `days`, writing the missing-value sentinel
    /// when the field cannot be encoded.
    pub fn date_field_offset(&self, record: &Value, name: &str, days: i64) -> String {
        self.dates.encode_offset(&field_text(record, name), days)
    }

    /// A text field, raw or the configured text default. Padding to the
    /// column layout is the caller's concern.
    pub fn text_field(&self, record: &Value, name: &str) -> String {
        let raw = field_text(record, name);
        if raw.is_empty() {
            self.defaults.for_kind(FieldKind::Text)
        } else {
            raw.into_owned()
        }
    }

    /// The file code for a weather data record (see
    /// [`StationCodeAllocator::allocate_for`]).
    pub fn weather_file_code(&mut self, weather: &Value) -> String {
        self.stations.allocate_for(weather)
    }

    /// Append a caller-phrased warning line to the diagnostic sink.
    pub fn note(&mut self, line: impl Into<String>) {
        self.sink.note(line);
    }

    /// The warnings accumulated so far.
    pub fn warnings(&self) -> &DiagnosticSink {
        &self.sink
    }

    /// End the run, yielding the warning block for the output artifact.
    pub fn into_report(self) -> String {
        self.sink.report()
    }
}
