//! Typed field warnings and the per-file diagnostic buffer.
//!
//! A DSSAT export never aborts over a bad field value; instead each degraded
//! field produces a [`FieldWarning`] and the warning lines are collected in a
//! [`DiagnosticSink`]. The external file writer flushes the sink once, ahead
//! of the data body, so the warning block appears at the top of the written
//! artifact.
use std::fmt::Display;
use std::io::Write;

use itertools::Itertools;

/// A non-fatal problem encountered while formatting one field value.
///
/// Each variant renders as one conventional `"! Warning: ..."` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldWarning {
    /// Indicates that a value's integer digits alone exceed the column width,
    /// so nothing useful could be written.
    Oversized { value: String, width: usize },

    /// Indicates that a value needed rounding but was not numeric; the raw
    /// text was passed through unformatted.
    Malformed { value: String },
}

impl Display for FieldWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldWarning::Oversized { value, width } => {
                write!(f, "! Warning: oversized number [{value}] does not fit in {width} columns")
            }
            FieldWarning::Malformed { value } => {
                write!(f, "! Warning: non-numeric value [{value}] written through unformatted")
            }
        }
    }
}

/// Append-only buffer of warning lines for one output file.
///
/// Single-writer by design; the export runs on one thread and the sink is
/// flushed once all fields of a file have been produced.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    lines: Vec<String>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the warning line for a degraded field.
    pub fn push(&mut self, warning: &FieldWarning) {
        self.lines.push(warning.to_string());
    }

    /// Append a caller-phrased warning line, e.g. for a substituted default
    /// the layout assembler wants called out by field name.
    pub fn note(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.as_str())
    }

    /// All warning lines joined into one newline-separated block.
    pub fn report(&self) -> String {
        self.lines.iter().join("\n")
    }

    /// Write every warning line (each newline-terminated) to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for line in &self.lines {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }
}
