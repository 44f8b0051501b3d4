//! Fixed-width numeric column formatting.
//!
//! DSSAT input files hold one value per fixed-width column, and the model's
//! readers cannot tolerate a value spilling past its column. The formatter
//! here guarantees that: a value whose integer digits fit is rounded into the
//! remaining columns, and a value whose integer digits do not fit degrades to
//! an empty field plus a warning rather than corrupting the line.
//!
//! The rounding policy is bounded but lossy, and it carries one deliberate
//! quirk: when rounding the fractional digits carries into the integer part
//! (e.g. `9.996` rounded to two digits), the carry is destroyed by the
//! modulo step and the output keeps the original integer digits (`9.00`,
//! not `10.0`). Downstream consumers have seen this behavior for years, so
//! it is preserved and pinned by a test rather than corrected.
use crate::diag::FieldWarning;

/// Render a decimal value into a column of exactly `width` characters.
///
/// An empty `raw` value means "missing" and is replaced by `default` before
/// formatting. On the happy path the returned string is right-justified to
/// exactly `width` characters. Two degraded outcomes are reported through
/// the returned [`FieldWarning`] instead of an error:
///
/// * integer digits wider than the column: empty text, `Oversized` warning;
/// * a value that needed rounding but is not numeric: the raw text passed
///   through unchanged, `Malformed` warning.
pub fn format_decimal(width: usize, raw: &str, default: &str) -> (String, Option<FieldWarning>) {
    let value = if raw.is_empty() { default } else { raw };

    let parts: Vec<&str> = value.split('.').collect();
    let int_part = parts[0];
    let frac_part = parts.get(1).copied().filter(|f| !f.is_empty());

    if int_part.len() > width {
        let warning = FieldWarning::Oversized { value: value.to_string(), width };
        return (String::new(), Some(warning));
    }

    let mut out = int_part.to_string();
    if let Some(frac) = frac_part {
        if int_part.len() < width {
            // One column is reserved for the decimal point itself.
            let allowed = width - int_part.len() - 1;
            if frac.len() <= allowed {
                out.push('.');
                out.push_str(frac);
            } else {
                match value.parse::<f64>() {
                    Ok(parsed) => push_rounded_fraction(&mut out, parsed, allowed),
                    Err(_) => {
                        let warning = FieldWarning::Malformed { value: value.to_string() };
                        return (value.to_string(), Some(warning));
                    }
                }
            }
        }
    }

    if out.len() < width {
        out = format!("{out:>width$}");
    }
    (out, None)
}

/// Append the decimal point and the rounded fractional digits to `out`.
///
/// The digits are the trailing `allowed` digits of the absolute value scaled
/// by `10^allowed` and rounded to the nearest integer; any carry into the
/// integer part is discarded by the modulo. When `allowed` is zero the point
/// would consume the only remaining column, so nothing is appended.
fn push_rounded_fraction(out: &mut String, parsed: f64, allowed: usize) {
    if allowed == 0 {
        return;
    }

    let scale = 10f64.powi(allowed as i32);
    let digits = ((parsed.abs() * scale).round() % scale) as u64;

    out.push('.');
    let mut buf = itoa::Buffer::new();
    let rendered = buf.format(digits);
    for _ in rendered.len()..allowed {
        out.push('0');
    }
    out.push_str(rendered);
}
