//! Numeric-to-text conversions used when values are written out.
//!
//! Output never depends on the process locale. Reals are rendered the way a
//! C `printf("%.*g")` or `printf("%.*f")` would render them, then normalised:
//! a `.0` is appended to anything that would otherwise read back as an
//! integer, and decimal-places output has its zero padding trimmed.

use crate::config::FormatConfig;
use crate::value::DEFAULT_REAL_PRECISION;

/// How the precision of a real is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrecisionType {
  /// Maximum number of significant digits.
  #[default]
  SignificantDigits,
  /// Maximum number of digits after the decimal point.
  DecimalPlaces,
}

const SPECIAL_FLOATS: [&str; 3] = ["NaN", "-Infinity", "Infinity"];
const JSON_SAFE_FLOATS: [&str; 3] = ["null", "-1e+9999", "1e+9999"];

pub fn value_to_string_i64(value: i64) -> String {
  itoa::Buffer::new().format(value).to_owned()
}

pub fn value_to_string_u64(value: u64) -> String {
  itoa::Buffer::new().format(value).to_owned()
}

pub fn value_to_string_i32(value: i32) -> String {
  value_to_string_i64(value as i64)
}

pub fn value_to_string_u32(value: u32) -> String {
  value_to_string_u64(value as u64)
}

pub fn value_to_string_bool(value: bool) -> &'static str {
  if value {
    "true"
  } else {
    "false"
  }
}

/// A real with the default settings: 17 significant digits, JSON-safe
/// tokens for non-finite values.
pub fn value_to_string_f64(value: f64) -> String {
  value_to_string_f64_with(value, false, DEFAULT_REAL_PRECISION, PrecisionType::SignificantDigits)
}

pub fn double_to_string(value: f64, config: &FormatConfig) -> String {
  value_to_string_f64_with(
    value,
    config.use_special_floats,
    config.precision,
    config.precision_type,
  )
}

/// Renders `value` with `precision` digits counted per `precision_type`.
///
/// Non-finite values become `NaN`/`-Infinity`/`Infinity` when
/// `use_special_floats` is set and `null`/`-1e+9999`/`1e+9999` otherwise.
pub fn value_to_string_f64_with(
  value: f64,
  use_special_floats: bool,
  precision: u32,
  precision_type: PrecisionType,
) -> String {
  if !value.is_finite() {
    let tokens = if use_special_floats { SPECIAL_FLOATS } else { JSON_SAFE_FLOATS };
    let slot = if value.is_nan() {
      0
    } else if value < 0.0 {
      1
    } else {
      2
    };
    return tokens[slot].to_owned();
  }

  let mut buffer = match precision_type {
    PrecisionType::SignificantDigits => format_significant(value, precision),
    PrecisionType::DecimalPlaces => format!("{:.*}", precision as usize, value),
  };
  fix_numeric_locale(&mut buffer);
  if !buffer.contains('.') && !buffer.contains('e') {
    buffer.push_str(".0");
  }
  if precision_type == PrecisionType::DecimalPlaces {
    let end = fix_zeros_in_the_end(buffer.as_bytes(), precision);
    buffer.truncate(end);
  }
  buffer
}

/// `%.*g`: shortest of fixed and scientific notation for `precision`
/// significant digits, trailing zeros removed.
fn format_significant(value: f64, precision: u32) -> String {
  let digits = precision.max(1) as usize;
  let scientific = format!("{:.*e}", digits - 1, value);
  let (mantissa, exponent) = match scientific.split_once('e') {
    Some(parts) => parts,
    None => return scientific,
  };
  let exponent: i64 = exponent.parse().unwrap_or(0);

  if exponent < -4 || exponent >= digits as i64 {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", strip_fraction_zeros(mantissa), sign, exponent.abs())
  } else {
    let decimals = (digits as i64 - 1 - exponent) as usize;
    strip_fraction_zeros(&format!("{:.*}", decimals, value)).to_owned()
  }
}

fn strip_fraction_zeros(text: &str) -> &str {
  if text.contains('.') {
    text.trim_end_matches('0').trim_end_matches('.')
  } else {
    text
  }
}

/// Replaces a `,` decimal separator with `.`.
pub fn fix_numeric_locale(buffer: &mut String) {
  if buffer.contains(',') {
    *buffer = buffer.replace(',', ".");
  }
}

/// The new end of `buffer` once trailing zeros are dropped, stopping at one
/// digit after the decimal point. With `precision == 0` that last `.0` goes too.
pub fn fix_zeros_in_the_end(buffer: &[u8], precision: u32) -> usize {
  let mut end = buffer.len();
  while end > 0 {
    if buffer[end - 1] != b'0' {
      return end;
    }
    if end >= 3 && buffer[end - 2] == b'.' {
      return if precision != 0 { end } else { end - 2 };
    }
    end -= 1;
  }
  end
}
