//! Settings handed to the collaborators that read and write value trees.
//!
//! The parser and the writer live outside this crate. What they share with it
//! is the shape of their configuration and of the parser's error report.

use crate::format::PrecisionType;
use crate::value::DEFAULT_REAL_PRECISION;

/// How a writer renders reals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
  /// Emit `NaN`/`Infinity` instead of the JSON-legal substitutes.
  pub use_special_floats: bool,
  pub precision: u32,
  pub precision_type: PrecisionType,
}

impl Default for FormatConfig {
  fn default() -> Self {
    FormatConfig {
      use_special_floats: false,
      precision: DEFAULT_REAL_PRECISION,
      precision_type: PrecisionType::SignificantDigits,
    }
  }
}

/// Strictness switches for a parser building value trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
  /// Accept `//` and `/* */` comments and attach them to values.
  pub allow_comments: bool,
  /// Require the root to be an array or an object.
  pub strict_root: bool,
  /// Accept `[1,,2]` and `{"a":}` with the gaps read as null.
  pub allow_dropped_null_placeholders: bool,
  /// Accept numbers as object keys.
  pub allow_numeric_keys: bool,
}

impl Features {
  /// Every extension on except those that change the shape of the document.
  pub const fn all() -> Self {
    Features {
      allow_comments: true,
      strict_root: false,
      allow_dropped_null_placeholders: false,
      allow_numeric_keys: false,
    }
  }

  /// Plain RFC JSON with an array or object at the root.
  pub const fn strict_mode() -> Self {
    Features {
      allow_comments: false,
      strict_root: true,
      allow_dropped_null_placeholders: false,
      allow_numeric_keys: false,
    }
  }
}

impl Default for Features {
  fn default() -> Self {
    Features::all()
  }
}

/// A parse failure located by its `[offset_start, offset_limit)` byte span,
/// the same span the parser stamps onto values it builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredError {
  pub offset_start: usize,
  pub offset_limit: usize,
  pub message: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn presets() {
    assert!(Features::all().allow_comments);
    assert!(!Features::all().strict_root);
    assert!(Features::strict_mode().strict_root);
    assert!(!Features::strict_mode().allow_comments);
    assert_eq!(Features::default(), Features::all());
  }

  #[test]
  fn default_format_is_round_trip_safe() {
    let config = FormatConfig::default();
    assert_eq!(config.precision, 17);
    assert_eq!(config.precision_type, PrecisionType::SignificantDigits);
    assert!(!config.use_special_floats);
  }
}
