//! Error type shared by every fallible operation on a value tree.

use thiserror::Error;

use crate::value::ValueType;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ValueError>;

/// Errors produced while building, reading, or addressing a value tree.
///
/// `Allocation` is the only resource failure. Every other variant is a logic
/// failure: the caller asked for something the value cannot provide.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
  /// A string buffer could not be allocated.
  #[error("failed to allocate string value buffer of {len} bytes")]
  Allocation {
    /// Requested buffer length.
    len: usize,
  },
  /// The operation does not accept values of this kind.
  #[error("{op}: value of type {found} is not accepted")]
  WrongType {
    /// Operation that was attempted.
    op: &'static str,
    /// Kind of the receiving value.
    found: ValueType,
  },
  /// A numeric value does not fit the requested target type.
  #[error("{op}: value out of {target} range")]
  OutOfRange {
    /// Operation that was attempted.
    op: &'static str,
    /// Name of the target numeric type.
    target: &'static str,
  },
  /// A path expression is malformed.
  #[error("invalid path {path:?} at byte {location}")]
  InvalidPath {
    /// Source text of the path.
    path: String,
    /// Byte offset where parsing stopped.
    location: usize,
  },
  /// A placeholder had no matching argument.
  #[error("path {path:?}: missing argument for placeholder {position}")]
  MissingPathArgument {
    /// Source text of the path.
    path: String,
    /// Zero-based placeholder number.
    position: usize,
  },
  /// A placeholder was bound to an argument of the wrong kind.
  #[error("path {path:?}: argument {position} should be {expected}")]
  BadPathArgument {
    /// Source text of the path.
    path: String,
    /// Zero-based placeholder number.
    position: usize,
    /// Argument kind the placeholder needs.
    expected: &'static str,
  },
}

impl ValueError {
  pub(crate) fn wrong_type(op: &'static str, found: ValueType) -> Self {
    ValueError::WrongType { op, found }
  }

  pub(crate) fn out_of_range(op: &'static str, target: &'static str) -> Self {
    ValueError::OutOfRange { op, target }
  }

  /// Returns `true` for failures caused by the caller rather than by the allocator.
  pub fn is_logic_error(&self) -> bool {
    !matches!(self, ValueError::Allocation { .. })
  }
}
