//! Byte storage behind string values and member names.
//!
//! A `StringStore` holds an explicit-length byte range (embedded zero bytes are
//! preserved) under one of three duplication policies:
//!
//! * `Borrowed` points at caller memory that lives for the whole program and is
//!   never copied, not even when the store itself is cloned.
//! * `Owned` holds its own buffer, freed with the store.
//! * `OwnedOnCopy` starts out borrowing caller memory and turns into an `Owned`
//!   copy the first time the store is cloned. Member keys built from static
//!   names use it.
//!
//! Input longer than [`MAX_STRING_LENGTH`] is truncated, with a warning, when
//! the store is built.

use core::cmp::Ordering;
use core::fmt;

use log::warn;

use crate::error::{Result, ValueError};

/// Largest byte length a store keeps. Longer input is truncated.
pub const MAX_STRING_LENGTH: usize = (1 << 30) - 1;

/// The lifetime strategy of a [`StringStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicationPolicy {
  /// Caller-owned memory, never copied.
  NoDuplication,
  /// Buffer owned by the store.
  Duplicate,
  /// Borrowed until the store is cloned.
  DuplicateOnCopy,
}

/// Owned or borrowed byte payload of a string.
pub enum StringStore {
  Borrowed(&'static [u8]),
  Owned(Box<[u8]>),
  OwnedOnCopy(&'static [u8]),
}

// Lengths are bounded once, when a store is built.
fn clamp(bytes: &[u8]) -> &[u8] {
  if bytes.len() > MAX_STRING_LENGTH {
    warn!(
      "string of {} bytes truncated to {} bytes",
      bytes.len(),
      MAX_STRING_LENGTH
    );
    &bytes[..MAX_STRING_LENGTH]
  } else {
    bytes
  }
}

impl StringStore {
  /// Wraps static memory without copying it.
  pub fn borrowed(bytes: &'static [u8]) -> Self {
    StringStore::Borrowed(clamp(bytes))
  }

  /// Wraps static memory that must be duplicated when the store is cloned.
  pub fn owned_on_copy(bytes: &'static [u8]) -> Self {
    StringStore::OwnedOnCopy(clamp(bytes))
  }

  /// Copies `bytes` into a new buffer, aborting on allocation failure like any `Vec`.
  pub fn owned(bytes: &[u8]) -> Self {
    StringStore::Owned(clamp(bytes).into())
  }

  /// Copies `bytes` into a new buffer, reporting allocation failure as an error.
  pub fn try_owned(bytes: &[u8]) -> Result<Self> {
    let bytes = clamp(bytes);
    let mut buffer = Vec::new();
    buffer
      .try_reserve_exact(bytes.len())
      .map_err(|_| ValueError::Allocation { len: bytes.len() })?;
    buffer.extend_from_slice(bytes);
    Ok(StringStore::Owned(buffer.into_boxed_slice()))
  }

  /// The payload bytes, with embedded zeros and no terminator.
  pub fn as_bytes(&self) -> &[u8] {
    match self {
      StringStore::Borrowed(bytes) | StringStore::OwnedOnCopy(bytes) => bytes,
      StringStore::Owned(bytes) => bytes,
    }
  }

  /// Payload bytes up to (not including) the first zero byte.
  pub fn as_c_bytes(&self) -> &[u8] {
    let bytes = self.as_bytes();
    match bytes.iter().position(|b| *b == 0) {
      Some(end) => &bytes[..end],
      None => bytes,
    }
  }

  pub fn len(&self) -> usize {
    self.as_bytes().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn policy(&self) -> DuplicationPolicy {
    match self {
      StringStore::Borrowed(_) => DuplicationPolicy::NoDuplication,
      StringStore::Owned(_) => DuplicationPolicy::Duplicate,
      StringStore::OwnedOnCopy(_) => DuplicationPolicy::DuplicateOnCopy,
    }
  }

  /// Returns `true` if the store never copies its bytes.
  pub fn is_static(&self) -> bool {
    self.policy() == DuplicationPolicy::NoDuplication
  }
}

impl Clone for StringStore {
  fn clone(&self) -> Self {
    match self {
      StringStore::Borrowed(bytes) => StringStore::Borrowed(*bytes),
      StringStore::Owned(bytes) => StringStore::Owned(bytes.clone()),
      StringStore::OwnedOnCopy(bytes) => StringStore::owned(bytes),
    }
  }
}

impl Default for StringStore {
  fn default() -> Self {
    StringStore::Borrowed(b"")
  }
}

impl PartialEq for StringStore {
  fn eq(&self, other: &Self) -> bool {
    self.as_bytes() == other.as_bytes()
  }
}

impl Eq for StringStore {}

impl PartialOrd for StringStore {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

/// Byte content first, then length.
impl Ord for StringStore {
  fn cmp(&self, other: &Self) -> Ordering {
    self.as_bytes().cmp(other.as_bytes())
  }
}

impl fmt::Debug for StringStore {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}({:?})", self.policy(), String::from_utf8_lossy(self.as_bytes()))
  }
}
