//! Keys of a member table: an array index or an object member name.

use core::cmp::Ordering;
use core::fmt;

use crate::string_store::StringStore;

/// Position of an element inside an array value.
pub type ArrayIndex = u32;

/// Key of a [`MemberTable`](crate::member_table::MemberTable) entry.
///
/// Arrays only ever hold `Index` keys and objects only ever hold `Name` keys.
/// Indices order numerically, names order by byte content and then by length.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum MemberKey {
  Index(ArrayIndex),
  Name(StringStore),
}

impl MemberKey {
  /// A name key holding its own copy of `name`.
  pub fn name(name: &[u8]) -> Self {
    MemberKey::Name(StringStore::owned(name))
  }

  /// A name key that borrows `name` until the key is cloned.
  pub fn static_name(name: &'static str) -> Self {
    MemberKey::Name(StringStore::owned_on_copy(name.as_bytes()))
  }

  pub fn is_index(&self) -> bool {
    matches!(self, MemberKey::Index(_))
  }

  pub fn index(&self) -> Option<ArrayIndex> {
    match self {
      MemberKey::Index(index) => Some(*index),
      MemberKey::Name(_) => None,
    }
  }

  pub fn name_bytes(&self) -> Option<&[u8]> {
    match self {
      MemberKey::Index(_) => None,
      MemberKey::Name(store) => Some(store.as_bytes()),
    }
  }

  /// Compares this key with a lookup index without building a key.
  pub(crate) fn cmp_index(&self, index: ArrayIndex) -> Ordering {
    match self {
      MemberKey::Index(own) => own.cmp(&index),
      MemberKey::Name(_) => Ordering::Greater,
    }
  }

  /// Compares this key with a lookup name without building a key.
  pub(crate) fn cmp_name(&self, name: &[u8]) -> Ordering {
    match self {
      MemberKey::Index(_) => Ordering::Less,
      MemberKey::Name(store) => store.as_bytes().cmp(name),
    }
  }
}

impl From<ArrayIndex> for MemberKey {
  fn from(index: ArrayIndex) -> Self {
    MemberKey::Index(index)
  }
}

impl From<&str> for MemberKey {
  fn from(name: &str) -> Self {
    MemberKey::name(name.as_bytes())
  }
}

impl fmt::Debug for MemberKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MemberKey::Index(index) => write!(f, "[{}]", index),
      MemberKey::Name(store) => write!(f, "{:?}", String::from_utf8_lossy(store.as_bytes())),
    }
  }
}
