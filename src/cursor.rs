//! Walking the members of an array or object in key order.
//!
//! [`Cursor`] and [`CursorMut`] are positions inside one member table that
//! can step forwards and backwards, report the key at the position, and be
//! compared with other positions in the same table. [`Iter`] and [`IterMut`]
//! are the plain Rust iterators over the same entries.
//!
//! # Examples
//!
//! ```
//! use jsontree::{CursorBase, Value};
//!
//! let mut list = Value::null();
//! list.append(Value::from("a")).unwrap();
//! list.append(Value::from("b")).unwrap();
//!
//! let mut cursor = list.begin();
//! cursor.increment();
//! assert_eq!(cursor.index(), Some(1));
//! assert_eq!(cursor.value().and_then(Value::as_str), Some("b"));
//! assert_eq!(list.begin().distance(&list.end()), Some(2));
//! ```

use core::fmt;
use core::iter::FusedIterator;

use crate::member_key::{ArrayIndex, MemberKey};
use crate::member_table::Entry;
use crate::value::Value;

/// Position logic shared by [`Cursor`] and [`CursorMut`].
///
/// Positions run from `0` (the first entry) to `entries().len()` (past the end).
pub trait CursorBase {
  /// Entries of the table the cursor walks.
  fn entries(&self) -> &[Entry];

  /// Address of the value whose table the cursor walks. Cursors with the
  /// same owner walk the same table.
  fn owner(&self) -> usize;

  fn position(&self) -> usize;

  fn seek(&mut self, position: usize);

  fn is_end(&self) -> bool {
    self.position() >= self.entries().len()
  }

  /// Moves to the next entry. Stays put once past the end.
  fn increment(&mut self) {
    if !self.is_end() {
      self.seek(self.position() + 1);
    }
  }

  /// Moves to the previous entry. Stays put at the first entry.
  fn decrement(&mut self) {
    if self.position() > 0 {
      self.seek(self.position() - 1);
    }
  }

  fn current_key(&self) -> Option<&MemberKey> {
    self.entries().get(self.position()).map(|(key, _)| key)
  }

  /// The current key as a value: an unsigned integer inside an array, a
  /// string inside an object, null past the end.
  fn key(&self) -> Value {
    match self.current_key() {
      Some(MemberKey::Index(index)) => Value::from(*index),
      Some(MemberKey::Name(store)) => Value::from_store(store.clone()),
      None => Value::null(),
    }
  }

  /// The current index when walking an array.
  fn index(&self) -> Option<ArrayIndex> {
    self.current_key().and_then(MemberKey::index)
  }

  /// The current member name when walking an object, `""` otherwise.
  fn name(&self) -> String {
    self.member_name()
      .map(|name| String::from_utf8_lossy(name).into_owned())
      .unwrap_or_default()
  }

  /// Exact bytes of the current member name when walking an object.
  fn member_name(&self) -> Option<&[u8]> {
    self.current_key().and_then(MemberKey::name_bytes)
  }

  fn same_table(&self, other: &dyn CursorBase) -> bool {
    self.owner() == other.owner()
  }

  /// Steps from `self` to `other`, `None` if they walk different tables.
  fn distance(&self, other: &dyn CursorBase) -> Option<isize> {
    if !self.same_table(other) {
      return None;
    }
    Some(other.position() as isize - self.position() as isize)
  }

  fn is_equal(&self, other: &dyn CursorBase) -> bool {
    self.same_table(other) && self.position() == other.position()
  }
}

/// A read-only position in a member table.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
  owner: usize,
  entries: &'a [Entry],
  position: usize,
}

impl<'a> Cursor<'a> {
  pub(crate) fn new(owner: usize, entries: &'a [Entry], position: usize) -> Self {
    Cursor { owner, entries, position }
  }

  /// The value at the position, `None` past the end.
  pub fn value(&self) -> Option<&'a Value> {
    self.entries.get(self.position).map(|(_, value)| value)
  }
}

impl CursorBase for Cursor<'_> {
  fn entries(&self) -> &[Entry] {
    self.entries
  }

  fn owner(&self) -> usize {
    self.owner
  }

  fn position(&self) -> usize {
    self.position
  }

  fn seek(&mut self, position: usize) {
    self.position = position;
  }
}

impl PartialEq for Cursor<'_> {
  fn eq(&self, other: &Self) -> bool {
    self.is_equal(other)
  }
}

impl fmt::Debug for Cursor<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Cursor")
      .field("position", &self.position)
      .field("len", &self.entries.len())
      .finish()
  }
}

/// A position in a member table that can write through to the value.
pub struct CursorMut<'a> {
  owner: usize,
  entries: &'a mut [Entry],
  position: usize,
}

impl<'a> CursorMut<'a> {
  pub(crate) fn new(owner: usize, entries: &'a mut [Entry], position: usize) -> Self {
    CursorMut { owner, entries, position }
  }

  pub fn value(&self) -> Option<&Value> {
    self.entries.get(self.position).map(|(_, value)| value)
  }

  pub fn value_mut(&mut self) -> Option<&mut Value> {
    self.entries.get_mut(self.position).map(|(_, value)| value)
  }

  /// A read-only cursor at the same position.
  pub fn as_cursor(&self) -> Cursor<'_> {
    Cursor::new(self.owner, &*self.entries, self.position)
  }
}

impl CursorBase for CursorMut<'_> {
  fn entries(&self) -> &[Entry] {
    &*self.entries
  }

  fn owner(&self) -> usize {
    self.owner
  }

  fn position(&self) -> usize {
    self.position
  }

  fn seek(&mut self, position: usize) {
    self.position = position;
  }
}

impl fmt::Debug for CursorMut<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CursorMut")
      .field("position", &self.position)
      .field("len", &self.entries.len())
      .finish()
  }
}

/// Iterator over `(key, value)` pairs of an array or object.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
  inner: core::slice::Iter<'a, Entry>,
}

impl<'a> Iterator for Iter<'a> {
  type Item = (&'a MemberKey, &'a Value);

  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next().map(|(key, value)| (key, value))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl DoubleEndedIterator for Iter<'_> {
  fn next_back(&mut self) -> Option<Self::Item> {
    self.inner.next_back().map(|(key, value)| (key, value))
  }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

/// Iterator over `(key, value)` pairs that allows the values to be changed.
#[derive(Debug)]
pub struct IterMut<'a> {
  inner: core::slice::IterMut<'a, Entry>,
}

impl<'a> Iterator for IterMut<'a> {
  type Item = (&'a MemberKey, &'a mut Value);

  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next().map(|(key, value)| (&*key, value))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl DoubleEndedIterator for IterMut<'_> {
  fn next_back(&mut self) -> Option<Self::Item> {
    self.inner.next_back().map(|(key, value)| (&*key, value))
  }
}

impl ExactSizeIterator for IterMut<'_> {}
impl FusedIterator for IterMut<'_> {}

// --- Value entry points ---

impl Value {
  fn address(&self) -> usize {
    self as *const Value as usize
  }

  fn entry_slice(&self) -> &[Entry] {
    match self.table() {
      Some(table) => table.entries(),
      None => &[],
    }
  }

  fn entry_slice_mut(&mut self) -> &mut [Entry] {
    match self.table_mut() {
      Some(table) => table.entries_mut(),
      None => &mut [],
    }
  }

  /// Cursor at the first entry. Scalars and null have no entries, so
  /// `begin() == end()` for them.
  pub fn begin(&self) -> Cursor<'_> {
    Cursor::new(self.address(), self.entry_slice(), 0)
  }

  /// Cursor past the last entry.
  pub fn end(&self) -> Cursor<'_> {
    let entries = self.entry_slice();
    Cursor::new(self.address(), entries, entries.len())
  }

  /// Writable cursor at the first entry.
  pub fn cursor_mut(&mut self) -> CursorMut<'_> {
    let owner = self.address();
    CursorMut::new(owner, self.entry_slice_mut(), 0)
  }

  pub fn iter(&self) -> Iter<'_> {
    Iter {
      inner: self.entry_slice().iter(),
    }
  }

  pub fn iter_mut(&mut self) -> IterMut<'_> {
    IterMut {
      inner: self.entry_slice_mut().iter_mut(),
    }
  }

  /// First stored entry's value.
  pub fn front(&self) -> Option<&Value> {
    self.entry_slice().first().map(|(_, value)| value)
  }

  /// Last stored entry's value.
  pub fn back(&self) -> Option<&Value> {
    self.entry_slice().last().map(|(_, value)| value)
  }

  pub fn front_mut(&mut self) -> Option<&mut Value> {
    self.entry_slice_mut().first_mut().map(|(_, value)| value)
  }

  pub fn back_mut(&mut self) -> Option<&mut Value> {
    self.entry_slice_mut().last_mut().map(|(_, value)| value)
  }
}

impl<'a> IntoIterator for &'a Value {
  type Item = (&'a MemberKey, &'a Value);
  type IntoIter = Iter<'a>;

  fn into_iter(self) -> Iter<'a> {
    self.iter()
  }
}

impl<'a> IntoIterator for &'a mut Value {
  type Item = (&'a MemberKey, &'a mut Value);
  type IntoIter = IterMut<'a>;

  fn into_iter(self) -> IterMut<'a> {
    self.iter_mut()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::value::{StaticString, ValueType};

  fn object() -> Value {
    let mut value = Value::null();
    value["b"] = Value::from(2);
    value["a"] = Value::from(1);
    value["c"] = Value::from(3);
    value
  }

  #[test]
  fn walks_members_in_key_order() {
    let value = object();
    let mut cursor = value.begin();
    let mut names = Vec::new();
    while cursor != value.end() {
      names.push(cursor.name());
      assert_eq!(cursor.index(), None);
      cursor.increment();
    }
    assert_eq!(names, vec!["a", "b", "c"]);
  }

  #[test]
  fn steps_backwards_from_the_end() {
    let value = object();
    let mut cursor = value.end();
    assert!(cursor.is_end());
    assert_eq!(cursor.key(), Value::null());
    cursor.decrement();
    assert_eq!(cursor.member_name(), Some(&b"c"[..]));
    assert_eq!(cursor.value(), Some(&Value::from(3)));
    cursor.decrement();
    cursor.decrement();
    cursor.decrement();
    assert_eq!(cursor, value.begin());
  }

  #[test]
  fn keys_come_back_as_values() {
    let mut list = Value::null();
    list[3] = Value::from(true);
    let cursor = list.begin();
    assert_eq!(cursor.key(), Value::from(3u32));
    assert_eq!(cursor.key().value_type(), ValueType::UInt);
    assert_eq!(cursor.name(), "");

    let mut map = Value::null();
    *map.static_member_mut(StaticString::new("fixed")).unwrap() = Value::from(1);
    assert_eq!(map.begin().key(), Value::from("fixed"));
  }

  #[test]
  fn distance_needs_a_shared_table() {
    let value = object();
    let other = object();
    let mut second = value.begin();
    second.increment();
    assert_eq!(value.begin().distance(&value.end()), Some(3));
    assert_eq!(value.end().distance(&second), Some(-2));
    assert_eq!(value.begin().distance(&other.begin()), None);
    assert!(!value.begin().is_equal(&other.begin()));
  }

  #[test]
  fn empty_tables_are_still_distinct() {
    let first = Value::with_type(ValueType::Array);
    let second = Value::with_type(ValueType::Array);
    assert_ne!(first.begin(), second.begin());
    assert_eq!(first.begin().distance(&second.end()), None);
    assert_eq!(first.begin().distance(&first.end()), Some(0));

    let (a, b) = (Value::from(1), Value::from(1));
    assert!(!a.end().is_equal(&b.end()));
  }

  #[test]
  fn scalars_have_nothing_to_walk() {
    let value = Value::from(5);
    assert_eq!(value.begin(), value.end());
    assert_eq!(value.iter().count(), 0);
    assert!(value.front().is_none());
  }

  #[test]
  fn mutable_cursor_writes_through() {
    let mut value = object();
    {
      let mut cursor = value.cursor_mut();
      cursor.increment();
      *cursor.value_mut().unwrap() = Value::from("two");
      assert_eq!(cursor.as_cursor().name(), "b");
    }
    assert_eq!(value["b"], Value::from("two"));
  }

  #[test]
  fn iterators_run_both_ways() {
    let mut value = object();
    let forward: Vec<_> = value.iter().map(|(_, v)| v.as_int().unwrap()).collect();
    let backward: Vec<_> = value.iter().rev().map(|(_, v)| v.as_int().unwrap()).collect();
    assert_eq!(forward, vec![1, 2, 3]);
    assert_eq!(backward, vec![3, 2, 1]);
    assert_eq!(value.iter().len(), 3);

    for (_, member) in &mut value {
      *member = Value::from(member.as_int().unwrap() * 10);
    }
    assert_eq!(value.front(), Some(&Value::from(10)));
    assert_eq!(value.back(), Some(&Value::from(30)));
    *value.back_mut().unwrap() = Value::null();
    assert!(value["c"].is_null());
  }
}
