//! Ordered key/value storage shared by array and object values.
//!
//! Entries are kept sorted by [`MemberKey`], so iteration order is key order:
//! ascending indices for arrays, byte-wise name order for objects. Lookups
//! binary-search on the key content and never allocate.

use core::cmp::Ordering;
use core::fmt;

use crate::member_key::{ArrayIndex, MemberKey};
use crate::value::Value;

/// One key/value pair of a table.
pub type Entry = (MemberKey, Value);

/// Sorted, unique-key mapping from [`MemberKey`] to [`Value`].
#[derive(Clone, Default)]
pub struct MemberTable {
  entries: Vec<Entry>,
}

impl MemberTable {
  pub const fn new() -> Self {
    MemberTable { entries: Vec::new() }
  }

  /// Number of stored entries.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Highest stored index plus one, which is what an array reports as its size.
  pub fn array_size(&self) -> ArrayIndex {
    self
      .entries
      .last()
      .and_then(|(key, _)| key.index())
      .map_or(0, |last| last.saturating_add(1))
  }

  /// Returns `true` when an element is stored at `ArrayIndex::MAX`, so
  /// nothing more can be appended or shifted up.
  pub fn is_full(&self) -> bool {
    self.entries.last().and_then(|(key, _)| key.index()) == Some(ArrayIndex::MAX)
  }

  pub fn entries(&self) -> &[Entry] {
    &self.entries
  }

  pub(crate) fn entries_mut(&mut self) -> &mut [Entry] {
    &mut self.entries
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }

  fn search_index(&self, index: ArrayIndex) -> Result<usize, usize> {
    self.entries.binary_search_by(|(key, _)| key.cmp_index(index))
  }

  fn search_name(&self, name: &[u8]) -> Result<usize, usize> {
    self.entries.binary_search_by(|(key, _)| key.cmp_name(name))
  }

  // --- Array access ---

  pub fn get_index(&self, index: ArrayIndex) -> Option<&Value> {
    self.search_index(index).ok().map(|at| &self.entries[at].1)
  }

  pub fn get_index_mut(&mut self, index: ArrayIndex) -> Option<&mut Value> {
    match self.search_index(index) {
      Ok(at) => Some(&mut self.entries[at].1),
      Err(_) => None,
    }
  }

  /// Returns the element at `index`, creating a null entry if it is absent.
  pub fn demand_index(&mut self, index: ArrayIndex) -> &mut Value {
    let at = match self.search_index(index) {
      Ok(at) => at,
      Err(at) => {
        self.entries.insert(at, (MemberKey::Index(index), Value::null()));
        at
      }
    };
    &mut self.entries[at].1
  }

  /// Places `value` at `index` after moving every key `>= index` up by one.
  ///
  /// Keys must not already be at `ArrayIndex::MAX`.
  pub fn insert_index(&mut self, index: ArrayIndex, value: Value) {
    let at = self
      .entries
      .partition_point(|(key, _)| key.cmp_index(index) == Ordering::Less);
    for (key, _) in &mut self.entries[at..] {
      if let MemberKey::Index(i) = key {
        *i += 1;
      }
    }
    self.entries.insert(at, (MemberKey::Index(index), value));
  }

  /// Removes the element at `index` and moves every key `> index` down by one.
  ///
  /// Returns `None` without touching the table when no element is stored at `index`.
  pub fn remove_index(&mut self, index: ArrayIndex) -> Option<Value> {
    let at = self.search_index(index).ok()?;
    let (_, removed) = self.entries.remove(at);
    for (key, _) in &mut self.entries[at..] {
      if let MemberKey::Index(i) = key {
        *i -= 1;
      }
    }
    Some(removed)
  }

  /// Drops every element whose index is `>= len`.
  pub fn truncate_indices(&mut self, len: ArrayIndex) {
    let at = self
      .entries
      .partition_point(|(key, _)| key.cmp_index(len) == Ordering::Less);
    self.entries.truncate(at);
  }

  // --- Object access ---

  pub fn get_name(&self, name: &[u8]) -> Option<&Value> {
    self.search_name(name).ok().map(|at| &self.entries[at].1)
  }

  pub fn get_name_mut(&mut self, name: &[u8]) -> Option<&mut Value> {
    match self.search_name(name) {
      Ok(at) => Some(&mut self.entries[at].1),
      Err(_) => None,
    }
  }

  /// Returns the member called `name`, inserting a null member under a copy
  /// of `name` if it is absent.
  pub fn demand_name(&mut self, name: &[u8]) -> &mut Value {
    self.demand_with(name, || MemberKey::name(name))
  }

  /// Like [`demand_name`](Self::demand_name) but a newly inserted key borrows
  /// `name`. Clones of the table own a copy of it.
  pub fn demand_static(&mut self, name: &'static str) -> &mut Value {
    self.demand_with(name.as_bytes(), || MemberKey::static_name(name))
  }

  fn demand_with(&mut self, name: &[u8], key: impl FnOnce() -> MemberKey) -> &mut Value {
    let at = match self.search_name(name) {
      Ok(at) => at,
      Err(at) => {
        self.entries.insert(at, (key(), Value::null()));
        at
      }
    };
    &mut self.entries[at].1
  }

  pub fn remove_name(&mut self, name: &[u8]) -> Option<Value> {
    let at = self.search_name(name).ok()?;
    Some(self.entries.remove(at).1)
  }

  pub fn contains_name(&self, name: &[u8]) -> bool {
    self.search_name(name).is_ok()
  }

  // --- Comparison ---

  /// Entry count first, then entries pairwise by key and value.
  pub fn compare(&self, other: &MemberTable) -> Ordering {
    self.entries.len().cmp(&other.entries.len()).then_with(|| {
      for ((key, value), (other_key, other_value)) in self.entries.iter().zip(&other.entries) {
        match key.cmp(other_key).then_with(|| value.compare(other_value)) {
          Ordering::Equal => continue,
          unequal => return unequal,
        }
      }
      Ordering::Equal
    })
  }
}

// Tear the tree down with an explicit stack so that dropping a deeply nested
// value cannot overflow the call stack.
impl Drop for MemberTable {
  fn drop(&mut self) {
    let mut pending: Vec<Value> = self.entries.drain(..).map(|(_, value)| value).collect();
    while let Some(mut value) = pending.pop() {
      if let Some(table) = value.table_mut() {
        pending.extend(table.entries.drain(..).map(|(_, value)| value));
      }
    }
  }
}

impl PartialEq for MemberTable {
  fn eq(&self, other: &Self) -> bool {
    self.compare(other) == Ordering::Equal
  }
}

impl fmt::Debug for MemberTable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(self.entries.iter().map(|(k, v)| (k, v))).finish()
  }
}
