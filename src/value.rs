//! The `Value` tree node: a scalar payload or an owned member table, plus
//! comments and the source span it was parsed from.

use core::cmp::Ordering;
use core::fmt;
use core::mem;
use core::num::FpCategory;
use core::ops::{Index, IndexMut};
use std::ffi::CStr;

use log::debug;

use crate::comments::{CommentPlacement, CommentSet};
use crate::error::{Result, ValueError};
use crate::format;
use crate::member_key::ArrayIndex;
use crate::member_table::MemberTable;
use crate::string_store::StringStore;

pub const MIN_INT: i32 = i32::MIN;
pub const MAX_INT: i32 = i32::MAX;
pub const MAX_UINT: u32 = u32::MAX;
pub const MIN_INT64: i64 = i64::MIN;
pub const MAX_INT64: i64 = i64::MAX;
pub const MAX_UINT64: u64 = u64::MAX;
/// Significant digits used when a real is turned into a string.
pub const DEFAULT_REAL_PRECISION: u32 = 17;
/// `MAX_UINT64` rounded to the nearest double, which is 2^64.
pub const MAX_UINT64_AS_DOUBLE: f64 = 18446744073709551615.0;

/// Kind of the payload a [`Value`] holds.
///
/// The declaration order is the cross-kind ordering used by [`Value::compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueType {
  Null = 0,
  Int,
  UInt,
  Real,
  String,
  Boolean,
  Array,
  Object,
}

impl fmt::Display for ValueType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      ValueType::Null => "null",
      ValueType::Int => "int",
      ValueType::UInt => "uint",
      ValueType::Real => "real",
      ValueType::String => "string",
      ValueType::Boolean => "boolean",
      ValueType::Array => "array",
      ValueType::Object => "object",
    })
  }
}

/// A string with static lifetime. Values built from it reference the text
/// instead of copying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticString(&'static str);

impl StaticString {
  pub const fn new(s: &'static str) -> Self {
    StaticString(s)
  }

  pub const fn as_str(&self) -> &'static str {
    self.0
  }
}

#[derive(Clone)]
enum Payload {
  Null,
  Int(i64),
  UInt(u64),
  Real(f64),
  String(StringStore),
  Boolean(bool),
  Array(Box<MemberTable>),
  Object(Box<MemberTable>),
}

/// A node of a JSON-like tree.
///
/// Cloning deep-copies the payload, comments, and offsets. Moving out with
/// [`take`](Value::take) leaves a null value behind.
#[derive(Clone)]
pub struct Value {
  payload: Payload,
  comments: CommentSet,
  start: usize,
  limit: usize,
}

static NULL_VALUE: Value = Value::null();

/// Rounds a `u64` to a double without going through an unsigned conversion.
fn integer_to_double(value: u64) -> f64 {
  ((value / 2) as i64) as f64 * 2.0 + ((value & 1) as i64) as f64
}

fn in_range(d: f64, min: f64, max: f64) -> bool {
  d >= min && d <= max
}

fn is_integral(d: f64) -> bool {
  d.trunc() == d
}

/// Numeric order with every NaN ranked equal to each other and above all
/// other reals. `-0.0` and `0.0` are equal.
fn compare_reals(a: f64, b: f64) -> Ordering {
  match (a.is_nan(), b.is_nan()) {
    (true, true) => Ordering::Equal,
    (true, false) => Ordering::Greater,
    (false, true) => Ordering::Less,
    (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
  }
}

impl Value {
  // --- Construction ---

  pub const fn null() -> Value {
    Value {
      payload: Payload::Null,
      comments: CommentSet::new(),
      start: 0,
      limit: 0,
    }
  }

  fn from_payload(payload: Payload) -> Value {
    Value {
      payload,
      ..Value::null()
    }
  }

  /// The zero value of a kind: `0`, `0.0`, `false`, `""`, or an empty table.
  pub fn with_type(value_type: ValueType) -> Value {
    Value::from_payload(match value_type {
      ValueType::Null => Payload::Null,
      ValueType::Int => Payload::Int(0),
      ValueType::UInt => Payload::UInt(0),
      ValueType::Real => Payload::Real(0.0),
      ValueType::String => Payload::String(StringStore::default()),
      ValueType::Boolean => Payload::Boolean(false),
      ValueType::Array => Payload::Array(Box::default()),
      ValueType::Object => Payload::Object(Box::default()),
    })
  }

  /// Copies the byte range verbatim, embedded zero bytes included.
  pub fn from_range(bytes: &[u8]) -> Result<Value> {
    Ok(Value::from_payload(Payload::String(StringStore::try_owned(bytes)?)))
  }

  /// References `s` without copying it.
  pub fn from_static(s: &'static str) -> Value {
    Value::from_payload(Payload::String(StringStore::borrowed(s.as_bytes())))
  }

  pub(crate) fn from_store(store: StringStore) -> Value {
    Value::from_payload(Payload::String(store))
  }

  /// The shared immutable null value handed out by lookups that find nothing.
  pub fn null_singleton() -> &'static Value {
    &NULL_VALUE
  }

  // --- Copy, move, swap ---

  /// Replaces payload, comments, and offsets with deep copies of `other`'s.
  pub fn copy(&mut self, other: &Value) {
    *self = other.clone();
  }

  /// Replaces only the payload, keeping this value's comments and offsets.
  pub fn copy_payload(&mut self, other: &Value) {
    self.payload = other.payload.clone();
  }

  pub fn swap(&mut self, other: &mut Value) {
    mem::swap(self, other);
  }

  /// Exchanges payloads, leaving comments and offsets in place.
  pub fn swap_payload(&mut self, other: &mut Value) {
    mem::swap(&mut self.payload, &mut other.payload);
  }

  /// Moves everything out, leaving a fresh null value behind.
  pub fn take(&mut self) -> Value {
    mem::take(self)
  }

  pub fn value_type(&self) -> ValueType {
    kind_of(&self.payload)
  }

  // --- Comparison ---

  /// Total order over payloads: kind first, then content. Comments and
  /// offsets are ignored.
  ///
  /// NaN sorts after every other real and equals only NaN.
  pub fn compare(&self, other: &Value) -> Ordering {
    let by_kind = self.value_type().cmp(&other.value_type());
    if by_kind != Ordering::Equal {
      return by_kind;
    }
    match (&self.payload, &other.payload) {
      (Payload::Null, Payload::Null) => Ordering::Equal,
      (Payload::Int(a), Payload::Int(b)) => a.cmp(b),
      (Payload::UInt(a), Payload::UInt(b)) => a.cmp(b),
      (Payload::Real(a), Payload::Real(b)) => compare_reals(*a, *b),
      (Payload::String(a), Payload::String(b)) => a.cmp(b),
      (Payload::Boolean(a), Payload::Boolean(b)) => a.cmp(b),
      (Payload::Array(a), Payload::Array(b)) | (Payload::Object(a), Payload::Object(b)) => {
        a.compare(b)
      }
      _ => unreachable!("payloads of equal kind"),
    }
  }

  // --- Coercion ---

  pub fn as_int(&self) -> Result<i32> {
    const OP: &str = "as_int";
    match self.payload {
      Payload::Int(v) if self.is_int() => Ok(v as i32),
      Payload::UInt(v) if self.is_int() => Ok(v as i32),
      Payload::Real(d) if in_range(d, MIN_INT as f64, MAX_INT as f64) => Ok(d as i32),
      Payload::Int(_) | Payload::UInt(_) | Payload::Real(_) => Err(ValueError::out_of_range(OP, "i32")),
      Payload::Null => Ok(0),
      Payload::Boolean(b) => Ok(b as i32),
      _ => Err(ValueError::wrong_type(OP, self.value_type())),
    }
  }

  pub fn as_uint(&self) -> Result<u32> {
    const OP: &str = "as_uint";
    match self.payload {
      Payload::Int(v) if self.is_uint() => Ok(v as u32),
      Payload::UInt(v) if self.is_uint() => Ok(v as u32),
      Payload::Real(d) if in_range(d, 0.0, MAX_UINT as f64) => Ok(d as u32),
      Payload::Int(_) | Payload::UInt(_) | Payload::Real(_) => Err(ValueError::out_of_range(OP, "u32")),
      Payload::Null => Ok(0),
      Payload::Boolean(b) => Ok(b as u32),
      _ => Err(ValueError::wrong_type(OP, self.value_type())),
    }
  }

  pub fn as_int64(&self) -> Result<i64> {
    const OP: &str = "as_int64";
    match self.payload {
      Payload::Int(v) => Ok(v),
      Payload::UInt(v) if self.is_int64() => Ok(v as i64),
      // MAX_INT64 rounds up to 2^63 as a double, so the bound is exclusive.
      Payload::Real(d) if d >= MIN_INT64 as f64 && d < MAX_INT64 as f64 => Ok(d as i64),
      Payload::UInt(_) | Payload::Real(_) => Err(ValueError::out_of_range(OP, "i64")),
      Payload::Null => Ok(0),
      Payload::Boolean(b) => Ok(b as i64),
      _ => Err(ValueError::wrong_type(OP, self.value_type())),
    }
  }

  pub fn as_uint64(&self) -> Result<u64> {
    const OP: &str = "as_uint64";
    match self.payload {
      Payload::Int(v) if self.is_uint64() => Ok(v as u64),
      Payload::UInt(v) => Ok(v),
      Payload::Real(d) if d >= 0.0 && d < MAX_UINT64_AS_DOUBLE => Ok(d as u64),
      Payload::Int(_) | Payload::Real(_) => Err(ValueError::out_of_range(OP, "u64")),
      Payload::Null => Ok(0),
      Payload::Boolean(b) => Ok(b as u64),
      _ => Err(ValueError::wrong_type(OP, self.value_type())),
    }
  }

  pub fn as_largest_int(&self) -> Result<i64> {
    self.as_int64()
  }

  pub fn as_largest_uint(&self) -> Result<u64> {
    self.as_uint64()
  }

  pub fn as_float(&self) -> Result<f32> {
    match self.payload {
      Payload::Int(v) => Ok(v as f32),
      Payload::UInt(v) => Ok(integer_to_double(v) as f32),
      Payload::Real(d) => Ok(d as f32),
      Payload::Null => Ok(0.0),
      Payload::Boolean(b) => Ok(if b { 1.0 } else { 0.0 }),
      _ => Err(ValueError::wrong_type("as_float", self.value_type())),
    }
  }

  pub fn as_double(&self) -> Result<f64> {
    match self.payload {
      Payload::Int(v) => Ok(v as f64),
      Payload::UInt(v) => Ok(integer_to_double(v)),
      Payload::Real(d) => Ok(d),
      Payload::Null => Ok(0.0),
      Payload::Boolean(b) => Ok(if b { 1.0 } else { 0.0 }),
      _ => Err(ValueError::wrong_type("as_double", self.value_type())),
    }
  }

  /// Zero, NaN, null, and `false` are false.
  pub fn as_bool(&self) -> Result<bool> {
    match self.payload {
      Payload::Int(v) => Ok(v != 0),
      Payload::UInt(v) => Ok(v != 0),
      Payload::Real(d) => Ok(!matches!(d.classify(), FpCategory::Zero | FpCategory::Nan)),
      Payload::Null => Ok(false),
      Payload::Boolean(b) => Ok(b),
      _ => Err(ValueError::wrong_type("as_bool", self.value_type())),
    }
  }

  /// Formats scalars as text. Strings are never parsed back into numbers.
  ///
  /// String bytes that are not valid UTF-8 are replaced, use
  /// [`get_string`](Value::get_string) for the exact bytes.
  pub fn as_string(&self) -> Result<String> {
    match &self.payload {
      Payload::Null => Ok(String::new()),
      Payload::String(store) => Ok(String::from_utf8_lossy(store.as_bytes()).into_owned()),
      Payload::Boolean(b) => Ok(format::value_to_string_bool(*b).to_owned()),
      Payload::Int(v) => Ok(format::value_to_string_i64(*v)),
      Payload::UInt(v) => Ok(format::value_to_string_u64(*v)),
      Payload::Real(d) => Ok(format::value_to_string_f64(*d)),
      _ => Err(ValueError::wrong_type("as_string", self.value_type())),
    }
  }

  /// String bytes up to the first zero byte.
  pub fn as_c_string(&self) -> Result<&[u8]> {
    match &self.payload {
      Payload::String(store) => Ok(store.as_c_bytes()),
      _ => Err(ValueError::wrong_type("as_c_string", self.value_type())),
    }
  }

  /// Full byte length of a string, embedded zeros included.
  pub fn c_string_length(&self) -> Result<usize> {
    match &self.payload {
      Payload::String(store) => Ok(store.len()),
      _ => Err(ValueError::wrong_type("c_string_length", self.value_type())),
    }
  }

  /// Exact bytes of a string value, `None` for every other kind.
  pub fn get_string(&self) -> Option<&[u8]> {
    match &self.payload {
      Payload::String(store) => Some(store.as_bytes()),
      _ => None,
    }
  }

  /// The string payload if it is valid UTF-8.
  pub fn as_str(&self) -> Option<&str> {
    self.get_string().and_then(|bytes| core::str::from_utf8(bytes).ok())
  }

  // --- Type predicates ---

  pub fn is_null(&self) -> bool {
    matches!(self.payload, Payload::Null)
  }

  pub fn is_bool(&self) -> bool {
    matches!(self.payload, Payload::Boolean(_))
  }

  pub fn is_int(&self) -> bool {
    match self.payload {
      Payload::Int(v) => v >= MIN_INT as i64 && v <= MAX_INT as i64,
      Payload::UInt(v) => v <= MAX_INT as u64,
      Payload::Real(d) => d >= MIN_INT as f64 && d <= MAX_INT as f64 && is_integral(d),
      _ => false,
    }
  }

  pub fn is_int64(&self) -> bool {
    match self.payload {
      Payload::Int(_) => true,
      Payload::UInt(v) => v <= MAX_INT64 as u64,
      // MAX_INT64 rounds up to 2^63 as a double, so the bound is exclusive.
      Payload::Real(d) => d >= MIN_INT64 as f64 && d < MAX_INT64 as f64 && is_integral(d),
      _ => false,
    }
  }

  pub fn is_uint(&self) -> bool {
    match self.payload {
      Payload::Int(v) => v >= 0 && v as u64 <= MAX_UINT as u64,
      Payload::UInt(v) => v <= MAX_UINT as u64,
      Payload::Real(d) => d >= 0.0 && d <= MAX_UINT as f64 && is_integral(d),
      _ => false,
    }
  }

  pub fn is_uint64(&self) -> bool {
    match self.payload {
      Payload::Int(v) => v >= 0,
      Payload::UInt(_) => true,
      // MAX_UINT64 rounds up to 2^64 as a double, so the bound is exclusive.
      Payload::Real(d) => d >= 0.0 && d < MAX_UINT64_AS_DOUBLE && is_integral(d),
      _ => false,
    }
  }

  /// Integers, and reals without a fractional part that fit `i64` or `u64`.
  pub fn is_integral(&self) -> bool {
    match self.payload {
      Payload::Int(_) | Payload::UInt(_) => true,
      Payload::Real(d) => d >= MIN_INT64 as f64 && d < MAX_UINT64_AS_DOUBLE && is_integral(d),
      _ => false,
    }
  }

  pub fn is_double(&self) -> bool {
    matches!(self.payload, Payload::Int(_) | Payload::UInt(_) | Payload::Real(_))
  }

  pub fn is_numeric(&self) -> bool {
    self.is_double()
  }

  pub fn is_string(&self) -> bool {
    matches!(self.payload, Payload::String(_))
  }

  pub fn is_array(&self) -> bool {
    matches!(self.payload, Payload::Array(_))
  }

  pub fn is_object(&self) -> bool {
    matches!(self.payload, Payload::Object(_))
  }

  /// Returns `true` if the matching `as_*` accessor would succeed.
  pub fn is_convertible_to(&self, target: ValueType) -> bool {
    let kind = self.value_type();
    match target {
      ValueType::Null => match &self.payload {
        Payload::Int(_) | Payload::UInt(_) | Payload::Real(_) => self.as_double() == Ok(0.0),
        Payload::Boolean(b) => !b,
        Payload::String(store) => store.is_empty(),
        Payload::Array(table) | Payload::Object(table) => table.is_empty(),
        Payload::Null => true,
      },
      ValueType::Int => {
        self.is_int()
          || matches!(self.payload, Payload::Real(d) if in_range(d, MIN_INT as f64, MAX_INT as f64))
          || kind == ValueType::Boolean
          || kind == ValueType::Null
      }
      ValueType::UInt => {
        self.is_uint()
          || matches!(self.payload, Payload::Real(d) if in_range(d, 0.0, MAX_UINT as f64))
          || kind == ValueType::Boolean
          || kind == ValueType::Null
      }
      ValueType::Real | ValueType::Boolean => {
        self.is_numeric() || kind == ValueType::Boolean || kind == ValueType::Null
      }
      ValueType::String => {
        self.is_numeric()
          || kind == ValueType::Boolean
          || kind == ValueType::String
          || kind == ValueType::Null
      }
      ValueType::Array => kind == ValueType::Array || kind == ValueType::Null,
      ValueType::Object => kind == ValueType::Object || kind == ValueType::Null,
    }
  }

  /// Arrays report their highest index plus one, objects their member count,
  /// everything else zero.
  pub fn size(&self) -> ArrayIndex {
    match &self.payload {
      Payload::Array(table) => table.array_size(),
      Payload::Object(table) => table.len() as ArrayIndex,
      _ => 0,
    }
  }

  /// Null, `[]`, and `{}` are empty. Scalars never are.
  pub fn is_empty(&self) -> bool {
    match self.payload {
      Payload::Null | Payload::Array(_) | Payload::Object(_) => self.size() == 0,
      _ => false,
    }
  }

  /// Anything but null.
  pub fn truthy(&self) -> bool {
    !self.is_null()
  }

  // --- Member table plumbing ---

  pub(crate) fn table(&self) -> Option<&MemberTable> {
    match &self.payload {
      Payload::Array(table) | Payload::Object(table) => Some(table.as_ref()),
      _ => None,
    }
  }

  pub(crate) fn table_mut(&mut self) -> Option<&mut MemberTable> {
    match &mut self.payload {
      Payload::Array(table) | Payload::Object(table) => Some(table.as_mut()),
      _ => None,
    }
  }

  /// The array table, turning a null value into an empty array first.
  fn array_table_mut(&mut self, op: &'static str) -> Result<&mut MemberTable> {
    if self.is_null() {
      self.payload = Payload::Array(Box::default());
    }
    match &mut self.payload {
      Payload::Array(table) => Ok(table.as_mut()),
      other => Err(ValueError::wrong_type(op, kind_of(other))),
    }
  }

  /// The object table, turning a null value into an empty object first.
  fn object_table_mut(&mut self, op: &'static str) -> Result<&mut MemberTable> {
    if self.is_null() {
      self.payload = Payload::Object(Box::default());
    }
    match &mut self.payload {
      Payload::Object(table) => Ok(table.as_mut()),
      other => Err(ValueError::wrong_type(op, kind_of(other))),
    }
  }

  /// Removes every element or member. Null stays null.
  pub fn clear(&mut self) -> Result<()> {
    match &mut self.payload {
      Payload::Null => Ok(()),
      Payload::Array(table) | Payload::Object(table) => {
        table.clear();
        Ok(())
      }
      other => Err(ValueError::wrong_type("clear", kind_of(other))),
    }
  }

  // --- Array access ---

  /// Drops elements at `new_size` and above and fills every missing slot
  /// below it with null, so `size() == new_size` afterwards. A null value
  /// becomes an array.
  pub fn resize(&mut self, new_size: ArrayIndex) -> Result<()> {
    let table = self.array_table_mut("resize")?;
    table.truncate_indices(new_size);
    for index in 0..new_size {
      table.demand_index(index);
    }
    Ok(())
  }

  /// Element at `index`, or the null singleton if there is none.
  pub fn element(&self, index: ArrayIndex) -> Result<&Value> {
    match &self.payload {
      Payload::Null => Ok(Value::null_singleton()),
      Payload::Array(table) => Ok(table.get_index(index).unwrap_or(Value::null_singleton())),
      other => Err(ValueError::wrong_type("element", kind_of(other))),
    }
  }

  /// Element at `index`, created as null if absent. A null value becomes an array.
  pub fn element_mut(&mut self, index: ArrayIndex) -> Result<&mut Value> {
    Ok(self.array_table_mut("element_mut")?.demand_index(index))
  }

  /// A copy of the element at `index`, or of `default` when there is none.
  pub fn get_index_or(&self, index: ArrayIndex, default: &Value) -> Value {
    match &self.payload {
      Payload::Array(table) => table.get_index(index).unwrap_or(default).clone(),
      _ => default.clone(),
    }
  }

  pub fn is_valid_index(&self, index: ArrayIndex) -> bool {
    index < self.size()
  }

  /// Stores `value` at index `size()`. A null value becomes an array.
  ///
  /// Fails without touching the array when its last index is already taken.
  pub fn append(&mut self, value: Value) -> Result<&mut Value> {
    let table = self.array_table_mut("append")?;
    if table.is_full() {
      debug!("append declined on a full array");
      return Err(ValueError::out_of_range("append", "array index"));
    }
    let slot = table.demand_index(table.array_size());
    *slot = value;
    Ok(slot)
  }

  /// Inserts `value` at `index`, moving later elements up by one.
  ///
  /// Returns `false` and leaves `self` untouched if `self` is neither null
  /// nor an array, or if `index > size()`.
  pub fn insert(&mut self, index: ArrayIndex, value: Value) -> bool {
    let size = self.size();
    let full = self.table().is_some_and(MemberTable::is_full);
    if !(self.is_null() || self.is_array()) || index > size || full {
      debug!("insert at {} declined on {} of size {}", index, self.value_type(), size);
      return false;
    }
    match self.array_table_mut("insert") {
      Ok(table) => {
        table.insert_index(index, value);
        true
      }
      Err(_) => false,
    }
  }

  /// Removes the element at `index`, moving later elements down by one.
  ///
  /// Returns `None` and leaves `self` untouched if there is no such element.
  pub fn remove_index(&mut self, index: ArrayIndex) -> Option<Value> {
    let removed = match &mut self.payload {
      Payload::Array(table) => table.remove_index(index),
      _ => None,
    };
    if removed.is_none() {
      debug!("remove_index {} found nothing on {}", index, self.value_type());
    }
    removed
  }

  // --- Object access ---

  /// Member called `key`, or the null singleton if there is none.
  pub fn member(&self, key: &str) -> Result<&Value> {
    Ok(self.find(key.as_bytes())?.unwrap_or(Value::null_singleton()))
  }

  /// Member called `key`, created as null if absent. A null value becomes an object.
  pub fn member_mut(&mut self, key: &str) -> Result<&mut Value> {
    self.demand(key.as_bytes())
  }

  /// Like [`member_mut`](Value::member_mut), but a newly created key
  /// references `key` instead of copying it. Copies of the tree own a copy
  /// of the name.
  pub fn static_member_mut(&mut self, key: StaticString) -> Result<&mut Value> {
    Ok(self.object_table_mut("static_member_mut")?.demand_static(key.as_str()))
  }

  /// Member called `name`, created as null if absent. A null value becomes an object.
  pub fn demand(&mut self, name: &[u8]) -> Result<&mut Value> {
    Ok(self.object_table_mut("demand")?.demand_name(name))
  }

  /// An existing member, never creating one.
  pub fn find(&self, name: &[u8]) -> Result<Option<&Value>> {
    match &self.payload {
      Payload::Null => Ok(None),
      Payload::Object(table) => Ok(table.get_name(name)),
      other => Err(ValueError::wrong_type("find", kind_of(other))),
    }
  }

  pub fn find_mut(&mut self, name: &[u8]) -> Result<Option<&mut Value>> {
    match &mut self.payload {
      Payload::Null => Ok(None),
      Payload::Object(table) => Ok(table.get_name_mut(name)),
      other => Err(ValueError::wrong_type("find_mut", kind_of(other))),
    }
  }

  /// A copy of the member called `key`, or of `default` when there is none.
  pub fn get_or(&self, key: &str, default: &Value) -> Value {
    self.get_range_or(key.as_bytes(), default)
  }

  pub fn get_range_or(&self, name: &[u8], default: &Value) -> Value {
    match &self.payload {
      Payload::Object(table) => table.get_name(name).unwrap_or(default).clone(),
      _ => default.clone(),
    }
  }

  /// Removes and returns the member called `key`, if there is one.
  pub fn remove_member(&mut self, key: &str) -> Option<Value> {
    self.remove_member_range(key.as_bytes())
  }

  pub fn remove_member_range(&mut self, name: &[u8]) -> Option<Value> {
    let removed = match &mut self.payload {
      Payload::Object(table) => table.remove_name(name),
      _ => None,
    };
    if removed.is_none() {
      debug!("remove_member {:?} found nothing", String::from_utf8_lossy(name));
    }
    removed
  }

  pub fn is_member(&self, key: &str) -> bool {
    self.is_member_range(key.as_bytes())
  }

  pub fn is_member_range(&self, name: &[u8]) -> bool {
    match &self.payload {
      Payload::Object(table) => table.contains_name(name),
      _ => false,
    }
  }

  /// Member names in key order. Null has none; other non-objects are an error.
  pub fn member_names(&self) -> Result<Vec<String>> {
    match &self.payload {
      Payload::Null => Ok(Vec::new()),
      Payload::Object(table) => Ok(
        table
          .entries()
          .iter()
          .filter_map(|(key, _)| key.name_bytes())
          .map(|name| String::from_utf8_lossy(name).into_owned())
          .collect(),
      ),
      other => Err(ValueError::wrong_type("member_names", kind_of(other))),
    }
  }

  // --- Comments and source offsets ---

  pub fn set_comment(&mut self, comment: impl Into<String>, placement: CommentPlacement) {
    self.comments.set(placement, comment);
  }

  pub fn has_comment(&self, placement: CommentPlacement) -> bool {
    self.comments.has(placement)
  }

  pub fn comment(&self, placement: CommentPlacement) -> &str {
    self.comments.get(placement)
  }

  pub fn comments(&self) -> &CommentSet {
    &self.comments
  }

  pub fn set_offset_start(&mut self, start: usize) {
    self.start = start;
  }

  pub fn set_offset_limit(&mut self, limit: usize) {
    self.limit = limit;
  }

  pub fn offset_start(&self) -> usize {
    self.start
  }

  pub fn offset_limit(&self) -> usize {
    self.limit
  }
}

fn kind_of(payload: &Payload) -> ValueType {
  match payload {
    Payload::Null => ValueType::Null,
    Payload::Int(_) => ValueType::Int,
    Payload::UInt(_) => ValueType::UInt,
    Payload::Real(_) => ValueType::Real,
    Payload::String(_) => ValueType::String,
    Payload::Boolean(_) => ValueType::Boolean,
    Payload::Array(_) => ValueType::Array,
    Payload::Object(_) => ValueType::Object,
  }
}

// --- Trait implementations ---

impl Default for Value {
  fn default() -> Value {
    Value::null()
  }
}

impl PartialEq for Value {
  fn eq(&self, other: &Value) -> bool {
    self.compare(other) == Ordering::Equal
  }
}

impl Eq for Value {}

impl PartialOrd for Value {
  fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
    Some(self.compare(other))
  }
}

impl Ord for Value {
  fn cmp(&self, other: &Value) -> Ordering {
    self.compare(other)
  }
}

impl fmt::Debug for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.payload {
      Payload::Null => f.write_str("Null"),
      Payload::Int(v) => write!(f, "Int({})", v),
      Payload::UInt(v) => write!(f, "UInt({})", v),
      Payload::Real(d) => write!(f, "Real({:?})", d),
      Payload::String(store) => write!(f, "String({:?})", store),
      Payload::Boolean(b) => write!(f, "Boolean({})", b),
      Payload::Array(table) => write!(f, "Array({:?})", table),
      Payload::Object(table) => write!(f, "Object({:?})", table),
    }
  }
}

impl From<ValueType> for Value {
  fn from(value_type: ValueType) -> Value {
    Value::with_type(value_type)
  }
}

impl From<i32> for Value {
  fn from(v: i32) -> Value {
    Value::from_payload(Payload::Int(v as i64))
  }
}

impl From<u32> for Value {
  fn from(v: u32) -> Value {
    Value::from_payload(Payload::UInt(v as u64))
  }
}

impl From<i64> for Value {
  fn from(v: i64) -> Value {
    Value::from_payload(Payload::Int(v))
  }
}

impl From<u64> for Value {
  fn from(v: u64) -> Value {
    Value::from_payload(Payload::UInt(v))
  }
}

impl From<f64> for Value {
  fn from(v: f64) -> Value {
    Value::from_payload(Payload::Real(v))
  }
}

impl From<bool> for Value {
  fn from(v: bool) -> Value {
    Value::from_payload(Payload::Boolean(v))
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Value {
    Value::from_payload(Payload::String(StringStore::owned(s.as_bytes())))
  }
}

impl From<String> for Value {
  fn from(s: String) -> Value {
    Value::from(s.as_str())
  }
}

/// Copies up to the terminating zero byte.
impl From<&CStr> for Value {
  fn from(s: &CStr) -> Value {
    Value::from_payload(Payload::String(StringStore::owned(s.to_bytes())))
  }
}

impl From<StaticString> for Value {
  fn from(s: StaticString) -> Value {
    Value::from_static(s.as_str())
  }
}

impl Index<ArrayIndex> for Value {
  type Output = Value;

  /// Panics if `self` is neither null nor an array.
  fn index(&self, index: ArrayIndex) -> &Value {
    self.element(index).unwrap_or_else(|err| panic!("{}", err))
  }
}

impl IndexMut<ArrayIndex> for Value {
  fn index_mut(&mut self, index: ArrayIndex) -> &mut Value {
    self.element_mut(index).unwrap_or_else(|err| panic!("{}", err))
  }
}

impl Index<&str> for Value {
  type Output = Value;

  /// Panics if `self` is neither null nor an object.
  fn index(&self, key: &str) -> &Value {
    self.member(key).unwrap_or_else(|err| panic!("{}", err))
  }
}

impl IndexMut<&str> for Value {
  fn index_mut(&mut self, key: &str) -> &mut Value {
    self.member_mut(key).unwrap_or_else(|err| panic!("{}", err))
  }
}
