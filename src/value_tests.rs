use crate::comments::CommentPlacement;
use crate::cursor::CursorBase;
use crate::error::ValueError;
use crate::member_key::ArrayIndex;
use crate::path::{Path, PathArgument};
use crate::value::{Value, ValueType};

// --- Copy and move ---

#[test]
fn copies_are_independent() {
  let mut original = Value::null();
  original["list"].append(Value::from(1)).unwrap();
  original["name"] = Value::from("first");

  let mut copy = original.clone();
  assert_eq!(copy, original);

  copy["list"].append(Value::from(2)).unwrap();
  copy["name"] = Value::from("second");
  copy["extra"] = Value::from(true);

  assert_eq!(original["list"].size(), 1);
  assert_eq!(original["name"].as_str(), Some("first"));
  assert!(!original.is_member("extra"));
  assert_ne!(copy, original);
}

#[test]
fn copy_carries_comments_and_offsets() {
  let mut source = Value::from(42);
  source.set_comment("// answer", CommentPlacement::Before);
  source.set_offset_start(3);
  source.set_offset_limit(5);

  let mut target = Value::null();
  target.copy(&source);
  assert_eq!(target.comment(CommentPlacement::Before), "// answer");
  assert_eq!((target.offset_start(), target.offset_limit()), (3, 5));
}

#[test]
fn take_leaves_null_behind() {
  let mut source = Value::null();
  source["k"] = Value::from(1.5);
  source.set_comment("/* root */", CommentPlacement::After);
  source.set_offset_limit(9);
  let expected = source.clone();

  let moved = source.take();
  assert_eq!(source, Value::null());
  assert!(!source.has_comment(CommentPlacement::After));
  assert_eq!(source.offset_limit(), 0);
  assert_eq!(moved, expected);
  assert_eq!(moved.comment(CommentPlacement::After), "/* root */");
  assert_eq!(moved.offset_limit(), 9);
}

#[test]
fn payload_swaps_keep_metadata() {
  let mut a = Value::from("a");
  a.set_comment("// a", CommentPlacement::AfterOnSameLine);
  a.set_offset_start(1);
  let mut b = Value::from(2);
  b.set_offset_start(20);

  a.swap_payload(&mut b);
  assert_eq!(a, Value::from(2));
  assert_eq!(a.comment(CommentPlacement::AfterOnSameLine), "// a");
  assert_eq!(a.offset_start(), 1);
  assert_eq!(b, Value::from("a"));
  assert_eq!(b.offset_start(), 20);

  a.copy_payload(&b);
  assert_eq!(a, Value::from("a"));
  assert_eq!(a.offset_start(), 1);

  a.swap(&mut b);
  assert_eq!(a.offset_start(), 20);
  assert!(b.has_comment(CommentPlacement::AfterOnSameLine));
}

// --- Arrays ---

#[test]
fn size_is_highest_index_plus_one() {
  let mut array = Value::with_type(ValueType::Array);
  array[5] = Value::from("v");
  assert_eq!(array.size(), 6);
  assert!(!array.is_empty());
  for index in 0..5 {
    assert!(array[index].is_null());
    assert!(array.is_valid_index(index));
  }
  assert_eq!(array[5].as_str(), Some("v"));
  assert!(!array.is_valid_index(6));
}

#[test]
fn insert_past_the_end_is_declined() {
  let mut array = Value::with_type(ValueType::Array);
  assert!(!array.insert(5, Value::from(1)));
  assert_eq!(array.size(), 0);
  assert!(!Value::from(1).insert(0, Value::null()));
  assert!(array.insert(0, Value::from(1)));
}

#[test]
fn insert_and_remove_are_inverse() {
  let mut array = Value::null();
  for i in 0..4 {
    array.append(Value::from(i)).unwrap();
  }
  let before = array.clone();
  for index in 0..=4 {
    assert!(array.insert(index, Value::from("x")));
    assert_eq!(array.size(), 5);
    assert_eq!(array[index].as_str(), Some("x"));
    let removed = array.remove_index(index).unwrap();
    assert_eq!(removed, Value::from("x"));
    assert_eq!(array, before);
  }
}

#[test]
fn removing_the_first_element_shifts_the_rest() {
  let mut array = Value::null();
  array.append(Value::from(1)).unwrap();
  array.append(Value::from(2)).unwrap();

  let removed = array.remove_index(0).unwrap();
  assert_eq!(removed.as_int(), Ok(1));
  assert_eq!(array.size(), 1);
  assert_eq!(array[0].as_int(), Ok(2));
  assert!(array.remove_index(3).is_none());
}

#[test]
fn resize_fills_and_truncates() {
  let mut array = Value::null();
  array[1] = Value::from(true);
  array.resize(4).unwrap();
  assert_eq!(array.size(), 4);
  assert_eq!(array.iter().count(), 4);
  assert_eq!(array[1], Value::from(true));

  array.resize(1).unwrap();
  assert_eq!(array.size(), 1);
  array.resize(0).unwrap();
  assert!(array.is_empty());
  assert!(array.is_array());
  assert!(Value::from("s").resize(2).is_err());
}

#[test]
fn shrinking_a_sparse_array_keeps_the_requested_size() {
  let mut array = Value::null();
  array[0] = Value::from(1);
  array[9] = Value::from(2);
  array.resize(5).unwrap();
  assert_eq!(array.size(), 5);
  assert_eq!(array.iter().count(), 5);
  assert_eq!(array[0], Value::from(1));
  assert!(array[4].is_null());
  array.resize(5).unwrap();
  assert_eq!(array.size(), 5);
}

#[test]
fn append_and_insert_decline_on_a_full_array() {
  let mut array = Value::null();
  array[ArrayIndex::MAX] = Value::from("last");
  assert!(matches!(array.append(Value::from(1)), Err(ValueError::OutOfRange { .. })));
  assert!(!array.insert(0, Value::from(1)));
  assert_eq!(array.iter().count(), 1);
  assert_eq!(array[ArrayIndex::MAX].as_str(), Some("last"));
}

#[test]
fn defaults_are_copied_out() {
  let mut array = Value::null();
  array[0] = Value::from(7);
  let fallback = Value::from(-1);
  assert_eq!(array.get_index_or(0, &fallback), Value::from(7));
  assert_eq!(array.get_index_or(9, &fallback), fallback);
  assert_eq!(Value::from(1).get_index_or(0, &fallback), fallback);
}

// --- Objects ---

#[test]
fn nested_assignment_builds_objects() {
  let mut value = Value::null();
  value["a"]["b"] = Value::from(3);
  assert!(value.is_object());
  assert!(value["a"].is_object());
  assert_eq!(value["a"]["b"].as_int(), Ok(3));
  assert!(value.is_member("a"));
  assert_eq!(value.size(), 1);
}

#[test]
fn lookups_do_not_create_members() {
  let mut value = Value::null();
  value["present"] = Value::from(1);
  assert!(value["absent"].is_null());
  assert!(value.find(b"absent").unwrap().is_none());
  assert_eq!(value.get_or("absent", &Value::from(0)), Value::from(0));
  assert_eq!(value.member_names().unwrap(), vec!["present".to_owned()]);
}

#[test]
fn member_names_keep_embedded_zeros() {
  let mut value = Value::null();
  *value.demand(b"a\0b").unwrap() = Value::from(1);
  assert!(value.is_member_range(b"a\0b"));
  assert!(!value.is_member("a"));
  assert_eq!(value.begin().member_name(), Some(&b"a\0b"[..]));
  assert_eq!(value.remove_member_range(b"a\0b"), Some(Value::from(1)));
  assert!(value.is_empty());
}

#[test]
fn remove_member_reports_absence() {
  let mut value = Value::null();
  value["k"] = Value::from("v");
  assert_eq!(value.remove_member("k"), Some(Value::from("v")));
  assert_eq!(value.remove_member("k"), None);
  assert!(Value::from(1).remove_member("k").is_none());
}

#[test]
fn member_names_of_null_and_scalars() {
  assert!(Value::null().member_names().unwrap().is_empty());
  assert!(Value::with_type(ValueType::Array).member_names().is_err());
}

// --- Ordering ---

#[test]
fn mixed_kinds_sort_by_kind_then_value() {
  let mut values = vec![
    Value::from("b"),
    Value::from(2),
    Value::with_type(ValueType::Object),
    Value::null(),
    Value::from(true),
    Value::from(1.5),
    Value::from(-3),
    Value::from("a"),
    Value::from(7u32),
    Value::with_type(ValueType::Array),
  ];
  values.sort();
  let kinds: Vec<ValueType> = values.iter().map(Value::value_type).collect();
  assert_eq!(
    kinds,
    vec![
      ValueType::Null,
      ValueType::Int,
      ValueType::Int,
      ValueType::UInt,
      ValueType::Real,
      ValueType::String,
      ValueType::String,
      ValueType::Boolean,
      ValueType::Array,
      ValueType::Object,
    ]
  );
  assert_eq!(values[1], Value::from(-3));
  assert_eq!(values[5], Value::from("a"));

  let mut again = values.clone();
  again.reverse();
  again.sort();
  assert_eq!(again, values);
}

#[test]
fn containers_compare_by_size_then_entries() {
  let mut short = Value::null();
  short.append(Value::from(9)).unwrap();
  let mut long = Value::null();
  long.append(Value::from(1)).unwrap();
  long.append(Value::from(1)).unwrap();
  assert!(short < long);

  let mut other = short.clone();
  other[0] = Value::from(10);
  assert!(short < other);
}

// --- Paths ---

#[test]
fn path_make_then_resolve_finds_the_same_node() {
  let mut root = Value::null();
  let path = Path::new("x.%", &[PathArgument::from("k")]).unwrap();
  let made = path.make(&mut root).unwrap() as *const Value;
  assert!(core::ptr::eq(made, path.resolve(&root)));
}

#[test]
fn deep_trees_drop_cleanly() {
  let mut root = Value::null();
  let mut node = &mut root;
  for _ in 0..50_000 {
    node = node.member_mut("child").unwrap();
  }
  *node = Value::from("leaf");
  let depth = root.iter().count();
  assert_eq!(depth, 1);
}
