//! Conversion to and from `serde_json` trees.

use serde_json::{Map, Number};

use crate::error::{Result, ValueError};
use crate::member_key::{ArrayIndex, MemberKey};
use crate::value::{Value, ValueType};

fn reserve_slots(len: usize) -> Result<Vec<serde_json::Value>> {
  let mut items = Vec::new();
  items.try_reserve_exact(len).map_err(|_| ValueError::Allocation { len })?;
  Ok(items)
}

impl Value {
  /// Builds a tree from a parsed `serde_json` value.
  ///
  /// Integers that fit `i64` become `Int`, larger ones `UInt`, everything
  /// else `Real`.
  pub fn from_json(value: serde_json::Value) -> Value {
    match value {
      serde_json::Value::Null => Value::null(),
      serde_json::Value::Bool(b) => Value::from(b),
      serde_json::Value::Number(n) => {
        if let Some(i) = n.as_i64() {
          Value::from(i)
        } else if let Some(u) = n.as_u64() {
          Value::from(u)
        } else {
          Value::from(n.as_f64().unwrap_or(f64::NAN))
        }
      }
      serde_json::Value::String(s) => Value::from(s),
      serde_json::Value::Array(items) => {
        let mut array = Value::with_type(ValueType::Array);
        if let Some(table) = array.table_mut() {
          for (index, item) in items.into_iter().enumerate() {
            *table.demand_index(index as ArrayIndex) = Value::from_json(item);
          }
        }
        array
      }
      serde_json::Value::Object(map) => {
        let mut object = Value::with_type(ValueType::Object);
        if let Some(table) = object.table_mut() {
          for (key, item) in map {
            *table.demand_name(key.as_bytes()) = Value::from_json(item);
          }
        }
        object
      }
    }
  }

  /// Parses JSON text with `serde_json`.
  pub fn from_json_str(s: &str) -> serde_json::Result<Value> {
    Ok(Value::from_json(serde_json::from_str(s)?))
  }

  /// Converts the tree into a `serde_json` value.
  ///
  /// Non-finite reals have no JSON number form and become `null`. Missing
  /// array slots are written as `null`. Comments and offsets are dropped.
  ///
  /// A sparse array is expanded to its full size, which fails with
  /// [`ValueError::Allocation`] when that many slots cannot be reserved.
  pub fn to_json(&self) -> Result<serde_json::Value> {
    Ok(match self.value_type() {
      ValueType::Null => serde_json::Value::Null,
      ValueType::Boolean => serde_json::Value::Bool(self.as_bool().unwrap_or_default()),
      ValueType::Int => self.as_int64().map_or(serde_json::Value::Null, serde_json::Value::from),
      ValueType::UInt => self.as_uint64().map_or(serde_json::Value::Null, serde_json::Value::from),
      ValueType::Real => self
        .as_double()
        .ok()
        .and_then(Number::from_f64)
        .map_or(serde_json::Value::Null, serde_json::Value::Number),
      ValueType::String => {
        let text = self.get_string().map(String::from_utf8_lossy).unwrap_or_default();
        serde_json::Value::String(text.into_owned())
      }
      ValueType::Array => {
        let len = self.size() as usize;
        let mut items = reserve_slots(len)?;
        for (key, item) in self.iter() {
          if let Some(index) = key.index() {
            items.resize(index as usize, serde_json::Value::Null);
            items.push(item.to_json()?);
          }
        }
        items.resize(len, serde_json::Value::Null);
        serde_json::Value::Array(items)
      }
      ValueType::Object => {
        let mut map = Map::new();
        for (key, item) in self.iter() {
          if let MemberKey::Name(name) = key {
            map.insert(String::from_utf8_lossy(name.as_bytes()).into_owned(), item.to_json()?);
          }
        }
        serde_json::Value::Object(map)
      }
    })
  }

  pub fn to_json_string(&self) -> Result<String> {
    Ok(self.to_json()?.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn converts_from_serde() {
    let value = Value::from_json(json!({
      "name": "widget",
      "count": 3,
      "big": u64::MAX,
      "ratio": 0.5,
      "tags": ["a", null, true],
      "none": null
    }));
    assert!(value.is_object());
    assert_eq!(value["name"].as_str(), Some("widget"));
    assert_eq!(value["count"].value_type(), ValueType::Int);
    assert_eq!(value["big"].value_type(), ValueType::UInt);
    assert_eq!(value["ratio"].as_double(), Ok(0.5));
    assert_eq!(value["tags"].size(), 3);
    assert!(value["tags"][1].is_null());
    assert!(value.is_member("none"));
  }

  #[test]
  fn converts_back_to_serde() {
    let source = json!({"a": [1, -2, 2.5], "b": {"c": "d"}, "e": false});
    let value = Value::from_json(source.clone());
    assert_eq!(value.to_json(), Ok(source));
  }

  #[test]
  fn fills_gaps_and_non_finite_with_null() {
    let mut value = Value::null();
    value[2] = Value::from(f64::INFINITY);
    assert_eq!(value.to_json(), Ok(json!([null, null, null])));
  }

  #[test]
  fn unreservable_slots_are_an_allocation_error() {
    assert_eq!(reserve_slots(usize::MAX), Err(ValueError::Allocation { len: usize::MAX }));
    assert_eq!(reserve_slots(4).map(|items| items.capacity() >= 4), Ok(true));
  }

  #[test]
  fn sparse_array_slots_keep_their_positions() {
    let mut value = Value::null();
    value[1] = Value::from("b");
    value[4] = Value::from(4);
    assert_eq!(value.to_json(), Ok(json!([null, "b", null, null, 4])));
  }

  #[test]
  fn parses_text() {
    let value = Value::from_json_str(r#"{"k": [1, 2]}"#).unwrap();
    assert_eq!(value["k"][1], Value::from(2i64));
    assert!(Value::from_json_str("{").is_err());
    assert_eq!(value.to_json_string().unwrap(), r#"{"k":[1,2]}"#);
  }
}
