//! Dot/bracket addressing into a value tree.
//!
//! A path is compiled once from text such as `"settings.servers[2].host"`
//! and then applied to any number of roots. Placeholders take their value
//! from the argument list given at compile time:
//!
//! | syntax    | meaning                                   |
//! |-----------|-------------------------------------------|
//! | `.name`   | object member `name`                      |
//! | `[3]`     | array element 3                           |
//! | `[%]`     | array element taken from the next argument |
//! | `.%`      | object member taken from the next argument |
//!
//! # Examples
//!
//! ```
//! use jsontree::{Path, PathArgument, Value};
//!
//! let mut root = Value::null();
//! let path = Path::new("users[%].%", &[PathArgument::from(0), PathArgument::from("name")]).unwrap();
//! *path.make(&mut root).unwrap() = Value::from("ada");
//! assert_eq!(root["users"][0]["name"].as_str(), Some("ada"));
//! assert_eq!(path.resolve(&root).as_str(), Some("ada"));
//! ```

use log::trace;

use crate::error::{Result, ValueError};
use crate::member_key::ArrayIndex;
use crate::value::Value;

/// One step of a path, or a value bound to a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathArgument {
  Index(ArrayIndex),
  Key(String),
}

impl From<ArrayIndex> for PathArgument {
  fn from(index: ArrayIndex) -> Self {
    PathArgument::Index(index)
  }
}

impl From<&str> for PathArgument {
  fn from(key: &str) -> Self {
    PathArgument::Key(key.to_owned())
  }
}

impl From<String> for PathArgument {
  fn from(key: String) -> Self {
    PathArgument::Key(key)
  }
}

/// A compiled path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
  source: String,
  steps: Vec<PathArgument>,
}

impl Path {
  /// Compiles `path`, binding each `%` placeholder to the next entry of `args`.
  ///
  /// Arguments beyond the last placeholder are ignored.
  pub fn new(path: &str, args: &[PathArgument]) -> Result<Path> {
    let mut parser = Parser {
      source: path,
      bytes: path.as_bytes(),
      at: 0,
      args,
      next_arg: 0,
      steps: Vec::new(),
    };
    parser.run()?;
    Ok(Path {
      source: path.to_owned(),
      steps: parser.steps,
    })
  }

  /// The text the path was compiled from.
  pub fn as_str(&self) -> &str {
    &self.source
  }

  /// The resolved steps, placeholders already substituted.
  pub fn steps(&self) -> &[PathArgument] {
    &self.steps
  }

  /// Follows the path from `root` without modifying anything.
  ///
  /// Returns the null singleton as soon as a step does not apply: a member
  /// step on a non-object, an index step on a non-array, or a missing entry.
  pub fn resolve<'a>(&self, root: &'a Value) -> &'a Value {
    let mut node = root;
    for (depth, step) in self.steps.iter().enumerate() {
      let next = match step {
        PathArgument::Index(index) => {
          if node.is_array() && node.is_valid_index(*index) {
            node.element(*index).ok()
          } else {
            None
          }
        }
        PathArgument::Key(key) => node.find(key.as_bytes()).ok().flatten(),
      };
      node = match next {
        Some(next) => next,
        None => {
          trace!(
            "path {:?}: step {} ({:?}) does not apply to {}",
            self.source,
            depth,
            step,
            node.value_type()
          );
          return Value::null_singleton();
        }
      };
    }
    node
  }

  /// Like [`resolve`](Path::resolve), but a copy of `default` is returned
  /// when the path does not lead anywhere.
  pub fn resolve_or(&self, root: &Value, default: &Value) -> Value {
    let found = self.resolve(root);
    if core::ptr::eq(found, Value::null_singleton()) {
      default.clone()
    } else {
      found.clone()
    }
  }

  /// Follows the path from `root`, creating missing objects, arrays and
  /// entries along the way, and returns the node at the end.
  ///
  /// Fails if an existing node on the way has the wrong kind for its step.
  pub fn make<'a>(&self, root: &'a mut Value) -> Result<&'a mut Value> {
    let mut node = root;
    for step in &self.steps {
      node = match step {
        PathArgument::Index(index) => node.element_mut(*index)?,
        PathArgument::Key(key) => node.member_mut(key)?,
      };
    }
    Ok(node)
  }
}

struct Parser<'p> {
  source: &'p str,
  bytes: &'p [u8],
  at: usize,
  args: &'p [PathArgument],
  next_arg: usize,
  steps: Vec<PathArgument>,
}

impl<'p> Parser<'p> {
  fn run(&mut self) -> Result<()> {
    while self.at < self.bytes.len() {
      match self.bytes[self.at] {
        b'[' => {
          self.at += 1;
          self.bracket()?;
        }
        b'%' => {
          self.at += 1;
          self.placeholder(false)?;
        }
        b'.' => self.at += 1,
        b']' => return Err(self.invalid()),
        _ => self.name(),
      }
    }
    Ok(())
  }

  // After `[`: either `%]` or `digits]`.
  fn bracket(&mut self) -> Result<()> {
    if self.bytes.get(self.at) == Some(&b'%') {
      self.at += 1;
      self.placeholder(true)?;
    } else {
      let begin = self.at;
      let mut index: ArrayIndex = 0;
      while let Some(&digit) = self.bytes.get(self.at).filter(|b| b.is_ascii_digit()) {
        index = index
          .checked_mul(10)
          .and_then(|i| i.checked_add(ArrayIndex::from(digit - b'0')))
          .ok_or_else(|| self.invalid())?;
        self.at += 1;
      }
      if self.at == begin {
        return Err(self.invalid());
      }
      self.steps.push(PathArgument::Index(index));
    }
    if self.bytes.get(self.at) != Some(&b']') {
      return Err(self.invalid());
    }
    self.at += 1;
    Ok(())
  }

  fn placeholder(&mut self, wants_index: bool) -> Result<()> {
    let position = self.next_arg;
    let args = self.args;
    let arg = args.get(position).ok_or_else(|| ValueError::MissingPathArgument {
      path: self.source.to_owned(),
      position,
    })?;
    match (arg, wants_index) {
      (PathArgument::Index(_), true) | (PathArgument::Key(_), false) => {
        self.steps.push(arg.clone());
        self.next_arg += 1;
        Ok(())
      }
      _ => Err(ValueError::BadPathArgument {
        path: self.source.to_owned(),
        position,
        expected: if wants_index { "an index" } else { "a key" },
      }),
    }
  }

  // A member name runs up to the next `.`, `[` or `]`.
  fn name(&mut self) {
    let begin = self.at;
    while self.at < self.bytes.len() && !matches!(self.bytes[self.at], b'.' | b'[' | b']') {
      self.at += 1;
    }
    self.steps.push(PathArgument::Key(self.source[begin..self.at].to_owned()));
  }

  fn invalid(&self) -> ValueError {
    ValueError::InvalidPath {
      path: self.source.to_owned(),
      location: self.at,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::value::ValueType;

  fn key(name: &str) -> PathArgument {
    PathArgument::from(name)
  }

  #[test]
  fn compiles_literal_steps() {
    let path = Path::new(".a.b[12].c", &[]).unwrap();
    assert_eq!(
      path.steps(),
      &[key("a"), key("b"), PathArgument::Index(12), key("c")]
    );
    assert_eq!(path.as_str(), ".a.b[12].c");
  }

  #[test]
  fn binds_placeholders_in_order() {
    let path = Path::new("[%].%", &[PathArgument::from(3), key("k"), key("unused")]).unwrap();
    assert_eq!(path.steps(), &[PathArgument::Index(3), key("k")]);
  }

  #[test]
  fn rejects_malformed_text() {
    for text in ["a[", "a[]", "a[1", "a[x]", "a]", "a].b", "x.y]", "[99999999999]"] {
      assert!(
        matches!(Path::new(text, &[]), Err(ValueError::InvalidPath { .. })),
        "{}",
        text
      );
    }
  }

  #[test]
  fn stray_close_bracket_ends_a_name() {
    assert_eq!(
      Path::new("a]", &[]),
      Err(ValueError::InvalidPath { path: "a]".into(), location: 1 })
    );
    assert_eq!(Path::new("a[0]", &[]).unwrap().steps(), &[key("a"), PathArgument::Index(0)]);
  }

  #[test]
  fn rejects_missing_or_mismatched_arguments() {
    assert_eq!(
      Path::new("a.%", &[]),
      Err(ValueError::MissingPathArgument { path: "a.%".into(), position: 0 })
    );
    assert!(matches!(
      Path::new("[%]", &[key("x")]),
      Err(ValueError::BadPathArgument { position: 0, expected: "an index", .. })
    ));
    assert!(matches!(
      Path::new("%", &[PathArgument::Index(1)]),
      Err(ValueError::BadPathArgument { expected: "a key", .. })
    ));
  }

  #[test]
  fn resolve_yields_null_when_a_step_does_not_apply() {
    let mut root = Value::null();
    root["list"][1] = Value::from(7);
    root["name"] = Value::from("x");

    assert_eq!(Path::new("list[1]", &[]).unwrap().resolve(&root), &Value::from(7));
    for text in ["list[5]", "name[0]", "list.a", "missing.deeper", "name.a"] {
      let found = Path::new(text, &[]).unwrap().resolve(&root);
      assert!(core::ptr::eq(found, Value::null_singleton()), "{}", text);
    }
  }

  #[test]
  fn resolve_or_copies_the_default() {
    let root = Value::with_type(ValueType::Object);
    let path = Path::new("a.b", &[]).unwrap();
    assert_eq!(path.resolve_or(&root, &Value::from(1)), Value::from(1));
  }

  #[test]
  fn make_then_resolve_is_the_same_node() {
    let mut root = Value::null();
    let path = Path::new("x.%", &[key("k")]).unwrap();
    let made: *const Value = path.make(&mut root).unwrap();
    let resolved = path.resolve(&root);
    assert!(core::ptr::eq(made, resolved));
    assert!(root["x"].is_object());
    assert!(root["x"]["k"].is_null());
  }

  #[test]
  fn make_builds_arrays_and_objects() {
    let mut root = Value::null();
    *Path::new("a[2].b", &[]).unwrap().make(&mut root).unwrap() = Value::from(true);
    assert!(root["a"].is_array());
    assert_eq!(root["a"].size(), 3);
    assert_eq!(root["a"][2]["b"], Value::from(true));
  }

  #[test]
  fn make_fails_on_wrong_kind() {
    let mut root = Value::null();
    root["a"] = Value::from(1);
    let err = Path::new("a.b", &[]).unwrap().make(&mut root).unwrap_err();
    assert!(matches!(err, ValueError::WrongType { found: ValueType::Int, .. }));
    assert_eq!(root["a"], Value::from(1));
  }
}
