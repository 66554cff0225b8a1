//! This crate provides an owned, dynamically-typed JSON value tree.
//!
//! A [`Value`] is null, a signed or unsigned integer, a real, a string, a
//! boolean, an array, or an object. Arrays and objects own their children in
//! a [`MemberTable`] kept in key order. Every node can also carry comments and
//! the byte span of the source text it was parsed from, so a parser and a
//! writer outside this crate can round-trip documents without losing either.
//!
//! Values are plain Rust data: cloning is a deep copy, moving transfers the
//! whole subtree, and dropping frees it. Nothing is shared between trees and
//! there is no global state apart from an immutable null value.
//!
//! # Examples
//!
//! ```
//! use jsontree::{Value, ValueType};
//!
//! let mut config = Value::null();
//! config["name"] = Value::from("service");
//! config["ports"].append(Value::from(8080)).unwrap();
//! config["ports"].append(Value::from(8443)).unwrap();
//!
//! assert_eq!(config.value_type(), ValueType::Object);
//! assert_eq!(config["ports"].size(), 2);
//! assert_eq!(config["ports"][1].as_int(), Ok(8443));
//! assert!(config["missing"].is_null());
//! ```
//!
//! Named accessors report misuse through [`ValueError`]. The indexing sugar
//! (`value["key"]`, `value[3]`) panics instead, the way slice indexing does.

pub mod comments;
pub mod config;
pub mod cursor;
pub mod error;
pub mod format;
pub mod member_key;
pub mod member_table;
pub mod path;
pub mod string_store;
pub mod value;

#[cfg(feature = "serde_support")]
pub mod json;

#[cfg(test)]
mod value_tests;

pub use crate::comments::{CommentPlacement, CommentSet};
pub use crate::config::{Features, FormatConfig, StructuredError};
pub use crate::cursor::{Cursor, CursorBase, CursorMut, Iter, IterMut};
pub use crate::error::{Result, ValueError};
pub use crate::format::PrecisionType;
pub use crate::member_key::{ArrayIndex, MemberKey};
pub use crate::member_table::MemberTable;
pub use crate::path::{Path, PathArgument};
pub use crate::string_store::{DuplicationPolicy, StringStore};
pub use crate::value::{StaticString, Value, ValueType};
