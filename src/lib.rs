//! Null-safe chainable wrapper over dynamic JSON value trees
//!
//! The crate provides a single value type, [Json], that represents "a JSON
//! value or the absence of one" and exposes chainable accessors, mutators
//! and comparison utilities that never require checking for missing or
//! null intermediate nodes at each step. Parsing and encoding are
//! delegated entirely to serde_json; this crate adds the empty-propagation
//! semantics on top.
//!
//! A [Json] is one of three things: the empty state (no document at all),
//! a view holding the JSON `null` literal, or a view holding a concrete
//! value. Every operation is total over all three - navigation degrades to
//! null or empty instead of failing, and errors only surface at the
//! explicit extraction and encoding boundaries.
//!
//! ```
//! use pliant_json::Json;
//!
//! let doc = Json::from_str(r#"{"user": {"name": "lin", "tags": ["a"]}}"#).unwrap();
//!
//! // Chains degrade gracefully: no intermediate null checks required
//! assert_eq!(doc.get_path(&["user", "name"]).must_string(), "lin");
//! assert!(doc.get_path(&["user", "missing", "deeper"]).is_null_json());
//!
//! // Deep equality is key-order independent
//! let other = Json::from_str(r#"{"user": {"tags": ["a"], "name": "lin"}}"#).unwrap();
//! assert!(doc.is_same_json_as(&other));
//! ```

pub mod errors;

mod access;
mod digest;
mod keyed;
mod value;

pub use errors::{Error, JsonResult};
pub use keyed::{KeyedTransform, KeyedValue};
pub use value::{Json, Operand};
