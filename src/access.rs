//! Typed extraction from the optional value
//!
//! Two families. The fallible `as_*` accessors report [Error::EmptyValue]
//! on the empty state and [Error::Coercion] on a type mismatch. The
//! assertive `must_*` accessors treat a call on the empty state as a
//! programming error and panic - the companion `*_or` accessors never
//! panic and fall back to the supplied default instead. On a non-empty
//! value both assertive families coerce best-effort, substituting the
//! default (or the type's zero value) on mismatch.

use serde_json::{Map, Value};

use crate::errors::{Error, JsonResult};
use crate::value::Json;

/// Best-effort string-array coercion: elements must be strings, with the
/// JSON `null` literal reading as the empty string
fn string_array(node: &Value) -> Option<Vec<String>> {
    let items = node.as_array()?;
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Null => result.push(String::new()),
            Value::String(s) => result.push(s.clone()),
            _ => return None,
        }
    }
    Some(result)
}

impl Json {
    // ---------------------------------------------------------------------
    // Fallible accessors
    // ---------------------------------------------------------------------

    /// The held object as an owned map snapshot
    pub fn as_map(&self) -> JsonResult<Map<String, Value>> {
        match self.read(|node| node.as_object().cloned()) {
            None => Err(Error::EmptyValue("a map")),
            Some(None) => Err(Error::Coercion { expected: "an object" }),
            Some(Some(map)) => Ok(map),
        }
    }

    /// The held array as an owned element snapshot
    pub fn as_array(&self) -> JsonResult<Vec<Value>> {
        match self.read(|node| node.as_array().cloned()) {
            None => Err(Error::EmptyValue("an array")),
            Some(None) => Err(Error::Coercion { expected: "an array" }),
            Some(Some(items)) => Ok(items),
        }
    }

    /// The held boolean
    pub fn as_bool(&self) -> JsonResult<bool> {
        match self.read(Value::as_bool) {
            None => Err(Error::EmptyValue("a bool")),
            Some(None) => Err(Error::Coercion { expected: "a bool" }),
            Some(Some(b)) => Ok(b),
        }
    }

    /// The held string, as an owned copy
    pub fn as_str(&self) -> JsonResult<String> {
        match self.read(|node| node.as_str().map(str::to_string)) {
            None => Err(Error::EmptyValue("a string")),
            Some(None) => Err(Error::Coercion { expected: "a string" }),
            Some(Some(s)) => Ok(s),
        }
    }

    /// The held string as raw bytes
    pub fn as_bytes(&self) -> JsonResult<Vec<u8>> {
        Ok(self.as_str()?.into_bytes())
    }

    /// The held array as owned strings; null elements read as empty
    /// strings, anything else is a coercion failure
    pub fn as_string_array(&self) -> JsonResult<Vec<String>> {
        match self.read(string_array) {
            None => Err(Error::EmptyValue("a string array")),
            Some(None) => Err(Error::Coercion { expected: "a string array" }),
            Some(Some(items)) => Ok(items),
        }
    }

    // ---------------------------------------------------------------------
    // Assertive accessors - panic on the empty state
    // ---------------------------------------------------------------------

    /// The held value as an `i64`, zero on mismatch.
    ///
    /// # Panics
    /// Panics when called on the empty state - use [Json::i64_or] when a
    /// fallback is acceptable.
    pub fn must_i64(&self) -> i64 {
        self.read(|node| node.as_i64().unwrap_or_default())
            .unwrap_or_else(|| panic!("empty json can't yield an i64"))
    }

    /// The held value as a `u64`, zero on mismatch.
    ///
    /// # Panics
    /// Panics when called on the empty state.
    pub fn must_u64(&self) -> u64 {
        self.read(|node| node.as_u64().unwrap_or_default())
            .unwrap_or_else(|| panic!("empty json can't yield a u64"))
    }

    /// The held value as an `f64`, zero on mismatch.
    ///
    /// # Panics
    /// Panics when called on the empty state.
    pub fn must_f64(&self) -> f64 {
        self.read(|node| node.as_f64().unwrap_or_default())
            .unwrap_or_else(|| panic!("empty json can't yield an f64"))
    }

    /// The held value as a `bool`, false on mismatch.
    ///
    /// # Panics
    /// Panics when called on the empty state.
    pub fn must_bool(&self) -> bool {
        self.read(|node| node.as_bool().unwrap_or_default())
            .unwrap_or_else(|| panic!("empty json can't yield a bool"))
    }

    /// The held value as an owned `String`, empty on mismatch.
    ///
    /// # Panics
    /// Panics when called on the empty state.
    pub fn must_string(&self) -> String {
        self.read(|node| node.as_str().map(str::to_string).unwrap_or_default())
            .unwrap_or_else(|| panic!("empty json can't yield a string"))
    }

    /// The held object as an owned map snapshot, empty map on mismatch.
    ///
    /// # Panics
    /// Panics when called on the empty state.
    pub fn must_map(&self) -> Map<String, Value> {
        self.read(|node| node.as_object().cloned().unwrap_or_default())
            .unwrap_or_else(|| panic!("empty json can't yield a map"))
    }

    /// The held array as an owned snapshot, empty on mismatch.
    ///
    /// # Panics
    /// Panics when called on the empty state.
    pub fn must_array(&self) -> Vec<Value> {
        self.read(|node| node.as_array().cloned().unwrap_or_default())
            .unwrap_or_else(|| panic!("empty json can't yield an array"))
    }

    /// The held array as owned strings, empty on mismatch.
    ///
    /// # Panics
    /// Panics when called on the empty state.
    pub fn must_string_array(&self) -> Vec<String> {
        self.read(|node| string_array(node).unwrap_or_default())
            .unwrap_or_else(|| panic!("empty json can't yield a string array"))
    }

    // ---------------------------------------------------------------------
    // Defaulting accessors - never panic
    // ---------------------------------------------------------------------

    /// The held value as an `i64`, or `default` on the empty state or a
    /// mismatch
    pub fn i64_or(&self, default: i64) -> i64 {
        self.read(Value::as_i64).flatten().unwrap_or(default)
    }

    /// The held value as a `u64`, or `default`
    pub fn u64_or(&self, default: u64) -> u64 {
        self.read(Value::as_u64).flatten().unwrap_or(default)
    }

    /// The held value as an `f64`, or `default`
    pub fn f64_or(&self, default: f64) -> f64 {
        self.read(Value::as_f64).flatten().unwrap_or(default)
    }

    /// The held value as a `bool`, or `default`
    pub fn bool_or(&self, default: bool) -> bool {
        self.read(Value::as_bool).flatten().unwrap_or(default)
    }

    /// The held value as an owned `String`, or `default`
    pub fn string_or(&self, default: &str) -> String {
        self.read(|node| node.as_str().map(str::to_string))
            .flatten()
            .unwrap_or_else(|| default.to_string())
    }

    /// The held object as an owned snapshot, or `default`
    pub fn map_or_default(&self, default: Map<String, Value>) -> Map<String, Value> {
        self.read(|node| node.as_object().cloned())
            .flatten()
            .unwrap_or(default)
    }

    /// The held array as an owned snapshot, or `default`
    pub fn array_or(&self, default: Vec<Value>) -> Vec<Value> {
        self.read(|node| node.as_array().cloned())
            .flatten()
            .unwrap_or(default)
    }

    /// The held array as owned strings, or `default`
    pub fn string_array_or(&self, default: Vec<String>) -> Vec<String> {
        self.read(string_array).flatten().unwrap_or(default)
    }

    // ---------------------------------------------------------------------
    // Escape hatches
    // ---------------------------------------------------------------------

    /// An owned snapshot of the underlying value, with no coercion at all;
    /// `None` for the empty state
    pub fn to_value(&self) -> Option<Value> {
        self.read(Value::clone)
    }

    /// True iff `key` resolves to a present child (holding null counts as
    /// present)
    pub fn contains_key(&self, key: &str) -> bool {
        !self.check_get(key).is_empty()
    }

    /// Element count of the held array, zero for anything else (including
    /// the empty state)
    pub fn array_length(&self) -> usize {
        self.read(|node| node.as_array().map_or(0, Vec::len))
            .unwrap_or(0)
    }
}
