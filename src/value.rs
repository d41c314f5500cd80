//! The optional JSON value type
//!
//! A [Json] is a view onto a shared document: a reference-counted handle to
//! the document root plus the sequence of descent steps taken to reach the
//! node it represents. The empty state carries no document at all and is
//! distinct from a view that resolves to the JSON `null` literal.
//!
//! Navigation results returned by [Json::get] and [Json::get_index] alias
//! the parent's storage - mutating through any view of a document is
//! visible through every other view of the same document. The handle is
//! deliberately neither `Send` nor `Sync`; concurrent mutation of a shared
//! document is not supported.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::errors::{Error, JsonResult};

/// A single descent step recorded by a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    /// Descent into an object field
    Key(String),
    /// Descent into an array element
    Index(usize),
}

/// An optional JSON value: either the empty state, or a view onto a node
/// within a shared document
#[derive(Debug, Clone)]
pub struct Json {
    pub(crate) root: Option<Rc<RefCell<Value>>>,
    pub(crate) path: Vec<Step>,
}

/// The right-hand side of a mutation: either an owned [Value] or another
/// [Json] whose underlying value should be written (an empty [Json] writes
/// the JSON `null` literal)
#[derive(Debug, Clone)]
pub enum Operand {
    /// A raw underlying value
    Value(Value),
    /// Another wrapper, unwrapped at the point of use
    Json(Json),
}

impl Operand {
    /// Materialise the operand into an owned value, before any borrow of
    /// the target document is taken
    pub(crate) fn into_value(self) -> Value {
        match self {
            Operand::Value(v) => v,
            Operand::Json(j) => j.to_value().unwrap_or(Value::Null),
        }
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

impl From<Json> for Operand {
    fn from(json: Json) -> Self {
        Operand::Json(json)
    }
}

impl From<&Json> for Operand {
    fn from(json: &Json) -> Self {
        Operand::Json(json.clone())
    }
}

macro_rules! operand_from_scalar {
    ($($t : ty),*) => {
        $(impl From<$t> for Operand {
            fn from(value: $t) -> Self {
                Operand::Value(Value::from(value))
            }
        })*
    };
}

operand_from_scalar!(
    &str, String, bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, Vec<Value>
);

impl From<()> for Operand {
    /// The unit value stands in for the JSON `null` literal
    fn from(_: ()) -> Self {
        Operand::Value(Value::Null)
    }
}

/// Walk `path` down from `node`, read-only. `None` when the path no longer
/// resolves against the current shape of the document.
fn resolve<'a>(mut node: &'a Value, path: &[Step]) -> Option<&'a Value> {
    for step in path {
        node = match (step, node) {
            (Step::Key(k), Value::Object(map)) => map.get(k)?,
            (Step::Index(i), Value::Array(items)) => items.get(*i)?,
            _ => return None,
        };
    }
    Some(node)
}

/// Mutable variant of [resolve]
fn resolve_mut<'a>(mut node: &'a mut Value, path: &[Step]) -> Option<&'a mut Value> {
    for step in path {
        node = match (step, node) {
            (Step::Key(k), Value::Object(map)) => map.get_mut(k)?,
            (Step::Index(i), Value::Array(items)) => items.get_mut(*i)?,
            _ => return None,
        };
    }
    Some(node)
}

/// Recursively write `value` at `branch` below `node`, creating or
/// replacing intermediate levels with fresh objects as required
fn set_branch(node: &mut Value, branch: &[&str], value: Value) {
    let Some((head, rest)) = branch.split_first() else {
        *node = value;
        return;
    };
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        let child = map.entry((*head).to_string()).or_insert(Value::Null);
        set_branch(child, rest, value);
    }
}

impl Json {
    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    /// Wrap an existing underlying value as the root of a fresh document.
    /// This is the unchecked constructor - in Rust there is no nil [Value],
    /// so it can never fail.
    pub fn from_value(value: Value) -> Self {
        Json {
            root: Some(Rc::new(RefCell::new(value))),
            path: Vec::new(),
        }
    }

    /// Wrap a value that may not exist at all. `None` fails with
    /// [Error::NilInput]; note that `Some(Value::Null)` is a perfectly good
    /// document holding the JSON `null` literal.
    pub fn from_optional_value(value: Option<Value>) -> JsonResult<Self> {
        value.map(Json::from_value).ok_or(Error::NilInput)
    }

    /// Parse a JSON text and wrap the resulting tree
    pub fn from_str(s: &str) -> JsonResult<Self> {
        Ok(Json::from_value(serde_json::from_str(s)?))
    }

    /// Parse raw JSON bytes and wrap the resulting tree
    pub fn from_slice(bytes: &[u8]) -> JsonResult<Self> {
        Ok(Json::from_value(serde_json::from_slice(bytes)?))
    }

    /// The empty state - holds no document, and every navigation or
    /// mutation on it is a no-op
    pub fn new_empty() -> Self {
        Json {
            root: None,
            path: Vec::new(),
        }
    }

    /// A fresh document holding an empty object
    pub fn new_object() -> Self {
        Json::from_value(Value::Object(Map::new()))
    }

    /// A fresh document holding an empty array. Array-ness is structural:
    /// nothing but the shape of the held value makes this an array.
    pub fn new_array() -> Self {
        Json::from_value(Value::Array(Vec::new()))
    }

    // ---------------------------------------------------------------------
    // State queries
    // ---------------------------------------------------------------------

    /// True iff this is the empty state
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// True iff the view resolves to the JSON `null` literal. The empty
    /// state is not null - it holds nothing at all. A view whose node has
    /// been deleted or replaced through another view also reads as null.
    pub fn is_null_json(&self) -> bool {
        self.read(|node| node.is_null()).unwrap_or(false)
    }

    /// Collapse of [Json::is_empty] and [Json::is_null_json] for the common
    /// "is there anything useful here" check
    pub fn is_empty_or_null(&self) -> bool {
        self.is_empty() || self.is_null_json()
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    /// Descend into object field `key`. On any miss (empty receiver,
    /// absent key, or a non-object node) the result is a detached view
    /// holding the JSON `null` literal, never the empty state - chains
    /// built from `get` degrade to null instead of panicking. Hits alias
    /// the receiver's document.
    pub fn get(&self, key: &str) -> Json {
        self.descend(Step::Key(key.to_string()))
            .unwrap_or_else(|| Json::from_value(Value::Null))
    }

    /// Descend into array element `index`, with the same miss semantics as
    /// [Json::get]
    pub fn get_index(&self, index: usize) -> Json {
        self.descend(Step::Index(index))
            .unwrap_or_else(|| Json::from_value(Value::Null))
    }

    /// Descend into object field `key`, yielding the empty state on a
    /// miss. Use this to tell "key absent" apart from "key present holding
    /// null", which [Json::get] deliberately conflates.
    pub fn check_get(&self, key: &str) -> Json {
        self.descend(Step::Key(key.to_string()))
            .unwrap_or_else(Json::new_empty)
    }

    /// Repeated [Json::get] along `path`; the first miss degrades the
    /// whole remaining chain to the null view
    pub fn get_path(&self, path: &[&str]) -> Json {
        let mut current = self.clone();
        for key in path {
            current = current.get(key);
        }
        current
    }

    /// Descend into object field `key`, returning the receiver itself
    /// unchanged on a miss - "no-op on miss" rather than "null on miss"
    pub fn select(&self, key: &str) -> Json {
        self.descend(Step::Key(key.to_string()))
            .unwrap_or_else(|| self.clone())
    }

    /// An aliasing view one step below the receiver, or `None` when the
    /// step does not land on an existing child
    fn descend(&self, step: Step) -> Option<Json> {
        let root = self.root.as_ref()?;
        {
            let doc = root.borrow();
            let node = resolve(&doc, &self.path)?;
            let present = match (&step, node) {
                (Step::Key(k), Value::Object(map)) => map.contains_key(k),
                (Step::Index(i), Value::Array(items)) => *i < items.len(),
                _ => false,
            };
            if !present {
                return None;
            }
        }
        let mut path = self.path.clone();
        path.push(step);
        Some(Json {
            root: Some(Rc::clone(root)),
            path,
        })
    }

    // ---------------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------------

    /// Write `value` under `key` when the view holds an object; no-op on
    /// the empty state or a non-object node. Returns a handle to the
    /// receiver for fluent chaining.
    pub fn set(&mut self, key: &str, value: impl Into<Operand>) -> Json {
        if self.is_empty() {
            return self.clone();
        }
        let value = value.into().into_value();
        self.write(|node| {
            if let Value::Object(map) = node {
                map.insert(key.to_string(), value);
            }
        });
        self.clone()
    }

    /// Write `value` at the end of `branch`, creating intermediate object
    /// levels as needed and replacing non-object intermediates. An empty
    /// branch replaces the whole value - and when the operand is another
    /// [Json], the receiver adopts that handle outright. An empty receiver
    /// is upgraded to a fresh object document first; this is how a value
    /// leaves the empty state.
    pub fn set_path(&mut self, branch: &[&str], value: impl Into<Operand>) -> Json {
        let operand = value.into();
        if branch.is_empty() {
            if let Operand::Json(other) = operand {
                *self = other;
                return self.clone();
            }
        }
        if self.is_empty() {
            *self = Json::new_object();
        }
        let value = operand.into_value();
        self.write(|node| set_branch(node, branch, value));
        self.clone()
    }

    /// Replace the whole value - shorthand for a root-path [Json::set_path]
    pub fn set_value(&mut self, value: impl Into<Operand>) -> Json {
        self.set_path(&[], value)
    }

    /// Remove `key` when the view holds an object; no-op otherwise
    pub fn del(&mut self, key: &str) -> Json {
        self.write(|node| {
            if let Value::Object(map) = node {
                map.remove(key);
            }
        });
        self.clone()
    }

    /// Append `value` when the view currently holds an array; silently a
    /// no-op for anything else, which makes repeated calls safe on values
    /// of unknown shape
    pub fn try_add(&mut self, value: impl Into<Operand>) -> Json {
        let value = value.into().into_value();
        self.write(|node| {
            if let Value::Array(items) = node {
                items.push(value);
            }
        });
        self.clone()
    }

    // ---------------------------------------------------------------------
    // Encoding
    // ---------------------------------------------------------------------

    /// Serialise the underlying value to JSON text bytes. The empty state
    /// is an encode error; a dangling view encodes as `null`.
    pub fn encode(&self) -> JsonResult<Vec<u8>> {
        match self.read(serde_json::to_vec) {
            Some(encoded) => Ok(encoded?),
            None => Err(Error::EmptyValue("encoded bytes")),
        }
    }

    /// Serialise the underlying value to a JSON text string
    pub fn encode_to_string(&self) -> JsonResult<String> {
        match self.read(serde_json::to_string) {
            Some(encoded) => Ok(encoded?),
            None => Err(Error::EmptyValue("an encoded string")),
        }
    }

    /// Serialise to a JSON text string, substituting `default` on any
    /// failure (including the receiver being empty). Never fails.
    pub fn encode_to_string_or(&self, default: &str) -> String {
        self.encode_to_string().unwrap_or_else(|_| default.to_string())
    }

    // ---------------------------------------------------------------------
    // Internal plumbing
    // ---------------------------------------------------------------------

    /// Run `f` against the resolved node. `None` only for the empty state;
    /// a dangling path reads as the JSON `null` literal.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&Value) -> R) -> Option<R> {
        let root = self.root.as_ref()?;
        let doc = root.borrow();
        Some(f(resolve(&doc, &self.path).unwrap_or(&Value::Null)))
    }

    /// Run `f` against the resolved node mutably. `None` (and no effect)
    /// for the empty state or a dangling path.
    fn write<R>(&self, f: impl FnOnce(&mut Value) -> R) -> Option<R> {
        let root = self.root.as_ref()?;
        let mut doc = root.borrow_mut();
        resolve_mut(&mut doc, &self.path).map(f)
    }
}

impl Default for Json {
    /// The default value is the empty state
    fn default() -> Self {
        Json::new_empty()
    }
}
