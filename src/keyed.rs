//! Keyed transform pipeline
//!
//! The extension point for "read this key, compute something derived, hand
//! back a brand-new value" without the caller writing null checks at every
//! step. [Json::with_key] captures a key and its resolved value alongside
//! the parent; [Json::trampoline_keys] folds a list of keys through a
//! matching list of transforms.

use serde_json::{Map, Value};

use crate::errors::{Error, JsonResult};
use crate::value::Json;

/// A key-aware transform, consuming the fold accumulator, the key and the
/// key's resolved value (empty when the key is absent)
pub type KeyedTransform<'a> = &'a dyn Fn(Json, &str, Json) -> Json;

/// A key selected from a parent value, remembered together with its
/// resolution so downstream transforms need not re-query it
#[derive(Debug, Clone)]
pub struct KeyedValue {
    parent: Json,
    key: String,
    value: Json,
}

impl KeyedValue {
    /// The value the key was selected from
    pub fn parent(&self) -> &Json {
        &self.parent
    }

    /// The selected key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The resolved value - empty when the key was absent or held null
    pub fn value(&self) -> &Json {
        &self.value
    }

    /// Feed the captured triple through `transform`. When the parent is
    /// the empty state the transform is never invoked and the parent is
    /// returned unchanged.
    pub fn apply<F>(self, transform: F) -> Json
    where
        F: FnOnce(&Json, &str, &Json) -> Json,
    {
        if self.parent.is_empty() {
            return self.parent;
        }
        transform(&self.parent, &self.key, &self.value)
    }
}

impl Json {
    /// Select `key` and remember it. Resolution follows [Json::get], but a
    /// result that is null or empty collapses to the empty state so that
    /// transforms see a single "nothing there" representation.
    pub fn with_key(&self, key: &str) -> KeyedValue {
        if self.is_empty() {
            return KeyedValue {
                parent: self.clone(),
                key: key.to_string(),
                value: self.clone(),
            };
        }
        let item = self.get(key);
        let value = if item.is_empty_or_null() {
            Json::new_empty()
        } else {
            item
        };
        KeyedValue {
            parent: self.clone(),
            key: key.to_string(),
            value,
        }
    }

    /// Apply an arbitrary transform to a snapshot of the underlying value,
    /// bypassing key semantics. A no-op on the empty state; a transform
    /// yielding `None` collapses the result to the empty state.
    pub fn apply<F>(&self, transform: F) -> Json
    where
        F: FnOnce(&Value) -> Option<Value>,
    {
        let Some(snapshot) = self.to_value() else {
            return self.clone();
        };
        match transform(&snapshot) {
            Some(value) => Json::from_value(value),
            None => Json::new_empty(),
        }
    }

    /// A new object holding exactly `keys` copied from the receiver, if
    /// every one of them is present. When even one key is missing the
    /// result is a valid but *empty* object, not the empty state - check
    /// the outcome with [Json::contains_key], not [Json::is_empty].
    pub fn get_key_values_if_all_contains(&self, keys: &[&str]) -> Json {
        if self.is_empty() {
            return self.clone();
        }
        let mut result = Map::new();
        for key in keys {
            match self.check_get(key).to_value() {
                Some(value) => {
                    result.insert((*key).to_string(), value);
                }
                None => return Json::new_object(),
            }
        }
        Json::from_value(Value::Object(result))
    }

    /// Left-fold over `keys`: `transforms[i]` consumes the running
    /// accumulator, `keys[i]` and `check_get(keys[i])` and produces the
    /// next accumulator. The empty state short-circuits to `initial`;
    /// supplying fewer transforms than keys is an [Error::ArityMismatch].
    pub fn trampoline_keys(
        &self,
        keys: &[&str],
        transforms: &[KeyedTransform<'_>],
        initial: Json,
    ) -> JsonResult<Json> {
        if self.is_empty() {
            return Ok(initial);
        }
        if keys.len() > transforms.len() {
            return Err(Error::ArityMismatch {
                keys: keys.len(),
                transforms: transforms.len(),
            });
        }
        let mut accumulator = initial;
        for (key, transform) in keys.iter().zip(transforms) {
            accumulator = transform(accumulator, key, self.check_get(key));
        }
        Ok(accumulator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn with_key_should_capture_the_resolved_value() {
        let j = Json::from_value(json!({"name": "lemon"}));
        let keyed = j.with_key("name");
        assert_eq!(keyed.key(), "name");
        assert_eq!(keyed.value().must_string(), "lemon");
    }

    #[test]
    fn with_key_should_collapse_null_and_absent_to_empty() {
        let j = Json::from_value(json!({"nothing": null}));
        assert!(j.with_key("nothing").value().is_empty());
        assert!(j.with_key("missing").value().is_empty());
    }

    #[test]
    fn keyed_apply_should_skip_the_transform_on_an_empty_parent() {
        let result = Json::new_empty().with_key("k").apply(|_, _, _| {
            panic!("transform must not run for an empty parent")
        });
        assert!(result.is_empty());
    }

    #[test]
    fn keyed_apply_should_hand_the_triple_to_the_transform() {
        let j = Json::from_value(json!({"count": 2}));
        let doubled = j.with_key("count").apply(|_, key, value| {
            assert_eq!(key, "count");
            Json::from_value(json!(value.must_i64() * 2))
        });
        assert_eq!(doubled.must_i64(), 4);
    }

    #[test]
    fn apply_should_collapse_a_none_result_to_empty() {
        let j = Json::from_value(json!({"k": 1}));
        assert!(j.apply(|_| None).is_empty());
        let renamed = j.apply(|v| Some(json!({ "wrapped": v })));
        assert!(renamed.contains_key("wrapped"));
    }

    #[test]
    fn apply_should_be_a_no_op_on_the_empty_state() {
        let result = Json::new_empty().apply(|_| Some(json!(1)));
        assert!(result.is_empty());
    }

    #[test]
    fn all_contains_should_copy_every_requested_key() {
        let j = Json::from_value(json!({"a": 1, "b": 2, "c": 3}));
        let picked = j.get_key_values_if_all_contains(&["a", "c"]);
        assert!(picked.contains_key("a"));
        assert!(picked.contains_key("c"));
        assert!(!picked.contains_key("b"));
    }

    #[test]
    fn all_contains_should_yield_an_empty_object_on_any_miss() {
        let j = Json::from_value(json!({"a": 1}));
        let picked = j.get_key_values_if_all_contains(&["a", "missing"]);
        assert!(!picked.is_empty());
        assert!(!picked.contains_key("a"));
        assert!(!picked.contains_key("missing"));
    }

    #[test]
    fn trampoline_should_advance_the_accumulator_once_per_key() {
        fn count(acc: Json, _key: &str, _item: Json) -> Json {
            let mut next = Json::new_object();
            next.set("count", acc.get("count").i64_or(0) + 1);
            next
        }
        let j = Json::from_value(json!({"age": 18, "hello": "world"}));
        let mut zero = Json::new_object();
        zero.set("count", 0);
        let result = j
            .trampoline_keys(&["age", "hello"], &[&count, &count], zero)
            .unwrap();
        assert_eq!(result.get("count").must_i64(), 2);
    }

    #[test]
    fn trampoline_should_fail_when_keys_outnumber_transforms() {
        fn keep(acc: Json, _key: &str, _item: Json) -> Json {
            acc
        }
        let j = Json::from_value(json!({"a": 1, "b": 2}));
        let result = j.trampoline_keys(&["a", "b"], &[&keep], Json::new_empty());
        assert!(matches!(result, Err(Error::ArityMismatch { keys: 2, transforms: 1 })));
    }

    #[test]
    fn trampoline_should_short_circuit_on_the_empty_state() {
        let initial = Json::from_value(json!("untouched"));
        let result = Json::new_empty()
            .trampoline_keys(&["a"], &[], initial)
            .unwrap();
        assert_eq!(result.must_string(), "untouched");
    }

    #[test]
    fn trampoline_should_hand_absent_keys_to_transforms_as_empty() {
        fn presence(acc: Json, _key: &str, item: Json) -> Json {
            let mut next = acc.clone();
            next.try_add(!item.is_empty());
            next
        }
        let j = Json::from_value(json!({"present": 1}));
        let result = j
            .trampoline_keys(
                &["present", "absent"],
                &[&presence, &presence],
                Json::new_array(),
            )
            .unwrap();
        assert_eq!(result.encode_to_string().unwrap(), "[true,false]");
    }
}
