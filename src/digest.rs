//! Structural digest and deep equality
//!
//! The digest is a canonical string form of a JSON value: two values are
//! considered equal iff their digests are byte-identical. Object keys are
//! sorted before digesting, so key insertion order never affects the
//! outcome; array element order does. Only the digest is guaranteed
//! order-independent - the raw encoded output of [crate::Json::encode]
//! follows the underlying encoder's conventions.

use serde_json::Value;

use crate::value::Json;

/// Digest of the empty state
const EMPTY_DIGEST: &str = "nil";
/// Emitted in place of a key whose literal encoding fails. Unreachable for
/// valid string keys; kept for compatibility with the legacy digest form.
const BROKEN_KEY: &str = "\"error\":\"error\"";
/// Emitted in place of a scalar whose encoding fails
const BROKEN_SCALAR: &str = "error";

/// Canonicalise a single value. Arrays take priority, then objects, then
/// everything else digests as its direct encoding.
fn digest_value(value: &Value, buffer: &mut String) {
    match value {
        Value::Array(items) => {
            buffer.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    buffer.push(',');
                }
                digest_value(item, buffer);
            }
            buffer.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            buffer.push('{');
            for (idx, (key, item)) in entries.iter().enumerate() {
                if idx > 0 {
                    buffer.push(',');
                }
                match serde_json::to_string(key) {
                    Ok(encoded) => {
                        buffer.push_str(&encoded);
                        buffer.push(':');
                        digest_value(item, buffer);
                    }
                    Err(_) => buffer.push_str(BROKEN_KEY),
                }
            }
            buffer.push('}');
        }
        scalar => match serde_json::to_string(scalar) {
            Ok(encoded) => buffer.push_str(&encoded),
            Err(_) => buffer.push_str(BROKEN_SCALAR),
        },
    }
}

impl Json {
    /// The canonical digest of the underlying value; the empty state
    /// digests to the literal `nil`
    pub fn digest_for_equal(&self) -> String {
        match self.to_value() {
            None => EMPTY_DIGEST.to_string(),
            Some(value) => {
                let mut buffer = String::new();
                digest_value(&value, &mut buffer);
                buffer
            }
        }
    }

    /// Deep structural equality: true iff both sides are empty, or both
    /// produce identical digests. Key order never matters; array order
    /// always does.
    pub fn is_same_json_as(&self, other: &Json) -> bool {
        if other.is_empty() {
            return self.is_empty();
        }
        self.digest_for_equal() == other.digest_for_equal()
    }
}

#[cfg(test)]
mod tests {
    use crate::value::Json;
    use serde_json::json;

    #[test]
    fn the_empty_state_should_digest_to_nil() {
        assert_eq!(Json::new_empty().digest_for_equal(), "nil");
    }

    #[test]
    fn scalars_should_digest_to_their_encoding() {
        assert_eq!(Json::from_value(json!(42)).digest_for_equal(), "42");
        assert_eq!(Json::from_value(json!("a")).digest_for_equal(), "\"a\"");
        assert_eq!(Json::from_value(json!(null)).digest_for_equal(), "null");
        assert_eq!(Json::from_value(json!(true)).digest_for_equal(), "true");
    }

    #[test]
    fn object_digests_should_ignore_key_order() {
        let a = Json::from_str(r#"{"a":1,"b":2}"#).unwrap();
        let b = Json::from_str(r#"{"b":2,"a":1}"#).unwrap();
        assert_eq!(a.digest_for_equal(), b.digest_for_equal());
        assert_eq!(a.digest_for_equal(), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn array_digests_should_respect_element_order() {
        let a = Json::from_str(r#"["a","b"]"#).unwrap();
        let b = Json::from_str(r#"["b","a"]"#).unwrap();
        assert_ne!(a.digest_for_equal(), b.digest_for_equal());
    }

    #[test]
    fn nested_structures_should_digest_recursively() {
        let j = Json::from_value(json!({
            "z": [1, {"y": 2, "x": 3}],
            "a": null
        }));
        assert_eq!(
            j.digest_for_equal(),
            r#"{"a":null,"z":[1,{"x":3,"y":2}]}"#
        );
    }

    #[test]
    fn digests_should_be_stable_under_reencode_and_reparse() {
        let original = Json::from_str(r#"{"k":[1,2,{"n":null}],"s":"v"}"#).unwrap();
        let reparsed = Json::from_slice(&original.encode().unwrap()).unwrap();
        assert_eq!(original.digest_for_equal(), reparsed.digest_for_equal());
    }

    #[test]
    fn fluent_builds_should_digest_canonically() {
        let digest = Json::new_object()
            .set("hello", "world")
            .set("hi", Json::new_object().set("age", 18))
            .set("times", 123)
            .set("a", "head")
            .digest_for_equal();
        assert_eq!(
            digest,
            r#"{"a":"head","hello":"world","hi":{"age":18},"times":123}"#
        );
    }

    #[test]
    fn is_same_json_should_be_reflexive_and_symmetric() {
        let a = Json::from_str(r#"{"x":1,"y":[2,3]}"#).unwrap();
        let b = Json::from_str(r#"{"y":[2,3],"x":1}"#).unwrap();
        assert!(a.is_same_json_as(&a));
        assert!(a.is_same_json_as(&b));
        assert!(b.is_same_json_as(&a));
    }

    #[test]
    fn is_same_json_should_treat_only_two_empties_as_equal() {
        let empty = Json::new_empty();
        let held = Json::from_value(json!(null));
        assert!(empty.is_same_json_as(&Json::new_empty()));
        assert!(!empty.is_same_json_as(&held));
        assert!(!held.is_same_json_as(&empty));
    }
}
