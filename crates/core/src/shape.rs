//! Explicit shapes for loosely-typed JSON fields.
//!
//! Document fields may hold a string, a number, an object, an array or
//! nothing at all. Every coercion in the normalizer first classifies the raw
//! value into a [`Shape`] and then handles each variant on its own, instead of
//! probing the value ad hoc.

use serde_json::{Map, Value};

/// The shape of a raw JSON field.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Shape<'a> {
    /// Missing or `null`.
    Absent,
    Text(&'a str),
    Number(f64),
    Object(&'a Map<String, Value>),
    List(&'a [Value]),
    /// Booleans.
    Other,
}

impl<'a> Shape<'a> {
    /// Classify an optional raw value.
    pub(crate) fn of(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => Shape::Absent,
            Some(Value::String(s)) => Shape::Text(s),
            Some(Value::Number(n)) => n.as_f64().map(Shape::Number).unwrap_or(Shape::Other),
            Some(Value::Object(map)) => Shape::Object(map),
            Some(Value::Array(items)) => Shape::List(items),
            Some(Value::Bool(_)) => Shape::Other,
        }
    }

    /// Elements as a list: arrays as-is, absent as empty, anything else as a
    /// single element.
    pub(crate) fn as_list(value: Option<&'a Value>) -> &'a [Value] {
        match value {
            None | Some(Value::Null) => &[],
            Some(Value::Array(items)) => items,
            Some(single) => std::slice::from_ref(single),
        }
    }
}

/// First of `keys` that is present and not `null`.
pub(crate) fn field<'a>(object: Option<&'a Map<String, Value>>, keys: &[&str]) -> Option<&'a Value> {
    let object = object?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

/// Textual value of a field: strings verbatim, numbers in decimal form.
pub(crate) fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape_classification() {
        let doc = json!({"s": "a", "n": 2, "o": {}, "l": [1], "b": true, "z": null});
        let obj = doc.as_object();
        assert!(matches!(Shape::of(field(obj, &["s"])), Shape::Text("a")));
        assert!(matches!(Shape::of(field(obj, &["n"])), Shape::Number(n) if n == 2.0));
        assert!(matches!(Shape::of(field(obj, &["o"])), Shape::Object(_)));
        assert!(matches!(Shape::of(field(obj, &["l"])), Shape::List(_)));
        assert!(matches!(Shape::of(field(obj, &["b"])), Shape::Other));
        assert!(matches!(Shape::of(field(obj, &["z"])), Shape::Absent));
        assert!(matches!(Shape::of(field(obj, &["missing"])), Shape::Absent));
    }

    #[test]
    fn test_field_skips_null_keys() {
        let doc = json!({"a": null, "b": "second"});
        assert_eq!(field(doc.as_object(), &["a", "b"]), Some(&json!("second")));
    }

    #[test]
    fn test_as_list() {
        let single = json!({"slug": "x"});
        assert_eq!(Shape::as_list(Some(&single)).len(), 1);
        assert!(Shape::as_list(None).is_empty());
        assert!(Shape::as_list(Some(&Value::Null)).is_empty());
        assert_eq!(Shape::as_list(Some(&json!([1, 2, 3]))).len(), 3);
    }

    #[test]
    fn test_text() {
        assert_eq!(text(Some(&json!("abc"))), Some("abc".to_string()));
        assert_eq!(text(Some(&json!(7))), Some("7".to_string()));
        assert_eq!(text(Some(&json!([]))), None);
        assert_eq!(text(None), None);
    }
}
