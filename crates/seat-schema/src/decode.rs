//! Typed decoding of already-validated JSON.
//!
//! JSON Schema treats `3.0` as an integer, serde does not. Integral floats are
//! rewritten as integers first so anything the schema accepts also decodes.
//! Whatever still fails is reported at the JSON pointer of the offending value.

use seat_core::errors::ValidationError;
use serde::de::DeserializeOwned;
use serde_json::{Number, Value};

/// Decode `instance` into `T`, locating any failure by JSON pointer.
pub fn decode<T: DeserializeOwned>(instance: &Value) -> Result<T, ValidationError> {
    let mut normalized = instance.clone();
    integral_floats_to_ints(&mut normalized);

    // Decoding from pretty text gives a line number; `pointer_lines` maps it
    // back to the value printed on that line.
    let text = serde_json::to_string_pretty(&normalized)
        .map_err(|e| ValidationError::single("", e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| {
        let mut lines = Vec::new();
        pointer_lines(&normalized, String::new(), &mut lines);
        let path = e
            .line()
            .checked_sub(1)
            .and_then(|i| lines.get(i))
            .cloned()
            .unwrap_or_default();
        ValidationError::single(path, strip_position(&e.to_string()))
    })
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn integral_floats_to_ints(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            let Some(f) = n.as_f64() else { return };
            if f.fract() != 0.0 {
                return;
            }
            if (0.0..u64::MAX as f64).contains(&f) {
                *n = Number::from(f as u64);
            } else if (i64::MIN as f64..0.0).contains(&f) {
                *n = Number::from(f as i64);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(integral_floats_to_ints),
        Value::Object(map) => map.values_mut().for_each(integral_floats_to_ints),
        _ => {}
    }
}

/// One entry per line of `serde_json::to_string_pretty(value)`: the pointer
/// of the value that line opens, holds, or closes.
fn pointer_lines(value: &Value, pointer: String, lines: &mut Vec<String>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            lines.push(pointer.clone());
            for (key, child) in map {
                pointer_lines(child, format!("{pointer}/{}", escape(key)), lines);
            }
            lines.push(pointer);
        }
        Value::Array(items) if !items.is_empty() => {
            lines.push(pointer.clone());
            for (index, child) in items.iter().enumerate() {
                pointer_lines(child, format!("{pointer}/{index}"), lines);
            }
            lines.push(pointer);
        }
        _ => lines.push(pointer),
    }
}

fn escape(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

fn strip_position(message: &str) -> String {
    message
        .rsplit_once(" at line ")
        .map_or(message, |(head, _)| head)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Inner {
        #[allow(dead_code)]
        count: u8,
    }

    #[derive(Debug, Deserialize)]
    struct Outer {
        #[allow(dead_code)]
        items: Vec<Inner>,
    }

    #[test]
    fn integral_float_decodes_as_integer() {
        let inner: Inner = decode(&json!({"count": 3.0})).unwrap();
        assert_eq!(inner.count, 3);
    }

    #[test]
    fn failure_is_located_by_pointer() {
        let err = decode::<Outer>(&json!({"items": [{"count": 1}, {"count": 300}]})).unwrap_err();
        assert_eq!(err.paths(), vec!["/items/1/count"]);
        assert!(!err.violations[0].message.contains("line"));
    }

    #[test]
    fn missing_field_points_at_its_object() {
        let err = decode::<Outer>(&json!({"items": [{}]})).unwrap_err();
        assert_eq!(err.paths(), vec!["/items/0"]);
    }

    #[test]
    fn pointer_lines_follow_pretty_layout() {
        let value = json!({"a": [], "b": {"c/d": 1}});
        let mut lines = Vec::new();
        pointer_lines(&value, String::new(), &mut lines);
        let printed = serde_json::to_string_pretty(&value).unwrap();
        assert_eq!(lines.len(), printed.lines().count());
        assert_eq!(lines, vec!["", "/a", "/b", "/b/c~1d", "/b", ""]);
    }
}
