//! Lenient field readers for the calculate request.
//!
//! The calculator form never rejects a figure: anything that is not a usable
//! number becomes zero, and the worker flag follows JavaScript truthiness.
//! These helpers reproduce that contract with `deserialize_with` so the typed
//! request handed to the engine is always fully defaulted.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a number the way `Number(x) || 0` does.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value))
}

/// Reads a flag the way `!!x` does.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(truthy(&value))
}

/// Accepts a string or a number as text; anything else is treated as absent.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Deserializes `T` when the field holds an object, `T::default()` otherwise.
pub fn object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).map_err(serde::de::Error::custom),
        _ => Ok(T::default()),
    }
}

fn number_from_value(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { 0.0 } else { s.parse().unwrap_or(0.0) }
        }
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize, Default, Debug)]
    struct Fields {
        #[serde(default, deserialize_with = "number")]
        amount: f64,
        #[serde(default, deserialize_with = "flag")]
        enabled: bool,
        #[serde(default, deserialize_with = "text")]
        code: Option<String>,
    }

    fn fields(value: serde_json::Value) -> Fields {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn numbers_follow_form_coercion() {
        assert_eq!(fields(json!({"amount": 15000})).amount, 15000.0);
        assert_eq!(fields(json!({"amount": 1600.5})).amount, 1600.5);
        assert_eq!(fields(json!({"amount": " 2000 "})).amount, 2000.0);
        assert_eq!(fields(json!({"amount": "12abc"})).amount, 0.0);
        assert_eq!(fields(json!({"amount": ""})).amount, 0.0);
        assert_eq!(fields(json!({"amount": null})).amount, 0.0);
        assert_eq!(fields(json!({"amount": true})).amount, 1.0);
        assert_eq!(fields(json!({"amount": false})).amount, 0.0);
        assert_eq!(fields(json!({"amount": [1]})).amount, 0.0);
        assert_eq!(fields(json!({"amount": "NaN"})).amount, 0.0);
        assert_eq!(fields(json!({"amount": "inf"})).amount, 0.0);
        assert_eq!(fields(json!({})).amount, 0.0);
    }

    #[test]
    fn negative_numbers_survive_coercion() {
        // clamping to zero happens when converting to money
        assert_eq!(fields(json!({"amount": -5})).amount, -5.0);
    }

    #[test]
    fn flags_follow_truthiness() {
        assert!(fields(json!({"enabled": true})).enabled);
        assert!(fields(json!({"enabled": 1})).enabled);
        assert!(fields(json!({"enabled": "false"})).enabled);
        assert!(fields(json!({"enabled": {}})).enabled);
        assert!(!fields(json!({"enabled": 0})).enabled);
        assert!(!fields(json!({"enabled": ""})).enabled);
        assert!(!fields(json!({"enabled": null})).enabled);
        assert!(!fields(json!({})).enabled);
    }

    #[test]
    fn text_accepts_strings_and_numbers() {
        assert_eq!(fields(json!({"code": "EMP-001"})).code.as_deref(), Some("EMP-001"));
        assert_eq!(fields(json!({"code": 42})).code.as_deref(), Some("42"));
        assert_eq!(fields(json!({"code": false})).code, None);
        assert_eq!(fields(json!({})).code, None);
    }

    #[test]
    fn non_object_falls_back_to_default() {
        #[derive(Deserialize, Default, Debug, PartialEq)]
        struct Inner {
            #[serde(default)]
            x: u32,
        }
        #[derive(Deserialize)]
        struct Outer {
            #[serde(default, deserialize_with = "object_or_default")]
            inner: Inner,
        }

        let outer: Outer = serde_json::from_value(json!({"inner": "oops"})).unwrap();
        assert_eq!(outer.inner, Inner::default());
        let outer: Outer = serde_json::from_value(json!({"inner": {"x": 3}})).unwrap();
        assert_eq!(outer.inner, Inner { x: 3 });
    }
}
