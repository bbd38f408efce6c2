//! Lenient JSON request bodies.
//!
//! Write endpoints accept loosely typed bodies: a field counts as present only
//! when truthy, and text fields take the string form of scalar values.

use salvo::Request;
use serde_json::{Map, Number, Value};

/// Object fields of a request body.
pub(crate) type Payload = Map<String, Value>;

/// Read the body as a JSON object. Missing, malformed and non-object bodies
/// all read as an empty object.
pub(crate) async fn read(req: &mut Request) -> Payload {
    match req.parse_json::<Value>().await {
        Ok(Value::Object(fields)) => fields,
        _ => Payload::new(),
    }
}

/// `null`, `false`, `0` and `""` are falsy; every other value is truthy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Truthy field value, if any.
pub(crate) fn present<'a>(payload: &'a Payload, key: &str) -> Option<&'a Value> {
    payload.get(key).filter(|value| is_truthy(value))
}

/// Truthy scalar field rendered as text. Arrays, objects and strings holding
/// NUL (which Postgres cannot store) yield `None`.
pub(crate) fn text(payload: &Payload, key: &str) -> Option<String> {
    match present(payload, key)? {
        Value::String(text) if text.contains('\0') => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number_text(number)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// A JSON number, or a string holding one.
pub(crate) fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite()),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Integral floats print without a fractional part, so `10.0` reads as `"10"`.
fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(value) if number.is_f64() && value.fract() == 0.0 && value.abs() < 1e21 => {
            format!("{value:.0}")
        }
        Some(value) if number.is_f64() => value.to_string(),
        _ => number.to_string(),
    }
}
