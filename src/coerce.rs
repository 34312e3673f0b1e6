//! JSON to CBOR value translation
//!
//! The JSON decoder hands numbers over as their literal source text. Each one is
//! narrowed to the most compact CBOR type that holds it without loss: a signed
//! 64-bit integer when the text is a plain base-10 integer in range, otherwise
//! a 64-bit float. Text that fits neither (a magnitude that overflows `f64`) is
//! kept as a text string, unchanged from the document.

use crate::json::Json;
use crate::value::Value;

/// Convert a decoded JSON tree into typed values. Never fails.
pub fn coerce(value: Json) -> Value {
    match value {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(text) => number(text),
        Json::String(s) => Value::Text(s),
        Json::Array(items) => Value::Array(items.into_iter().map(coerce).collect()),
        Json::Object(object) => Value::Map(
            object
                .into_iter()
                .map(|(k, v)| (Value::Text(k), coerce(v)))
                .collect(),
        ),
    }
}

fn number(text: String) -> Value {
    if let Ok(i) = text.parse::<i64>() {
        return Value::Integer(i128::from(i));
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::Float(f),
        _ => {
            tracing::debug!(number = %text, "number fits neither i64 nor f64, keeping text");
            Value::Text(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coerce_text(text: &str) -> Value {
        coerce(Json::parse(text).unwrap())
    }

    #[test]
    fn test_integer_text_becomes_integer() {
        assert_eq!(coerce_text("42"), Value::Integer(42));
        assert_eq!(coerce_text("-17"), Value::Integer(-17));
        assert_eq!(coerce_text("-0"), Value::Integer(0));
        assert_eq!(
            coerce_text("9223372036854775807"),
            Value::Integer(i128::from(i64::MAX))
        );
        assert_eq!(
            coerce_text("-9223372036854775808"),
            Value::Integer(i128::from(i64::MIN))
        );
    }

    #[test]
    fn test_fraction_or_exponent_becomes_float() {
        assert_eq!(coerce_text("42.0"), Value::Float(42.0));
        assert_eq!(coerce_text("1e10"), Value::Float(1e10));
        assert_eq!(coerce_text("2.5E-3"), Value::Float(0.0025));
    }

    #[test]
    fn test_int64_overflow_becomes_float() {
        assert_eq!(
            coerce_text("9223372036854775808"),
            Value::Float(9_223_372_036_854_775_808.0)
        );
        assert_eq!(
            coerce_text("-9223372036854775809"),
            Value::Float(-9_223_372_036_854_775_809.0)
        );
    }

    #[test]
    fn test_exact_text_survives_parse() {
        // More digits than f64 holds; the integer parse must see the original text.
        assert_eq!(
            coerce_text("1234567890123456789"),
            Value::Integer(1_234_567_890_123_456_789)
        );
    }

    #[test]
    fn test_float_overflow_falls_back_to_text() {
        assert_eq!(coerce_text("1e400"), Value::Text("1e400".to_string()));
        assert_eq!(coerce_text("-1e400"), Value::Text("-1e400".to_string()));
        assert_eq!(coerce_text("[2E400]"), Value::Array(vec![Value::Text("2E400".to_string())]));
    }

    #[test]
    fn test_containers_recurse() {
        let value = coerce_text(r#"{"x": 1, "y": [1, 2.5, "3", null, true], "z": {}}"#);
        assert_eq!(
            value,
            Value::Map(vec![
                (Value::Text("x".into()), Value::Integer(1)),
                (
                    Value::Text("y".into()),
                    Value::Array(vec![
                        Value::Integer(1),
                        Value::Float(2.5),
                        Value::Text("3".into()),
                        Value::Null,
                        Value::Bool(true),
                    ])
                ),
                (Value::Text("z".into()), Value::Map(vec![])),
            ])
        );
    }
}
