//! Bridge to `serde_json::Value`.
//!
//! `serde_json` values can hold arrays, booleans and null, so lowering one into
//! a [`Value`] goes through the same type checks as the writer: the first
//! unsupported node fails the whole conversion.

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde_json::Value as Json;

use crate::encoder::dumps_with;
use crate::error::{Error, Result, TypeError, TypeErrorKind};
use crate::options::Options;
use crate::types::{Map, Value};

/// Serialize a `serde_json` object through the restricted writer.
pub fn dumps_json(json: &Json) -> Result<String> {
    dumps_json_with(json, &Options::default())
}

pub fn dumps_json_with(json: &Json, opts: &Options) -> Result<String> {
    let value = lower_root(json, Target::Writer, opts)?;
    dumps_with(&value, opts)
}

impl TryFrom<&Json> for Value {
    type Error = Error;

    /// Lower a `serde_json` object. Floats are kept; arrays, booleans, null
    /// and non-object roots are rejected.
    fn try_from(json: &Json) -> Result<Self> {
        lower_root(json, Target::Value, &Options::default())
    }
}

/// What the lowered tree is for.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Target {
    /// Any [`Value`], floats included.
    Value,
    /// Input to the writer: floats fail where they are found.
    Writer,
}

fn lower_root(json: &Json, target: Target, opts: &Options) -> Result<Value> {
    if !json.is_object() {
        return Err(TypeError::new(TypeErrorKind::ExpectedObject).into());
    }
    lower(json, 0, target, opts)
}

fn lower(json: &Json, depth: usize, target: Target, opts: &Options) -> Result<Value> {
    match json {
        Json::String(s) => Ok(Value::Str(s.clone())),
        Json::Number(n) => lower_number(n, target),
        Json::Object(obj) => {
            let depth = depth + 1;
            if depth > opts.max_depth {
                return Err(Error::NestingTooDeep {
                    max: opts.max_depth,
                });
            }
            let mut map = Map::with_capacity(obj.len());
            for (key, child) in obj {
                map.insert(key.clone(), lower(child, depth, target, opts)?);
            }
            Ok(Value::Object(map))
        }
        Json::Array(_) => Err(TypeError::unsupported("list").into()),
        Json::Bool(_) => Err(TypeError::unsupported("bool").into()),
        Json::Null => Err(TypeError::unsupported("null").into()),
    }
}

/// Classify by the number's source token, as the parser does: no fraction and
/// no exponent means an integer of any size.
fn lower_number(n: &serde_json::Number, target: Target) -> Result<Value> {
    let token = n.as_str();
    if !token.contains(['.', 'e', 'E']) {
        return token
            .parse::<BigInt>()
            .map(Value::Int)
            .map_err(|_| TypeError::unsupported("number").into());
    }
    match target {
        Target::Writer => Err(TypeError::unsupported("float").into()),
        Target::Value => n
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| TypeError::unsupported("non-finite float").into()),
    }
}

impl TryFrom<&Value> for Json {
    type Error = Error;

    /// Lift into `serde_json`. Integers must fit in `i64`/`u64` and floats must
    /// be finite; nothing is approximated.
    fn try_from(value: &Value) -> Result<Self> {
        Ok(match value {
            Value::Str(s) => Json::String(s.clone()),
            Value::Int(n) => {
                if let Some(i) = n.to_i64() {
                    Json::from(i)
                } else if let Some(u) = n.to_u64() {
                    Json::from(u)
                } else {
                    return Err(TypeError::unsupported("big integer").into());
                }
            }
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .ok_or_else(|| TypeError::unsupported("non-finite float"))?,
            Value::Object(map) => {
                let mut obj = serde_json::Map::with_capacity(map.len());
                for (key, child) in map {
                    obj.insert(key.clone(), Json::try_from(child)?);
                }
                Json::Object(obj)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lowers_supported_tree() {
        let json = json!({"a": 1, "b": "x", "c": {"d": -2}});
        let value = Value::try_from(&json).unwrap();
        assert_eq!(value.get("a").and_then(Value::as_i64), Some(1));
        assert_eq!(value.depth(), 2);
        assert_eq!(dumps_json(&json).unwrap(), r#"{"a":1,"b":"x","c":{"d":-2}}"#);
    }

    #[test]
    fn rejects_unsupported_kinds() {
        for (json, kind) in [
            (json!({"a": [1]}), "list"),
            (json!({"a": true}), "bool"),
            (json!({"a": null}), "null"),
            (json!({"a": 1.5}), "float"),
        ] {
            let err = dumps_json(&json).unwrap_err();
            assert_eq!(
                err.type_kind(),
                Some(&TypeErrorKind::UnsupportedValue { kind }),
                "input {json}"
            );
        }
    }

    #[test]
    fn rejects_non_object_root() {
        let err = dumps_json(&json!([1, 2])).unwrap_err();
        assert_eq!(err.type_kind(), Some(&TypeErrorKind::ExpectedObject));
    }

    #[test]
    fn conversion_rejects_non_object_root() {
        for json in [json!("x"), json!(5), json!([{"a": 1}])] {
            let err = Value::try_from(&json).unwrap_err();
            assert_eq!(
                err.type_kind(),
                Some(&TypeErrorKind::ExpectedObject),
                "input {json}"
            );
        }
    }

    #[test]
    fn conversion_keeps_floats() {
        let value = Value::try_from(&json!({"a": 1.5, "b": 2})).unwrap();
        assert_eq!(value.get("a"), Some(&Value::Float(1.5)));
        assert!(value.get("b").unwrap().is_int());
    }

    #[test]
    fn big_integers_reach_the_writer() {
        let text = r#"{"n":1234567890123456789012345678901234567890,"m":-99999999999999999999}"#;
        let json: Json = serde_json::from_str(text).unwrap();
        assert_eq!(dumps_json(&json).unwrap(), text);

        let value = Value::try_from(&json).unwrap();
        let expected: BigInt = "1234567890123456789012345678901234567890".parse().unwrap();
        assert_eq!(value.get("n"), Some(&Value::Int(expected)));
    }

    #[test]
    fn float_fails_before_later_unsupported_values() {
        let err = dumps_json(&json!({"a": 1.5, "b": [1]})).unwrap_err();
        assert_eq!(
            err.type_kind(),
            Some(&TypeErrorKind::UnsupportedValue { kind: "float" })
        );

        let err = dumps_json(&json!({"a": {"b": null}, "c": 2.5})).unwrap_err();
        assert_eq!(
            err.type_kind(),
            Some(&TypeErrorKind::UnsupportedValue { kind: "null" })
        );
    }

    #[test]
    fn exponent_token_is_a_float() {
        let json: Json = serde_json::from_str(r#"{"a":1e2}"#).unwrap();
        let err = dumps_json(&json).unwrap_err();
        assert_eq!(
            err.type_kind(),
            Some(&TypeErrorKind::UnsupportedValue { kind: "float" })
        );
        assert_eq!(
            Value::try_from(&json).unwrap().get("a"),
            Some(&Value::Float(100.0))
        );
    }

    #[test]
    fn lifting_refuses_lossy_numbers() {
        let big: BigInt = "1".repeat(30).parse().unwrap();
        let err = Json::try_from(&Value::Int(big)).unwrap_err();
        assert_eq!(
            err.type_kind(),
            Some(&TypeErrorKind::UnsupportedValue { kind: "big integer" })
        );

        let err = Json::try_from(&Value::Float(f64::INFINITY)).unwrap_err();
        assert!(err.is_type());
    }

    #[test]
    fn lifting_keeps_u64_range() {
        let json = Json::try_from(&Value::from(u64::MAX)).unwrap();
        assert_eq!(json, json!(u64::MAX));
    }
}
