/// Writer contract tests.
///
/// Covers integer formatting, the string escaping procedure (fast path and
/// escaped path), object layout, and every type rejection the writer performs.
use minjson_core::{dumps, dumps_with, BigInt, Error, Map, Options, TypeErrorKind, Value};

fn obj<const N: usize>(pairs: [(&str, Value); N]) -> Value {
    pairs.into_iter().collect()
}

fn type_kind(value: &Value) -> TypeErrorKind {
    dumps(value)
        .unwrap_err()
        .type_kind()
        .cloned()
        .expect("expected a type error")
}

// ============================================================================
// Objects
// ============================================================================

#[test]
fn dump_empty_object() {
    assert_eq!(dumps(&Value::object()).unwrap(), "{}");
}

#[test]
fn dump_flat_object_no_whitespace() {
    let value = obj([("a", Value::from(1)), ("b", Value::from("two"))]);
    assert_eq!(dumps(&value).unwrap(), r#"{"a":1,"b":"two"}"#);
}

#[test]
fn dump_preserves_insertion_order() {
    let value = obj([
        ("zeta", Value::from(1)),
        ("alpha", Value::from(2)),
        ("mid", Value::from(3)),
    ]);
    assert_eq!(dumps(&value).unwrap(), r#"{"zeta":1,"alpha":2,"mid":3}"#);
}

#[test]
fn dump_nested_objects() {
    let value = obj([
        ("outer", obj([("inner", obj([("x", Value::from(-1))]))])),
        ("empty", Value::object()),
    ]);
    assert_eq!(
        dumps(&value).unwrap(),
        r#"{"outer":{"inner":{"x":-1}},"empty":{}}"#
    );
}

#[test]
fn dump_escapes_keys() {
    let value = obj([("a\"b\n", Value::from(1))]);
    assert_eq!(dumps(&value).unwrap(), r#"{"a\"b\n":1}"#);
}

#[test]
fn dump_after_overwrite_keeps_first_position() {
    let mut map = Map::new();
    map.insert("a".into(), Value::from(1));
    map.insert("b".into(), Value::from(2));
    map.insert("a".into(), Value::from(3));
    assert_eq!(dumps(&Value::Object(map)).unwrap(), r#"{"a":3,"b":2}"#);
}

// ============================================================================
// Integers
// ============================================================================

#[test]
fn dump_zero_and_negative() {
    let value = obj([("z", Value::from(0)), ("n", Value::from(-42))]);
    assert_eq!(dumps(&value).unwrap(), r#"{"z":0,"n":-42}"#);
}

#[test]
fn dump_i64_bounds() {
    let value = obj([("min", Value::from(i64::MIN)), ("max", Value::from(i64::MAX))]);
    assert_eq!(
        dumps(&value).unwrap(),
        r#"{"min":-9223372036854775808,"max":9223372036854775807}"#
    );
}

#[test]
fn dump_forty_digit_integer() {
    let digits = "1234567890123456789012345678901234567890";
    let n: BigInt = digits.parse().unwrap();
    let value = obj([("big", Value::Int(n.clone())), ("neg", Value::Int(-n))]);
    assert_eq!(
        dumps(&value).unwrap(),
        format!(r#"{{"big":{digits},"neg":-{digits}}}"#)
    );
}

#[test]
fn dump_just_past_u64() {
    let n = BigInt::from(u64::MAX) + 1u32;
    let value = obj([("n", Value::Int(n))]);
    assert_eq!(dumps(&value).unwrap(), r#"{"n":18446744073709551616}"#);
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn dump_clean_string_matches_naive_quoting() {
    for s in ["", "hello", "with spaces and / slashes", "caf\u{e9} \u{4f60}\u{597d}"] {
        let value = obj([("k", Value::from(s))]);
        assert_eq!(dumps(&value).unwrap(), format!("{{\"k\":\"{s}\"}}"));
    }
}

#[test]
fn dump_escape_coverage() {
    let value = obj([("k", Value::from("a\"b\\c\nd\te"))]);
    assert_eq!(dumps(&value).unwrap(), r#"{"k":"a\"b\\c\nd\te"}"#);
}

#[test]
fn dump_all_named_escapes() {
    let value = obj([("k", Value::from("\u{8}\u{c}\n\r\t\"\\"))]);
    assert_eq!(dumps(&value).unwrap(), r#"{"k":"\b\f\n\r\t\"\\"}"#);
}

#[test]
fn dump_other_controls_as_lowercase_unicode() {
    let value = obj([("k", Value::from("\u{0}\u{1b}\u{1f}"))]);
    assert_eq!(dumps(&value).unwrap(), r#"{"k":"\u0000\u001b\u001f"}"#);
}

#[test]
fn dump_does_not_escape_non_ascii() {
    let value = obj([("k", Value::from("\u{1f600}\n\u{e9}\u{7f}"))]);
    let out = dumps(&value).unwrap();
    assert_eq!(out, "{\"k\":\"\u{1f600}\\n\u{e9}\u{7f}\"}");
    assert!(!out.contains("\\ud83d"));
}

#[test]
fn dump_forward_slash_is_not_escaped() {
    let value = obj([("url", Value::from("http://a/b"))]);
    assert_eq!(dumps(&value).unwrap(), r#"{"url":"http://a/b"}"#);
}

// ============================================================================
// Type rejection
// ============================================================================

#[test]
fn reject_non_object_root() {
    assert_eq!(type_kind(&Value::from("x")), TypeErrorKind::ExpectedObject);
    assert_eq!(type_kind(&Value::from(1)), TypeErrorKind::ExpectedObject);
    assert_eq!(type_kind(&Value::Float(1.0)), TypeErrorKind::ExpectedObject);
}

#[test]
fn reject_top_level_float_value() {
    let value = obj([("f", Value::Float(1.5))]);
    assert_eq!(
        type_kind(&value),
        TypeErrorKind::UnsupportedValue { kind: "float" }
    );
}

#[test]
fn reject_nested_float_after_valid_pairs() {
    let value = obj([
        ("ok", Value::from(1)),
        ("deep", obj([("also_ok", Value::from("s")), ("bad", Value::Float(0.0))])),
    ]);
    let err = dumps(&value).unwrap_err();
    assert_eq!(
        err.type_kind(),
        Some(&TypeErrorKind::UnsupportedValue { kind: "float" })
    );
}

// ============================================================================
// Nesting limit
// ============================================================================

fn nested(depth: usize) -> Value {
    let mut value = Value::from(0);
    for _ in 0..depth {
        value = obj([("n", value)]);
    }
    value
}

#[test]
fn dump_at_default_depth_limit() {
    let out = dumps(&nested(512)).unwrap();
    assert_eq!(out.matches('{').count(), 512);
}

#[test]
fn reject_past_default_depth_limit() {
    assert_eq!(
        dumps(&nested(513)).unwrap_err(),
        Error::NestingTooDeep { max: 512 }
    );
}

#[test]
fn custom_depth_limit() {
    let opts = Options::new().with_max_depth(3);
    assert!(dumps_with(&nested(3), &opts).is_ok());
    assert_eq!(
        dumps_with(&nested(4), &opts).unwrap_err(),
        Error::NestingTooDeep { max: 3 }
    );
}
