//! # minjson-python
//!
//! Python bindings for the restricted JSON codec, built with PyO3.
//!
//! Exposes the following functions to Python as the `minjson` module:
//!
//! - `dumps(obj)` -- dict of str/int/dict -> compact JSON string
//! - `loads(text)` -- JSON object text (str or bytes) -> dict
//!
//! Both accept keyword-only `max_depth` and `strict` arguments mirroring
//! [`minjson_core::Options`].

use minjson_core::{
    BigInt, Error, Map, Options, TypeError, TypeErrorKind, Value, DEFAULT_MAX_DEPTH,
};
use pyo3::exceptions::{PyRecursionError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyBytes, PyDict, PyFloat, PyInt, PyList, PyString, PyTuple};

fn to_py_err(err: Error) -> PyErr {
    match err {
        Error::Type(e) => PyTypeError::new_err(e.to_string()),
        Error::Syntax(e) => PyValueError::new_err(e.to_string()),
        Error::NestingTooDeep { .. } => PyRecursionError::new_err(err.to_string()),
    }
}

fn options(max_depth: usize, strict: bool) -> Options {
    let base = if strict {
        Options::strict()
    } else {
        Options::default()
    };
    base.with_max_depth(max_depth)
}

fn type_error(kind: TypeErrorKind) -> PyErr {
    to_py_err(Error::Type(TypeError::new(kind)))
}

/// Python's type name for `obj`, used in unsupported-value errors.
fn kind_of(obj: &Bound<'_, PyAny>) -> &'static str {
    if obj.is_none() {
        "NoneType"
    } else if obj.is_instance_of::<PyBool>() {
        "bool"
    } else if obj.is_instance_of::<PyFloat>() {
        "float"
    } else if obj.is_instance_of::<PyList>() {
        "list"
    } else if obj.is_instance_of::<PyTuple>() {
        "tuple"
    } else if obj.is_instance_of::<PyBytes>() {
        "bytes"
    } else if obj.is_instance_of::<PyDict>() {
        "dict subclass"
    } else if obj.is_instance_of::<PyInt>() {
        "int subclass"
    } else if obj.is_instance_of::<PyString>() {
        "str subclass"
    } else {
        "object"
    }
}

/// Convert a nested Python value into a [`Value`].
///
/// Only exact `dict`, `str` and `int` are accepted. `bool` is an `int`
/// subclass and is rejected like every other subclass.
fn lower(obj: &Bound<'_, PyAny>, depth: usize, opts: &Options) -> PyResult<Value> {
    if obj.is_exact_instance_of::<PyString>() {
        return Ok(Value::Str(obj.extract::<String>()?));
    }
    if obj.is_exact_instance_of::<PyInt>() {
        return Ok(Value::Int(obj.extract::<BigInt>()?));
    }
    let Ok(dict) = obj.downcast_exact::<PyDict>() else {
        return Err(type_error(TypeErrorKind::UnsupportedValue {
            kind: kind_of(obj),
        }));
    };
    lower_dict(dict, depth, opts)
}

fn lower_dict(dict: &Bound<'_, PyDict>, depth: usize, opts: &Options) -> PyResult<Value> {
    if depth > opts.max_depth {
        return Err(to_py_err(Error::NestingTooDeep {
            max: opts.max_depth,
        }));
    }
    let mut map = Map::with_capacity(dict.len());
    for (key, value) in dict.iter() {
        if !key.is_exact_instance_of::<PyString>() {
            return Err(type_error(TypeErrorKind::KeyMustBeString));
        }
        map.insert(key.extract::<String>()?, lower(&value, depth + 1, opts)?);
    }
    Ok(Value::Object(map))
}

/// Convert a parsed [`Value`] into Python objects.
fn lift<'py>(py: Python<'py>, value: &Value) -> PyResult<Bound<'py, PyAny>> {
    Ok(match value {
        Value::Str(s) => PyString::new(py, s).into_any(),
        Value::Int(n) => n.into_pyobject(py)?.into_any(),
        Value::Float(f) => PyFloat::new(py, *f).into_any(),
        Value::Object(map) => {
            let dict = PyDict::new(py);
            for (key, child) in map {
                dict.set_item(key, lift(py, child)?)?;
            }
            dict.into_any()
        }
    })
}

/// Serialize a dict to compact JSON.
///
/// Args:
///     obj: A dict (or dict subclass) whose keys are str and whose values
///         are str, int or plain dict.
///     max_depth: Maximum dict nesting, counting `obj` as depth 1.
///     strict: Use the strict preset before applying `max_depth`.
///
/// Returns:
///     The JSON text, with keys in insertion order and no whitespace.
///
/// Raises:
///     TypeError: If `obj` is not a dict, a key is not a str, or a value has
///         an unsupported type.
///     RecursionError: If nesting exceeds `max_depth`.
#[pyfunction]
#[pyo3(signature = (obj, *, max_depth=DEFAULT_MAX_DEPTH, strict=false))]
fn dumps(obj: &Bound<'_, PyAny>, max_depth: usize, strict: bool) -> PyResult<String> {
    let opts = options(max_depth, strict);
    // Subclasses are fine at the root; nested dicts must be exact.
    let Ok(root) = obj.downcast::<PyDict>() else {
        return Err(type_error(TypeErrorKind::ExpectedObject));
    };
    let value = lower_dict(root, 1, &opts)?;
    let py = obj.py();
    py.allow_threads(|| minjson_core::dumps_with(&value, &opts))
        .map_err(to_py_err)
}

/// Parse JSON object text into a dict.
///
/// Args:
///     text: A str, or UTF-8 encoded bytes.
///     max_depth: Maximum object nesting, counting the root as depth 1.
///     strict: Reject lone surrogate escapes instead of replacing them.
///
/// Returns:
///     A dict of str, int, float and nested dicts.
///
/// Raises:
///     ValueError: If the text is malformed or the root is not an object.
///     RecursionError: If nesting exceeds `max_depth`.
#[pyfunction]
#[pyo3(signature = (text, *, max_depth=DEFAULT_MAX_DEPTH, strict=false))]
fn loads<'py>(
    py: Python<'py>,
    text: &Bound<'py, PyAny>,
    max_depth: usize,
    strict: bool,
) -> PyResult<Bound<'py, PyAny>> {
    let opts = options(max_depth, strict);
    let parsed = if let Ok(s) = text.downcast::<PyString>() {
        let s = s.to_str()?;
        py.allow_threads(|| minjson_core::loads_with(s, &opts))
    } else if let Ok(b) = text.downcast::<PyBytes>() {
        let bytes = b.as_bytes();
        py.allow_threads(|| minjson_core::loads_bytes_with(bytes, &opts))
    } else {
        return Err(PyTypeError::new_err(format!(
            "loads() argument must be str or bytes, not {}",
            kind_of(text)
        )));
    };
    let value = parsed.map_err(to_py_err)?;
    lift(py, &value)
}

/// The `minjson` Python module, implemented in Rust via PyO3.
#[pymodule]
fn minjson(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(dumps, m)?)?;
    m.add_function(wrap_pyfunction!(loads, m)?)?;
    m.add("DEFAULT_MAX_DEPTH", DEFAULT_MAX_DEPTH)?;
    Ok(())
}
