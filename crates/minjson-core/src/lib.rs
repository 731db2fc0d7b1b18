//! # minjson-core
//!
//! A small, strict JSON codec for documents made of **objects, strings and
//! integers**.
//!
//! The writer serializes a [`Value`] tree whose root is an object into compact
//! JSON text; the parser reads such text back. Integers are arbitrary
//! precision in both directions. The parser additionally accepts fractional
//! and exponent numbers as `f64`, which the writer refuses. Arrays, booleans
//! and null are not part of either grammar.
//!
//! ## Quick start
//!
//! ```rust
//! use minjson_core::{dumps, loads};
//!
//! let text = r#"{"name":"Alice","big":123456789012345678901234567890}"#;
//! let value = loads(text).unwrap();
//! assert_eq!(value.get("name").and_then(|v| v.as_str()), Some("Alice"));
//!
//! // Value -> text (roundtrip)
//! assert_eq!(dumps(&value).unwrap(), text);
//! ```
//!
//! ## Modules
//!
//! - [`encoder`] - `Value` -> JSON text (`dumps`)
//! - [`decoder`] - JSON text -> `Value` (`loads`)
//! - [`host`] - conversions to and from `serde_json::Value`
//! - [`error`] - type, syntax and nesting-limit errors
//! - [`options`] - per-call limits and policies
//! - [`types`] - the `Value` tree

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod host;
pub mod options;
pub mod types;

mod lex;

pub use decoder::{loads, loads_bytes, loads_bytes_with, loads_with};
pub use encoder::{dumps, dumps_with};
pub use error::{Error, Result, SyntaxError, SyntaxErrorKind, TypeError, TypeErrorKind};
pub use host::{dumps_json, dumps_json_with};
pub use options::{Options, SurrogatePolicy, DEFAULT_MAX_DEPTH};
pub use types::{Map, Stats, Value};

pub use num_bigint::BigInt;
