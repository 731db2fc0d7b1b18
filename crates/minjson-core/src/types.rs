//! The value tree shared by the writer and the parser.
//!
//! Integers are arbitrary precision so documents carrying values past the
//! 64-bit range survive a load/dump cycle digit for digit. Objects keep
//! insertion order; equality between objects compares key sets and values and
//! ignores order.

use indexmap::IndexMap;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// Ordered mapping used for objects. Inserting an existing key replaces its
/// value and keeps the key's original position.
pub type Map = IndexMap<String, Value>;

/// A document value.
///
/// `Float` is produced by the parser only; the writer rejects it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(BigInt),
    Float(f64),
    Object(Map),
}

impl Value {
    /// Empty object.
    pub fn object() -> Self {
        Value::Object(Map::new())
    }

    /// Short lowercase name of the variant, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "str",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Object(_) => "object",
        }
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    /// The integer as `i64`, if it is one and fits.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_int().and_then(ToPrimitive::to_i64)
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key if this is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Object nesting depth: 0 for scalars, 1 for an object holding only
    /// scalars, and so on.
    pub fn depth(&self) -> usize {
        self.stats().depth
    }

    /// Count the nodes of the tree. Walks with an explicit stack, so caller
    /// built trees of any depth are safe to inspect.
    pub fn stats(&self) -> Stats {
        let mut stats = Stats::default();
        let mut stack: Vec<(&Value, usize)> = vec![(self, 0)];
        while let Some((value, depth)) = stack.pop() {
            match value {
                Value::Str(_) => stats.strings += 1,
                Value::Int(_) => stats.ints += 1,
                Value::Float(_) => stats.floats += 1,
                Value::Object(map) => {
                    stats.objects += 1;
                    stats.keys += map.len();
                    stats.depth = stats.depth.max(depth + 1);
                    stack.extend(map.values().map(|child| (child, depth + 1)));
                }
            }
        }
        stats
    }
}

/// Node counts for a value tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Keys across all objects.
    pub keys: usize,
    pub objects: usize,
    pub ints: usize,
    pub floats: usize,
    pub strings: usize,
    /// Deepest object nesting.
    pub depth: usize,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(BigInt::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Int(BigInt::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(BigInt::from(n))
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
