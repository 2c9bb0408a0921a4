//! Tag and annotation values.
//!
//! Tags and log annotations are handed to the generator as open, dynamically
//! typed maps ([`Value`]). Before a span is built they are narrowed into the
//! closed [`AttributeValue`] schema by [`encode`]; anything the schema cannot
//! represent is dropped with a diagnostic instead of failing span generation.
use std::collections::{BTreeMap, HashMap};

/// A dynamically typed tag or annotation value.
///
/// Conversions from Rust primitives decide the variant at the point of
/// insertion. Types the wire schema has no room for (floating point numbers,
/// integers that do not fit in an `i64`) become [`Value::Unsupported`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// UTF-8 string value.
    String(String),
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer value.
    I64(i64),
    /// A value of a type the wire schema cannot carry, with a description of
    /// what was supplied.
    Unsupported(String),
}

impl Value {
    /// Short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &str {
        match self {
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::I64(_) => "i64",
            Value::Unsupported(description) => description.as_str(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_widening_int {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::I64(i64::from(v))
                }
            }
        )+
    };
}

from_widening_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! from_checked_int {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    i64::try_from(v)
                        .map(Value::I64)
                        .unwrap_or_else(|_| Value::Unsupported(format!("{}({})", stringify!($t), v)))
                }
            }
        )+
    };
}

from_checked_int!(u64, usize, isize);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Unsupported(format!("f64({})", v))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Unsupported(format!("f32({})", v))
    }
}

/// A value in the closed attribute schema carried on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    /// String attribute.
    String(String),
    /// Boolean attribute.
    Bool(bool),
    /// 64-bit integer attribute.
    I64(i64),
}

impl TryFrom<&Value> for AttributeValue {
    type Error = ();

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(v) => Ok(AttributeValue::String(v.clone())),
            Value::Bool(v) => Ok(AttributeValue::Bool(*v)),
            Value::I64(v) => Ok(AttributeValue::I64(*v)),
            Value::Unsupported(_) => Err(()),
        }
    }
}

/// Encoded attribute set of a span or an annotation.
///
/// Entries are kept sorted by key so the wire encoding of a span does not
/// depend on the iteration order of the map it was built from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    map: BTreeMap<String, AttributeValue>,
    dropped_count: u32,
}

impl Attributes {
    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.map.get(key)
    }

    /// Number of encoded entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no entry survived encoding.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of entries dropped because their value type is unsupported.
    pub fn dropped_count(&self) -> u32 {
        self.dropped_count
    }

    /// Iterates over the entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a AttributeValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

/// Encodes a dynamically typed tag map into the closed attribute schema.
///
/// Strings, booleans and integers are carried over. Entries holding an
/// [`Value::Unsupported`] value are dropped after a warning; they never abort
/// encoding.
pub fn encode(tags: &HashMap<String, Value>) -> Attributes {
    let mut attributes = Attributes::default();
    for (key, value) in tags {
        match AttributeValue::try_from(value) {
            Ok(attribute) => {
                attributes.map.insert(key.clone(), attribute);
            }
            Err(()) => {
                spanner_warn!(
                    name: "Attributes.UnsupportedValueType",
                    key = key.as_str(),
                    value_type = value.type_name(),
                );
                attributes.dropped_count += 1;
            }
        }
    }
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tags<const N: usize>(entries: [(&str, Value); N]) -> HashMap<String, Value> {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[rstest]
    #[case(Value::from("neo-api"), AttributeValue::String("neo-api".into()))]
    #[case(Value::from(true), AttributeValue::Bool(true))]
    #[case(Value::from(123456), AttributeValue::I64(123456))]
    #[case(Value::from(7u8), AttributeValue::I64(7))]
    #[case(Value::from(u32::MAX), AttributeValue::I64(u32::MAX as i64))]
    #[case(Value::from(1000usize), AttributeValue::I64(1000))]
    fn encodes_supported_values(#[case] value: Value, #[case] expected: AttributeValue) {
        let attributes = encode(&tags([("k", value)]));
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes.get("k"), Some(&expected));
        assert_eq!(attributes.dropped_count(), 0);
    }

    #[test]
    fn drops_float_without_failing() {
        let attributes = encode(&tags([("x", Value::from(2.75))]));
        assert!(attributes.get("x").is_none());
        assert!(attributes.is_empty());
        assert_eq!(attributes.dropped_count(), 1);
    }

    #[test]
    fn drops_only_the_unsupported_entries() {
        let attributes = encode(&tags([
            ("service_name", Value::from("user-svc")),
            ("ratio", Value::from(0.5f32)),
            ("huge", Value::from(u64::MAX)),
            ("uid", Value::from(123456)),
        ]));
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes.dropped_count(), 2);
        assert_eq!(
            attributes.get("service_name"),
            Some(&AttributeValue::String("user-svc".into()))
        );
        assert_eq!(attributes.get("uid"), Some(&AttributeValue::I64(123456)));
    }

    #[test]
    fn iterates_in_key_order() {
        let attributes = encode(&tags([
            ("source", Value::from("web")),
            ("count", Value::from(1000)),
            ("remote_kind", Value::from("redis")),
        ]));
        let keys: Vec<&str> = attributes.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["count", "remote_kind", "source"]);
    }

    #[test]
    fn empty_input_encodes_to_empty_set() {
        let attributes = encode(&HashMap::new());
        assert!(attributes.is_empty());
        assert_eq!(attributes, Attributes::default());
    }

    #[test]
    fn large_unsigned_is_unsupported() {
        assert_eq!(
            Value::from(u64::MAX),
            Value::Unsupported(format!("u64({})", u64::MAX))
        );
        assert_eq!(Value::from(42u64), Value::I64(42));
    }
}
