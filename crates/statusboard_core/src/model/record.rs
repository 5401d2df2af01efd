//! Lenient read access to JSON records.
//!
//! Views never fail: a missing key, a `null`, or a value of the wrong JSON
//! type reads as the empty value of the requested kind.

use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// Borrowed view over one JSON value, usually an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record<'a> {
    value: &'a Value,
}

impl<'a> Record<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// View over nothing; every read returns its empty value.
    pub fn missing() -> Record<'static> {
        Record { value: &NULL }
    }

    pub fn value(self) -> &'a Value {
        self.value
    }

    pub fn as_object(self) -> Option<&'a Map<String, Value>> {
        self.value.as_object()
    }

    /// Non-null value stored under `key`.
    pub fn get(self, key: &str) -> Option<&'a Value> {
        self.value.get(key).filter(|value| !value.is_null())
    }

    pub fn has(self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Nested record under `key`; missing keys give [`Record::missing`].
    pub fn field(self, key: &str) -> Record<'a> {
        match self.get(key) {
            Some(value) => Record::new(value),
            None => Record { value: &NULL },
        }
    }

    pub fn text(self, key: &str) -> &'a str {
        self.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    /// Any JSON number as `f64`; integer and float encodings read alike.
    pub fn number(self, key: &str) -> f64 {
        self.get(key).and_then(Value::as_f64).unwrap_or_default()
    }

    pub fn flag(self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or_default()
    }

    /// Elements of the array under `key`; anything else yields nothing.
    pub fn items(
        self,
        key: &str,
    ) -> impl DoubleEndedIterator<Item = Record<'a>> + ExactSizeIterator + 'a {
        self.get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(Record::new)
    }
}

/// Whether `value` counts as provided when it overrides another value.
///
/// `null`, `false`, `0`, and `""` count as not provided; arrays and objects
/// always count, even when empty.
pub fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
