//! Dynamically typed values held by scratch stores and mutation payloads.
//!
//! `Value` is a closed set of JSON-compatible shapes. Reading a value as a
//! concrete type is a checked narrowing: the `as_*` accessors return `None`
//! unless the variant matches exactly, and the typed getters on
//! [`Flaggable`](crate::Flaggable) turn that `None` into the type's zero value.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ByobResult, CodecError};

/// A JSON-compatible dynamic value.
///
/// On the wire a `Value` is plain JSON: times become RFC 3339 strings,
/// durations become integer nanoseconds and bytes become integer arrays.
/// Decoding therefore never produces `Time`, `Duration` or `Bytes`; those
/// variants only exist for values set in-process.
///
/// # Examples
///
/// ```
/// use byob::Value;
///
/// let val = Value::from("hello");
/// assert_eq!(val.as_str(), Some("hello"));
/// assert_eq!(val.as_i64(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Time(DateTime<Utc>),
    Duration(Duration),
    Sequence(Vec<Value>),
    Mapping(BTreeMap<String, Value>),
}

impl Value {
    /// Converts any serializable value into its structural form.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Encode` if `data` cannot be represented as JSON.
    pub fn from_serialize<T: Serialize + ?Sized>(data: &T) -> ByobResult<Self> {
        let json = serde_json::to_value(data).map_err(|e| CodecError::encode("value", &e))?;
        Ok(Self::from(json))
    }

    /// Decodes this value into a concrete type through its JSON form.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Decode` if the JSON shape does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> ByobResult<T> {
        let json = serde_json::Value::from(self.clone());
        Ok(serde_json::from_value(json).map_err(|e| CodecError::decode("value", &e))?)
    }

    /// Round-trips a mapping through JSON so that every structured payload
    /// reaching a mutation log has the same shape it will have after
    /// transport. Any other value, including `Time`, `Duration` and `Bytes`
    /// leaves, is returned verbatim so its typed getter keeps working. A
    /// mapping that cannot be encoded (it holds a non-finite float) is also
    /// kept as is.
    #[must_use]
    pub fn normalized(self) -> Self {
        if !matches!(self, Self::Mapping(_)) {
            return self;
        }
        if !self.is_encodable() {
            debug!(kind = self.type_name(), "value.normalize.fallback");
            return self;
        }
        Self::from(serde_json::Value::from(self))
    }

    /// Returns false if the value holds a float JSON cannot represent.
    fn is_encodable(&self) -> bool {
        match self {
            Self::Float(v) => v.is_finite(),
            Self::Sequence(items) => items.iter().all(Self::is_encodable),
            Self::Mapping(map) => map.values().all(Self::is_encodable),
            _ => true,
        }
    }

    /// Returns true for `Null`.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean if this is `Bool`.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the integer if this is `Int`.
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the integer if it is stored as `Int` and fits in an `i32`.
    pub fn as_i32(&self) -> Option<i32> {
        self.as_i64().and_then(|v| i32::try_from(v).ok())
    }

    /// Returns the float if this is `Float`.
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string if this is `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the bytes if this is `Bytes`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the timestamp if this is `Time`.
    pub const fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Time(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the duration if this is `Duration`.
    pub const fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Duration(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the elements if this is `Sequence`.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the entries if this is `Mapping`.
    pub const fn as_mapping(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Mapping(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the elements if this is a sequence made only of strings.
    pub fn as_string_slice(&self) -> Option<Vec<String>> {
        self.as_sequence()?
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect()
    }

    /// Returns the entries if this is a mapping whose values are all strings.
    pub fn as_string_map(&self) -> Option<BTreeMap<String, String>> {
        self.as_mapping()?
            .iter()
            .map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect()
    }

    /// Returns a human-readable type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Time(_) => "time",
            Self::Duration(_) => "duration",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::Value::from(self.clone()))
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(v) => Self::Bool(v),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            serde_json::Value::String(v) => Self::String(v),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(v) => Self::Bool(v),
            Value::Int(v) => Self::from(v),
            Value::Float(v) => serde_json::Number::from_f64(v).map_or(Self::Null, Self::Number),
            Value::String(v) => Self::String(v),
            Value::Bytes(v) => Self::Array(v.into_iter().map(Self::from).collect()),
            Value::Time(v) => Self::String(v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Duration(v) => {
                let nanos = v.num_nanoseconds().unwrap_or(if v < Duration::zero() {
                    i64::MIN
                } else {
                    i64::MAX
                });
                Self::from(nanos)
            }
            Value::Sequence(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Mapping(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

// Convenient From implementations
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Time(v)
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Self::Duration(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Sequence(v)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Self::Sequence(v.into_iter().map(Self::String).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Self::Mapping(v)
    }
}

impl From<BTreeMap<String, String>> for Value {
    fn from(v: BTreeMap<String, String>) -> Self {
        Self::Mapping(v.into_iter().map(|(k, s)| (k, Self::String(s))).collect())
    }
}
