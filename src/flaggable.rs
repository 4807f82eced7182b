//! Scoped key/value scratch store.
//!
//! Every scope a mutation can target (context, session, user) embeds a
//! `Flaggable`. Typed getters never fail: a missing key and a key holding a
//! value of another type both read as the type's zero value. Use
//! [`Flaggable::get`] or [`Flaggable::present`] to tell them apart.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// String-keyed store of dynamic values.
///
/// The backing map is allocated lazily: a default `Flaggable` holds no map
/// (serialized as `"data": null`) until the first write or [`clear`](Self::clear).
///
/// # Examples
///
/// ```
/// use byob::Flaggable;
///
/// let mut store = Flaggable::default();
/// store.set("count", 3i64);
///
/// assert_eq!(store.get_int64("count"), 3);
/// assert_eq!(store.get_string("count"), "");
/// assert!(!store.present("missing"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flaggable {
    #[serde(rename = "data", default)]
    data: Option<HashMap<String, Value>>,
}

impl Flaggable {
    /// Creates a store backed by the given map.
    #[must_use]
    pub fn new(data: HashMap<String, Value>) -> Self {
        Self { data: Some(data) }
    }

    /// Returns the backing map, or `None` if it was never allocated.
    #[must_use]
    pub const fn data(&self) -> Option<&HashMap<String, Value>> {
        self.data.as_ref()
    }

    /// Replaces the backing map.
    pub fn set_data(&mut self, data: HashMap<String, Value>) {
        self.data = Some(data);
    }

    /// Inserts or overwrites `key`, allocating the map if needed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
    }

    /// Returns the value stored under `key`, if any.
    ///
    /// Never allocates the backing map, so reading an unallocated store
    /// leaves it serializing as `"data": null`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.as_ref()?.get(key)
    }

    /// Returns true if `key` is stored, whatever its value.
    #[must_use]
    pub fn present(&self, key: &str) -> bool {
        self.data.as_ref().is_some_and(|d| d.contains_key(key))
    }

    /// Removes `key`. Absent keys are ignored.
    ///
    /// Deleting from an unallocated store leaves the map unallocated, so a
    /// store that only ever saw deletes still serializes as `"data": null`
    /// rather than `{}`.
    pub fn delete(&mut self, key: &str) {
        if let Some(data) = self.data.as_mut() {
            data.remove(key);
        }
    }

    /// Discards every entry by swapping in a fresh, empty map.
    pub fn clear(&mut self) {
        self.data = Some(HashMap::new());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, HashMap::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_as<T: Default>(&self, key: &str, narrow: impl FnOnce(&Value) -> Option<T>) -> T {
        self.get(key).and_then(narrow).unwrap_or_default()
    }

    /// Returns the value associated with the key as a string.
    #[must_use]
    pub fn get_string(&self, key: &str) -> String {
        self.get_as(key, |v| v.as_str().map(str::to_string))
    }

    /// Returns the value associated with the key as a boolean.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> bool {
        self.get_as(key, Value::as_bool)
    }

    /// Returns the value associated with the key as an `i32`.
    ///
    /// Integers outside the `i32` range read as zero.
    #[must_use]
    pub fn get_int(&self, key: &str) -> i32 {
        self.get_as(key, Value::as_i32)
    }

    /// Returns the value associated with the key as an `i64`.
    #[must_use]
    pub fn get_int64(&self, key: &str) -> i64 {
        self.get_as(key, Value::as_i64)
    }

    /// Returns the value associated with the key as an `f64`.
    #[must_use]
    pub fn get_float64(&self, key: &str) -> f64 {
        self.get_as(key, Value::as_f64)
    }

    /// Returns the value associated with the key as a timestamp.
    ///
    /// The zero value is the Unix epoch.
    #[must_use]
    pub fn get_time(&self, key: &str) -> DateTime<Utc> {
        self.get(key)
            .and_then(Value::as_time)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Returns the value associated with the key as a duration.
    #[must_use]
    pub fn get_duration(&self, key: &str) -> Duration {
        self.get(key)
            .and_then(Value::as_duration)
            .unwrap_or_else(Duration::zero)
    }

    /// Returns the value associated with the key as a list of strings.
    #[must_use]
    pub fn get_string_slice(&self, key: &str) -> Vec<String> {
        self.get_as(key, Value::as_string_slice)
    }

    /// Returns the value associated with the key as a map of values.
    #[must_use]
    pub fn get_string_map(&self, key: &str) -> BTreeMap<String, Value> {
        self.get_as(key, |v| v.as_mapping().cloned())
    }

    /// Returns the value associated with the key as a map of strings.
    #[must_use]
    pub fn get_string_map_of_string(&self, key: &str) -> BTreeMap<String, String> {
        self.get_as(key, Value::as_string_map)
    }
}
