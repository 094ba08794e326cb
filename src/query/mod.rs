//! Query parameter mapping and URL query-string serialization.
//!
//! A [`Query`] is an ordered mapping from parameter name to [`QueryValue`].
//! [`serialize`] turns it into a string that can be appended to a URL:
//!
//! - `Null` values become flag-style parameters (`?debug`)
//! - `List` values repeat the key once per element (`?tag=a&tag=b`)
//! - `Unset` values are skipped entirely

mod encode;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

pub use encode::serialize;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Emitted as the bare key, without `=`.
    Null,
    /// Skipped during serialization.
    Unset,
    /// One `key=value` pair per element, in order.
    List(Vec<QueryValue>),
}

/// Values that have a canonical string form used in place of the value itself.
pub trait CanonicalString {
    fn canonical_string(&self) -> String;
}

impl<Tz: TimeZone> CanonicalString for DateTime<Tz> {
    /// ISO-8601 in UTC with millisecond precision, e.g. `2024-01-02T03:04:05.000Z`.
    fn canonical_string(&self) -> String {
        self.with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl QueryValue {
    /// Resolves a value through its canonical string conversion.
    pub fn canonical<T: CanonicalString + ?Sized>(value: &T) -> Self {
        QueryValue::Text(value.canonical_string())
    }

    /// Whether this value is skipped during serialization.
    pub fn is_unset(&self) -> bool {
        matches!(self, QueryValue::Unset)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        QueryValue::Text(value.clone())
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    QueryValue::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for QueryValue {
    fn from(value: usize) -> Self {
        match i64::try_from(value) {
            Ok(v) => QueryValue::Int(v),
            Err(_) => QueryValue::Text(value.to_string()),
        }
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => QueryValue::Int(v),
            Err(_) => QueryValue::Text(value.to_string()),
        }
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

/// `None` is a flag-style parameter.
impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => QueryValue::Null,
        }
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        QueryValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for QueryValue {
    fn from(value: DateTime<Tz>) -> Self {
        QueryValue::canonical(&value)
    }
}

/// Ordered query parameter mapping.
///
/// Iteration follows insertion order. Inserting a key that is already
/// present replaces its value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    entries: Vec<(String, QueryValue)>,
}

impl Query {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a parameter, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<QueryValue>,
    ) -> Option<QueryValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder-style [`Query::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of entries, including `Unset` ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serializes this mapping; see [`serialize`].
    pub fn to_query_string(&self) -> String {
        serialize(Some(self))
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        query.extend(iter);
        query
    }
}

impl<K: Into<String>, V: Into<QueryValue>> Extend<(K, V)> for Query {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
