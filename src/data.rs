// src/data.rs
//
// Row model shared by the cache, the post-processor, stats and export.
//
// - Value: one scalar cell, as JSON gives it to us.
// - Row:   ordered `column -> Value` map; one school record.
//
// Rows are keyed by registry field key once processed (see process.rs).
// Raw rows from a source may still carry backend names or labels.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

    /// Numeric reading of the cell. Text is parsed after trimming; anything
    /// else that isn't a number is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) if x.is_finite() => Some(*x),
            Value::Text(t) => t.trim().parse::<f64>().ok().filter(|x| x.is_finite()),
            _ => None,
        }
    }

    /// Rendered form used for sorting, tables and export. Null is empty.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => s!(),
            Value::Text(t) => t.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            // f64's Display already drops a trailing ".0"
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(t) => f.write_str(t),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Text(s!(s)) }
}
impl From<String> for Value {
    fn from(s: String) -> Self { Value::Text(s) }
}
impl From<i64> for Value {
    fn from(n: i64) -> Self { Value::Int(n) }
}
impl From<i32> for Value {
    fn from(n: i32) -> Self { Value::Int(n.into()) }
}
impl From<u32> for Value {
    fn from(n: u32) -> Self { Value::Int(n.into()) }
}
impl From<f64> for Value {
    fn from(x: f64) -> Self { Value::Float(x) }
}
impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

/// One school record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, Value>);

impl Row {
    pub fn new() -> Self { Self::default() }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> { self.0.get(key) }

    /// Present and not null.
    #[inline]
    pub fn has(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(|v| !v.is_null())
    }

    /// Rendered cell, empty when missing.
    pub fn text(&self, key: &str) -> String {
        self.0.get(key).map(Value::to_text).unwrap_or_default()
    }

    /// Numeric cell. Missing or non-numeric is `None`.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> { self.0.remove(key) }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> { self.0.iter() }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;
    fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

/// Build a row from literal pairs. Handy in tests and the mock source.
pub fn row<K: Into<String>, V: Into<Value>>(pairs: impl IntoIterator<Item = (K, V)>) -> Row {
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}
