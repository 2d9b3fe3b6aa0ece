//! The per-request carrier of contextual log fields.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Contextual log fields attached to a [`Context`](super::Context).
///
/// Keys are unique and iterate in sorted order, so rendering is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContextData(BTreeMap<String, Value>);

impl ContextData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert or overwrite a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Borrow the underlying field map.
    pub fn value(&self) -> &BTreeMap<String, Value> {
        &self.0
    }
}

impl<'a> IntoIterator for &'a ContextData {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Renders `k1=v1 k2=v2`; an empty carrier renders as the empty string.
impl fmt::Display for ContextData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", key, value_string(value))?;
        }
        Ok(())
    }
}

/// Render a field value the way it reads in plain text: strings unquoted,
/// null as nothing, everything else as JSON.
pub fn value_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Stringify any value, JSON first, falling back to its `Debug` form.
///
/// ```
/// assert_eq!(ctxlog::to_log_string(&vec![1, 2]), "[1,2]");
/// ```
pub fn to_log_string<T>(value: &T) -> String
where
    T: Serialize + fmt::Debug + ?Sized,
{
    serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
}

/// Convert any value into a field value, falling back to its `Debug` form.
pub fn to_field_value<T>(value: &T) -> Value
where
    T: Serialize + fmt::Debug + ?Sized,
{
    serde_json::to_value(value).unwrap_or_else(|_| Value::String(format!("{value:?}")))
}
