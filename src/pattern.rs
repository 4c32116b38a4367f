//! Field name to field value mappings used both as registered patterns and
//! as query subjects.

use crate::config::ValueCoercion;
use crate::error::{PatternError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

/// An order-independent mapping from field name to field value.
///
/// Fields are kept sorted by name, so two patterns built from the same pairs
/// in a different order compare, hash and serialize identically. This is the
/// identity a [`crate::Matcher`] uses to deduplicate registrations.
///
/// The empty pattern is the *root* pattern and matches every subject at the
/// lowest priority.
///
/// # Examples
///
/// ```rust
/// use pattern_recognition::Pattern;
///
/// let a = Pattern::from([("a", "0"), ("b", "1")]);
/// let b = Pattern::from([("b", "1"), ("a", "0")]);
/// assert_eq!(a, b);
///
/// assert!(Pattern::root().is_root());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pattern {
    fields: BTreeMap<String, String>,
}

impl Pattern {
    /// Create an empty pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// The root pattern, matching everything.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Value of `field`, if present.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Set `field` to `value`, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(field.into(), value.into())
    }

    /// Builder-style [`Pattern::insert`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.fields.remove(field)
    }

    /// Iterate `(field, value)` pairs in field name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build a pattern from a JSON object.
    ///
    /// String values are taken as-is. Numbers and booleans are stringified
    /// under [`ValueCoercion::Stringify`] and rejected under
    /// [`ValueCoercion::StringsOnly`]. `null`, arrays and nested objects are
    /// always rejected since patterns are single-level.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pattern_recognition::{Pattern, ValueCoercion};
    /// use serde_json::json;
    ///
    /// let pattern = Pattern::from_json(&json!({"a": 1, "b": "x*"}), ValueCoercion::Stringify)?;
    /// assert_eq!(pattern.get("a"), Some("1"));
    /// assert_eq!(pattern.get("b"), Some("x*"));
    /// # Ok::<(), pattern_recognition::PatternError>(())
    /// ```
    pub fn from_json(value: &Value, coercion: ValueCoercion) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| PatternError::NotAnObject(json_kind(value).to_string()))?;

        let mut fields = BTreeMap::new();
        for (field, value) in object {
            let text = match (value, coercion) {
                (Value::String(s), _) => s.clone(),
                (Value::Number(n), ValueCoercion::Stringify) => n.to_string(),
                (Value::Bool(b), ValueCoercion::Stringify) => b.to_string(),
                _ => {
                    return Err(PatternError::UnsupportedValue {
                        field: field.clone(),
                        kind: json_kind(value).to_string(),
                    })
                }
            };
            fields.insert(field.clone(), text);
        }

        Ok(Self { fields })
    }

    /// Convert into a JSON object with string values.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }

    /// Unwrap into the underlying sorted map.
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.fields
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (field, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}={value}")?;
        }
        f.write_str("}")
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Pattern
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Pattern
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<&Pattern> for Pattern {
    fn from(pattern: &Pattern) -> Self {
        pattern.clone()
    }
}

impl From<BTreeMap<String, String>> for Pattern {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }
}

impl<S: BuildHasher> From<HashMap<String, String, S>> for Pattern {
    fn from(fields: HashMap<String, String, S>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }
}
