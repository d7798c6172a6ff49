//! Field payloads, equality filters and pagination.
//!
//! [`Fields`] is the ordered field-name → JSON value mapping used both as the
//! create/update payload and as the equality-filter set. Which keys are
//! honored against a given entity is decided by the repository against
//! [`Entity::columns`](crate::traits::Entity::columns); the split itself
//! lives here so the ignore-unknown-keys policy is a plain, testable
//! function.

use serde_json::{Map, Value};

/// Default page size for list operations
pub const DEFAULT_PAGE_LIMIT: i64 = 100;

/// Skip/limit pagination window for list operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Ordered field-name → value mapping for payloads and equality filters.
///
/// Insertion order is preserved so generated SQL is deterministic; setting an
/// existing key overwrites its value in place.
///
/// ```
/// use entity_store::Fields;
/// use serde_json::json;
///
/// let data = Fields::new()
///     .set("nome", "Ana")
///     .set("idade", 34)
///     .set("extra", json!(null));
/// assert_eq!(data.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: Vec<(String, Value)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any previous value for the same name
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// The payload as a JSON object, for error context
    pub fn to_json(&self) -> Value {
        let mut map = Map::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            map.insert(name.clone(), value.clone());
        }
        Value::Object(map)
    }

    /// Split entries into those naming a registered column and the leftover
    /// unknown keys, preserving insertion order.
    pub(crate) fn partition<'a>(
        &'a self,
        columns: &[&str],
    ) -> (Vec<(&'a str, &'a Value)>, Vec<&'a str>) {
        let mut known = Vec::with_capacity(self.entries.len());
        let mut unknown = Vec::new();
        for (name, value) in &self.entries {
            if columns.contains(&name.as_str()) {
                known.push((name.as_str(), value));
            } else {
                unknown.push(name.as_str());
            }
        }
        (known, unknown)
    }
}

impl FromIterator<(String, Value)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |fields, (name, value)| fields.set(name, value))
    }
}
