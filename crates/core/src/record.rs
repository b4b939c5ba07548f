//! Records
//!
//! A `Record` is an ordered mapping from field name to `Value`. Field order
//! is kept for presentation only: equality ignores it.
//!
//! Records are plain values. Cloning produces an independent deep copy, which
//! is what the table hands out on every read.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::reference::Reference;
use crate::value::Value;

/// Name of the identity field
pub const ID_FIELD: &str = "id";

/// Name of the display label field
pub const DIS_FIELD: &str = "dis";

/// Ordered field-name → value mapping
///
/// Small records dominate, so fields live in a vector and lookups are linear.
///
/// # Example
///
/// ```
/// use brickhouse_core::{Record, Reference, Value};
///
/// let site = Record::with_id(Reference::new("site-1"))
///     .with("dis", "Main Campus")
///     .with("site", Value::Marker);
///
/// assert_eq!(site.id().map(|r| r.id()), Some("site-1"));
/// assert_eq!(site.dis(), Some("Main Campus"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Create a record whose only field is `id`
    pub fn with_id(id: Reference) -> Self {
        let mut record = Self::new();
        record.set(ID_FIELD, Value::Ref(id));
        record
    }

    /// Get a field value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Get a mutable field value
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Set a field, replacing in place if present, appending otherwise
    ///
    /// Returns the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.get_mut(&name) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    /// Builder form of [`Record::set`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Remove a field, returning its value
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let pos = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(pos).1)
    }

    /// Check whether a field is present
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Check whether a field is absent
    pub fn missing(&self, name: &str) -> bool {
        !self.has(name)
    }

    /// The record's identity
    ///
    /// `None` when there is no `id` field or it is not a reference.
    pub fn id(&self) -> Option<&Reference> {
        self.get(ID_FIELD).and_then(Value::as_reference)
    }

    /// The record's display label: the `dis` string field when non-empty
    pub fn dis(&self) -> Option<&str> {
        self.get(DIS_FIELD)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Copy every field of `other` into this record, overwriting on collision
    pub fn merge(&mut self, other: Record) {
        for (name, value) in other.fields {
            self.set(name, value);
        }
    }

    /// Iterate fields in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Iterate fields mutably in order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Value)> {
        self.fields.iter_mut().map(|(n, v)| (n.as_str(), v))
    }

    /// Field names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(n, v)| other.get(n) == Some(v))
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.set(name, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match value {
                Value::Marker => write!(f, "{}", name)?,
                _ => write!(f, "{}:{}", name, value)?,
            }
        }
        write!(f, "}}")
    }
}

// ============================================================================
// serde: records serialize as maps, field order preserved
// ============================================================================

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of field name to value")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
        let mut record = Record::new();
        while let Some((name, value)) = access.next_entry::<String, Value>()? {
            record.set(name, value);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}
