//! Stock normalizers
//!
//! The table runs its normalizer on a private copy of every record it is
//! about to store. Which fields a store manages is deployment policy, so the
//! hook is pluggable; these are the common shapes:
//!
//! - `NoopNormalizer`: store records as given (default)
//! - `StripFields`: silently drop managed fields
//! - `RejectFields`: refuse records that set managed fields

use std::collections::BTreeSet;

use brickhouse_core::{Error, Normalizer, Record, Result, Value, ID_FIELD};

/// Stores records unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNormalizer;

impl Normalizer for NoopNormalizer {
    fn normalize(&self, _record: &mut Record) -> Result<()> {
        Ok(())
    }
}

/// Drops managed fields and the advisory label on the stored `id`
///
/// `id` itself is never stripped, even if listed.
#[derive(Debug, Clone, Default)]
pub struct StripFields {
    fields: BTreeSet<String>,
}

impl StripFields {
    /// Strip the given field names
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(Into::into)
                .filter(|f| f != ID_FIELD)
                .collect(),
        }
    }
}

impl Normalizer for StripFields {
    fn normalize(&self, record: &mut Record) -> Result<()> {
        for field in &self.fields {
            record.remove(field);
        }
        if let Some(id) = record.get_mut(ID_FIELD).and_then(Value::as_reference_mut) {
            if id.dis().is_some() {
                *id = id.without_dis();
            }
        }
        Ok(())
    }
}

/// Refuses records that set any managed field
#[derive(Debug, Clone, Default)]
pub struct RejectFields {
    fields: BTreeSet<String>,
}

impl RejectFields {
    /// Reject records carrying any of the given field names
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(Into::into)
                .filter(|f| f != ID_FIELD)
                .collect(),
        }
    }
}

impl Normalizer for RejectFields {
    fn normalize(&self, record: &mut Record) -> Result<()> {
        match self.fields.iter().find(|f| record.has(f)) {
            Some(field) => Err(Error::rejected(format!(
                "field '{}' is managed by the store",
                field
            ))),
            None => Ok(()),
        }
    }
}
