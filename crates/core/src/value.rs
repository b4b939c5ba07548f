//! Value types for Brickhouse
//!
//! This module defines:
//! - Value: tagged union of the scalar kinds a record field can hold
//! - Number: numeric scalar with an optional unit
//!
//! ## Value Model
//!
//! - Marker, Bool, Number, Str, Uri
//! - Ref: a `Reference` to another record
//! - Date, Time, DateTime
//! - Coord: geographic point
//! - List: ordered sequence of values
//!
//! ### Type Rules
//!
//! - No implicit type coercions: `Str("1") != Number(1)`, `Uri != Str`
//! - Number equality compares magnitude and unit; `NaN != NaN`
//! - Ref equality compares target ids only (labels are advisory)

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::reference::Reference;

/// Numeric scalar with an optional unit (`"kW"`, `"°F"`, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Number {
    /// Magnitude
    pub val: f64,
    /// Unit symbol, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Number {
    /// Unitless number
    pub fn new(val: f64) -> Self {
        Self { val, unit: None }
    }

    /// Number with a unit
    pub fn with_unit(val: f64, unit: impl Into<String>) -> Self {
        Self {
            val,
            unit: Some(unit.into()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.val)?;
        if let Some(unit) = &self.unit {
            write!(f, "{}", unit)?;
        }
        Ok(())
    }
}

/// A field value
///
/// Records are ordered maps from field name to `Value`. The `Ref` variant is
/// what ties records together: the table resolves it for path filters and
/// display enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Presence-only tag
    Marker,
    /// Boolean value
    Bool(bool),
    /// Number with optional unit
    Number(Number),
    /// UTF-8 string
    Str(String),
    /// URI, kept distinct from plain strings
    Uri(String),
    /// Reference to another record
    Ref(Reference),
    /// Calendar date
    Date(NaiveDate),
    /// Wall-clock time of day
    Time(NaiveTime),
    /// Timestamp with offset
    DateTime(DateTime<FixedOffset>),
    /// Geographic coordinate in decimal degrees
    Coord {
        /// Latitude
        lat: f64,
        /// Longitude
        lng: f64,
    },
    /// Ordered list of values
    List(Vec<Value>),
}

impl Value {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Marker => "Marker",
            Value::Bool(_) => "Bool",
            Value::Number(_) => "Number",
            Value::Str(_) => "Str",
            Value::Uri(_) => "Uri",
            Value::Ref(_) => "Ref",
            Value::Date(_) => "Date",
            Value::Time(_) => "Time",
            Value::DateTime(_) => "DateTime",
            Value::Coord { .. } => "Coord",
            Value::List(_) => "List",
        }
    }

    /// Shorthand for a unitless number
    pub fn num(val: f64) -> Self {
        Value::Number(Number::new(val))
    }

    /// Shorthand for a reference with no label
    pub fn reference(id: impl Into<String>) -> Self {
        Value::Ref(Reference::new(id))
    }

    /// Check if this is a marker
    pub fn is_marker(&self) -> bool {
        matches!(self, Value::Marker)
    }

    /// Check if this is a reference
    pub fn is_ref(&self) -> bool {
        matches!(self, Value::Ref(_))
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as Number if this is a Number value
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Get the magnitude if this is a Number value
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(|n| n.val)
    }

    /// Get as &str if this is a Str value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &Reference if this is a Ref value
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Value::Ref(r) => Some(r),
            _ => None,
        }
    }

    /// Get as mutable Reference if this is a Ref value
    pub fn as_reference_mut(&mut self) -> Option<&mut Reference> {
        match self {
            Value::Ref(r) => Some(r),
            _ => None,
        }
    }

    /// Get as timestamp if this is a DateTime value
    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Value::DateTime(ts) => Some(ts),
            _ => None,
        }
    }

    /// Get as &[Value] if this is a List value
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Marker => write!(f, "M"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Uri(u) => write!(f, "`{}`", u),
            Value::Ref(r) => write!(f, "{}", r),
            Value::Date(d) => write!(f, "{}", d),
            Value::Time(t) => write!(f, "{}", t),
            Value::DateTime(ts) => write!(f, "{}", ts.to_rfc3339()),
            Value::Coord { lat, lng } => write!(f, "C({},{})", lat, lng),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::num(i as f64)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::num(i as f64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::num(f)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Reference> for Value {
    fn from(r: Reference) -> Self {
        Value::Ref(r)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveTime> for Value {
    fn from(t: NaiveTime) -> Self {
        Value::Time(t)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(ts: DateTime<FixedOffset>) -> Self {
        Value::DateTime(ts)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}
