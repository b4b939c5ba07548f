//! Reference values
//!
//! A `Reference` names another record by id. It may carry a display label
//! (`dis`) copied from the referent at read time. The label is a cached hint:
//! it never takes part in equality, hashing or ordering.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A record identifier with an optional cached display label
///
/// ## Identity
///
/// Two references are equal when their ids are equal, whatever their labels:
///
/// ```
/// use brickhouse_core::Reference;
///
/// let plain = Reference::new("site-1");
/// let labelled = Reference::with_dis("site-1", "Main Campus");
/// assert_eq!(plain, labelled);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dis: Option<String>,
}

impl Reference {
    /// Create a reference with no display label
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dis: None,
        }
    }

    /// Create a reference carrying a display label
    pub fn with_dis(id: impl Into<String>, dis: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dis: Some(dis.into()),
        }
    }

    /// Create a reference to a fresh random id
    pub fn generate() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    /// The target record id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The cached display label, if any
    pub fn dis(&self) -> Option<&str> {
        self.dis.as_deref()
    }

    /// Same target, label replaced
    pub fn relabel(&self, dis: impl Into<String>) -> Self {
        Self::with_dis(self.id.clone(), dis)
    }

    /// Same target, label dropped
    pub fn without_dis(&self) -> Self {
        Self::new(self.id.clone())
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Reference {}

impl Hash for Reference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Reference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Reference {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.id)?;
        if let Some(dis) = &self.dis {
            write!(f, " \"{}\"", dis)?;
        }
        Ok(())
    }
}

impl From<&str> for Reference {
    fn from(id: &str) -> Self {
        Reference::new(id)
    }
}

impl From<String> for Reference {
    fn from(id: String) -> Self {
        Reference::new(id)
    }
}
