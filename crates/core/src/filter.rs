//! Programmatic filters
//!
//! A small expression tree implementing [`Filter`]. There is no textual
//! grammar here: expressions are built in code.
//!
//! ```
//! use brickhouse_core::filter::{eq, has, Path};
//!
//! // equip records on a site whose name is "Main Campus"
//! let _f = has("equip").and(eq("siteRef->dis", "Main Campus"));
//! assert_eq!(Path::parse("siteRef->dis").depth(), 2);
//! ```
//!
//! ## Paths
//!
//! A path is a `->`-separated list of field names. Every hop but the last
//! must hold a reference; it is followed with one `Resolver::find`. A hop
//! that is missing, not a reference, or dangling ends the path: `has` and
//! comparisons are then false, `missing` is true.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use crate::record::Record;
use crate::traits::{Filter, Resolver};
use crate::value::Value;

/// Field path, possibly crossing references
///
/// Always names at least one field: `hops` are the reference fields
/// followed in order, `field` is read from the last record reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    hops: Vec<String>,
    field: String,
}

impl Path {
    /// Parse `a->b->c`
    pub fn parse(path: &str) -> Self {
        let mut hops: Vec<String> = path.split("->").map(|s| s.trim().to_string()).collect();
        // split always yields at least one segment
        let field = hops.pop().unwrap_or_default();
        Path { hops, field }
    }

    /// Number of fields named, including the final one
    pub fn depth(&self) -> usize {
        self.hops.len() + 1
    }

    /// Value at the end of the path, following references through `resolver`
    pub fn resolve(&self, record: &Record, resolver: &dyn Resolver) -> Option<Value> {
        let mut current: Option<Arc<Record>> = None;
        for hop in &self.hops {
            let at = current.as_deref().unwrap_or(record);
            let target = at.get(hop)?.as_reference()?.id().to_string();
            current = Some(resolver.find(&target)?);
        }
        current.as_deref().unwrap_or(record).get(&self.field).cloned()
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        Path::parse(path)
    }
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

/// Filter expression
#[derive(Debug, Clone)]
pub enum Expr {
    /// Matches everything
    All,
    /// Path resolves to a value
    Has(Path),
    /// Path does not resolve
    Missing(Path),
    /// Path resolves to a value comparing as requested
    Cmp(Path, CmpOp, Value),
    /// Record id is one of the given ids
    IdIn(HashSet<String>),
    /// Both match
    And(Box<Expr>, Box<Expr>),
    /// Either matches
    Or(Box<Expr>, Box<Expr>),
    /// Negation
    Not(Box<Expr>),
}

impl Expr {
    /// `self and other`
    pub fn and(self, other: Expr) -> Expr {
        Expr::And(Box::new(self), Box::new(other))
    }

    /// `self or other`
    pub fn or(self, other: Expr) -> Expr {
        Expr::Or(Box::new(self), Box::new(other))
    }

    fn eval(&self, record: &Record, resolver: &dyn Resolver) -> bool {
        match self {
            Expr::All => true,
            Expr::Has(path) => path.resolve(record, resolver).is_some(),
            Expr::Missing(path) => path.resolve(record, resolver).is_none(),
            Expr::Cmp(path, op, expected) => path
                .resolve(record, resolver)
                .is_some_and(|actual| compare(&actual, *op, expected)),
            Expr::IdIn(ids) => record.id().is_some_and(|r| ids.contains(r.id())),
            Expr::And(a, b) => a.eval(record, resolver) && b.eval(record, resolver),
            Expr::Or(a, b) => a.eval(record, resolver) || b.eval(record, resolver),
            Expr::Not(e) => !e.eval(record, resolver),
        }
    }
}

impl Filter for Expr {
    fn include(&self, record: &Record, resolver: &dyn Resolver) -> bool {
        self.eval(record, resolver)
    }
}

/// Ordering between values of the same kind; `None` across kinds or units
fn order(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) if x.unit == y.unit => x.val.partial_cmp(&y.val),
        (Value::Str(x), Value::Str(y)) => Some(x.cmp(y)),
        (Value::Uri(x), Value::Uri(y)) => Some(x.cmp(y)),
        (Value::Ref(x), Value::Ref(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Date(x), Value::Date(y)) => Some(x.cmp(y)),
        (Value::Time(x), Value::Time(y)) => Some(x.cmp(y)),
        (Value::DateTime(x), Value::DateTime(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn compare(actual: &Value, op: CmpOp, expected: &Value) -> bool {
    match op {
        CmpOp::Eq => actual == expected,
        CmpOp::Ne => actual != expected,
        CmpOp::Lt => order(actual, expected) == Some(Ordering::Less),
        CmpOp::Le => matches!(
            order(actual, expected),
            Some(Ordering::Less | Ordering::Equal)
        ),
        CmpOp::Gt => order(actual, expected) == Some(Ordering::Greater),
        CmpOp::Ge => matches!(
            order(actual, expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
    }
}

/// Matches every record
pub fn all() -> Expr {
    Expr::All
}

/// Path resolves to a value
pub fn has(path: impl Into<Path>) -> Expr {
    Expr::Has(path.into())
}

/// Path does not resolve
pub fn missing(path: impl Into<Path>) -> Expr {
    Expr::Missing(path.into())
}

/// Path value equals `value`
pub fn eq(path: impl Into<Path>, value: impl Into<Value>) -> Expr {
    Expr::Cmp(path.into(), CmpOp::Eq, value.into())
}

/// Path value is present and differs from `value`
pub fn ne(path: impl Into<Path>, value: impl Into<Value>) -> Expr {
    Expr::Cmp(path.into(), CmpOp::Ne, value.into())
}

/// Path value is less than `value`
pub fn lt(path: impl Into<Path>, value: impl Into<Value>) -> Expr {
    Expr::Cmp(path.into(), CmpOp::Lt, value.into())
}

/// Path value is at most `value`
pub fn le(path: impl Into<Path>, value: impl Into<Value>) -> Expr {
    Expr::Cmp(path.into(), CmpOp::Le, value.into())
}

/// Path value is greater than `value`
pub fn gt(path: impl Into<Path>, value: impl Into<Value>) -> Expr {
    Expr::Cmp(path.into(), CmpOp::Gt, value.into())
}

/// Path value is at least `value`
pub fn ge(path: impl Into<Path>, value: impl Into<Value>) -> Expr {
    Expr::Cmp(path.into(), CmpOp::Ge, value.into())
}

/// Record id is one of `ids`
pub fn id_in<I, S>(ids: I) -> Expr
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Expr::IdIn(ids.into_iter().map(Into::into).collect())
}

/// Negation
pub fn not(expr: Expr) -> Expr {
    Expr::Not(Box::new(expr))
}
