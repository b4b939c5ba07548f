//! Core types and traits for Brickhouse
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: tagged union of field scalars
//! - Reference: record identifier with an advisory display label
//! - Record: ordered field-name → value mapping with an `id` identity
//! - Error: error type hierarchy
//! - Traits: capability seams (Table, Resolver, Filter, TableListener, Normalizer)
//! - Filter expressions: programmatic predicates over records

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod error;
pub mod filter;
pub mod record;
pub mod reference;
pub mod traits;
pub mod value;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use record::{Record, DIS_FIELD, ID_FIELD};
pub use reference::Reference;
pub use traits::{
    Filter, Normalizer, Resolver, ScanCancelled, ScanResult, Table, TableListener,
};
pub use value::{Number, Value};
