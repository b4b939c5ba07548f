//! Brickhouse - concurrent in-memory record store
//!
//! Records are ordered field maps identified by a reference-valued `id`
//! field. A table stores them, answers predicate queries over them, and can
//! label reference fields with the display names of the records they point to.
//!
//! # Quick Start
//!
//! ```
//! use brickhouse::filter::{eq, has};
//! use brickhouse::{MemoryTable, Record, Reference, Table, Value};
//!
//! let table = MemoryTable::new(true);
//! table.insert(&Record::with_id(Reference::new("site")).with("dis", "HQ"))?;
//! table.insert(
//!     &Record::with_id(Reference::new("ahu"))
//!         .with("equip", Value::Marker)
//!         .with("siteRef", Value::reference("site")),
//! )?;
//!
//! let ahu = table.read(&has("equip").and(eq("siteRef->dis", "HQ"))).unwrap();
//! let site_ref = ahu.get("siteRef").and_then(Value::as_reference).unwrap();
//! assert_eq!(site_ref.dis(), Some("HQ"));
//! # Ok::<(), brickhouse::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `brickhouse-core`: value model, records, errors, capability traits
//! - `brickhouse-storage`: the in-memory `Table` implementation
//!
//! Both are re-exported here.

pub use brickhouse_core::*;
pub use brickhouse_storage::{
    fill_dis, MemoryTable, NoopNormalizer, RejectFields, StripFields, TableBuilder, TableConfig,
};
