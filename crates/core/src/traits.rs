//! Core traits for the table and its collaborators
//!
//! This module defines the capability seams of the system:
//! - `Resolver`: read-only lookup by id, handed to filters during a scan
//! - `Filter`: opaque inclusion predicate
//! - `Table`: the record store contract
//! - `TableListener`: change-notification hook
//! - `Normalizer`: cleanup applied to records before they are stored
//!
//! Implementations are swappable: the in-memory table is one `Table`, and a
//! persistent one would sit behind the same interface.

use std::sync::Arc;

use crate::error::Result;
use crate::record::Record;
use crate::reference::Reference;

/// Signal raised by a scan sink to stop the scan early
///
/// Returned as `Err(ScanCancelled)` from a sink callback. The scan consumes
/// it at its boundary and returns normally; callers of the scan never see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanCancelled;

/// What a sink returns for each delivered record
pub type ScanResult = std::result::Result<(), ScanCancelled>;

/// Read-only lookup of live records by id
///
/// Filters use it to follow references while deciding inclusion. It never
/// traverses beyond a direct lookup: multi-hop paths call `find` once per hop.
/// There is deliberately no way to mutate through a resolver.
pub trait Resolver {
    /// Current stored record for `id`, or `None` if absent
    ///
    /// The returned handle points at the stored record itself, not a copy.
    /// Stored records are immutable; a later write replaces the handle in
    /// the table rather than changing this one.
    fn find(&self, id: &str) -> Option<Arc<Record>>;
}

/// Inclusion predicate over records
///
/// The table only calls `include`; it does not know how a filter decides.
/// Any `Fn(&Record, &dyn Resolver) -> bool` closure is a filter.
pub trait Filter {
    /// Whether `record` matches
    fn include(&self, record: &Record, resolver: &dyn Resolver) -> bool;
}

impl<F> Filter for F
where
    F: Fn(&Record, &dyn Resolver) -> bool,
{
    fn include(&self, record: &Record, resolver: &dyn Resolver) -> bool {
        self(record, resolver)
    }
}

/// Change-notification hook
///
/// Tables accept listeners through `add_listener`/`remove_listener`. Whether
/// events are delivered is up to the implementation: the in-memory table
/// delivers none.
pub trait TableListener: Send + Sync {
    /// A record was inserted or replaced
    fn on_insert(&self, _record: &Record) {}

    /// A record was updated in place
    fn on_update(&self, _record: &Record) {}

    /// A record was removed
    fn on_delete(&self, _id: &str) {}
}

/// Cleanup applied to a private copy of a record before it is stored
///
/// Normalizers strip or reject fields the store manages itself. They must not
/// change the record's `id`; tables refuse records whose id was altered.
pub trait Normalizer: Send + Sync {
    /// Normalize `record` in place, or reject it
    fn normalize(&self, record: &mut Record) -> Result<()>;
}

impl<F> Normalizer for F
where
    F: Fn(&mut Record) -> Result<()> + Send + Sync,
{
    fn normalize(&self, record: &mut Record) -> Result<()> {
        self(record)
    }
}

/// Record store contract
///
/// Every record handed out is an independent copy: mutating it never affects
/// the stored record or any other copy.
///
/// Reads come in two forms. The `*_with` methods take an explicit `fill_dis`
/// flag controlling display enrichment; the plain methods use the table's
/// configured default ([`Table::fills_dis`]).
///
/// # Thread Safety
///
/// All methods must be safe to call concurrently from multiple threads.
/// Per-id mutations are atomic; bulk scans are not snapshot-isolated.
pub trait Table: Resolver + Send + Sync {
    /// Whether reads enrich display labels when the caller does not say
    fn fills_dis(&self) -> bool;

    /// First record matching `filter`, or `None`
    ///
    /// "First" is whatever the scan reaches first; no order is promised.
    fn read_with(&self, filter: &dyn Filter, fill_dis: bool) -> Option<Record>;

    /// [`Table::read_with`] using the default enrichment
    fn read(&self, filter: &dyn Filter) -> Option<Record> {
        self.read_with(filter, self.fills_dis())
    }

    /// Copy of the record stored under `id`, or `None`
    fn read_by_id_with(&self, id: &str, fill_dis: bool) -> Option<Record>;

    /// [`Table::read_by_id_with`] using the default enrichment
    fn read_by_id(&self, id: &str) -> Option<Record> {
        self.read_by_id_with(id, self.fills_dis())
    }

    /// [`Table::read_by_id`] keyed by a reference
    fn read_by_ref(&self, id: &Reference) -> Option<Record> {
        self.read_by_id(id.id())
    }

    /// Deliver a copy of every matching record to `sink`
    ///
    /// The sink stops the scan by returning `Err(ScanCancelled)`. The scan
    /// then returns normally; records already delivered stay delivered.
    fn read_all_into_with(
        &self,
        filter: &dyn Filter,
        sink: &mut dyn FnMut(Record) -> ScanResult,
        fill_dis: bool,
    );

    /// [`Table::read_all_into_with`] using the default enrichment
    fn read_all_into(&self, filter: &dyn Filter, sink: &mut dyn FnMut(Record) -> ScanResult) {
        self.read_all_into_with(filter, sink, self.fills_dis())
    }

    /// Copies of every matching record
    fn read_all_with(&self, filter: &dyn Filter, fill_dis: bool) -> Vec<Record> {
        let mut matches = Vec::new();
        self.read_all_into_with(
            filter,
            &mut |record| {
                matches.push(record);
                Ok(())
            },
            fill_dis,
        );
        matches
    }

    /// [`Table::read_all_with`] using the default enrichment
    fn read_all(&self, filter: &dyn Filter) -> Vec<Record> {
        self.read_all_with(filter, self.fills_dis())
    }

    /// Number of matching records
    fn count(&self, filter: &dyn Filter) -> usize;

    /// Store a copy of `record` under its id, replacing any previous record
    ///
    /// # Errors
    ///
    /// - `MissingId` if the record has no reference-valued `id` field
    /// - whatever the table's normalizer rejects the record with
    fn insert(&self, record: &Record) -> Result<()>;

    /// Insert each record in order
    ///
    /// Not atomic: on failure, records before the failing one stay inserted.
    fn batch_insert(&self, records: &[Record]) -> Result<()> {
        for record in records {
            self.insert(record)?;
        }
        Ok(())
    }

    /// Replace the record stored under `record`'s id
    ///
    /// Returns the number of rows affected: 1, or 0 if no record had that id.
    /// Never creates a record.
    ///
    /// # Errors
    ///
    /// Same as [`Table::insert`].
    fn update_by_id(&self, record: &Record) -> Result<usize>;

    /// Remove the record stored under `id`; returns 1 if removed, 0 if absent
    fn delete_by_id(&self, id: &str) -> usize;

    /// [`Table::delete_by_id`] keyed by a reference
    fn delete_by_ref(&self, id: &Reference) -> usize {
        self.delete_by_id(id.id())
    }

    /// Remove every matching record; returns how many were removed
    fn delete_all(&self, filter: &dyn Filter) -> usize;

    /// Evaluate `filter` against any record, resolving through this table
    ///
    /// The record need not be stored, nor carry a valid id.
    fn include(&self, record: &Record, filter: &dyn Filter) -> bool;

    /// Release resources held by the table
    fn close(&self);

    /// Subscribe to change notifications
    fn add_listener(&self, listener: Arc<dyn TableListener>);

    /// Unsubscribe from change notifications
    fn remove_listener(&self, listener: &Arc<dyn TableListener>);
}
