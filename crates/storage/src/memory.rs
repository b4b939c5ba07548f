//! In-memory table
//!
//! `MemoryTable` keeps records in a sharded concurrent map from id to an
//! immutable, reference-counted record. Writes build a fresh record and swap
//! the handle in; nothing stored is ever mutated in place.
//!
//! # Design
//!
//! - DashMap: sharded, per-shard locking, concurrent reads
//! - FxHash: fast non-crypto hash for string ids
//! - `Arc<Record>` values: resolvers hand out live handles without copying,
//!   and no map lock is held while user code (filters, sinks) runs
//!
//! # Consistency
//!
//! Per-id operations are atomic: a reader sees either the old or the new
//! record for an id, never a mix.
//!
//! Bulk scans (`read`, `read_all*`, `count`, `delete_all`) are NOT
//! snapshot-isolated. A scan enumerates the ids present when it starts and
//! looks each one up again when it gets to it:
//! - records deleted in the meantime are skipped
//! - records updated in the meantime are seen in their newest form
//! - records inserted after the scan started are not visited
//!
//! No iteration order is promised. Each record is visited at most once.
//!
//! # Cost
//!
//! Every scan first copies the full id list, one allocation per stored id,
//! even when it stops early. `read` therefore costs O(n) allocation before
//! its first match; use `read_by_id` when the id is known. The id list is
//! what lets filters and sinks run with no shard lock held.
//!
//! The table is volatile: its contents are lost when it is dropped.

use dashmap::DashMap;
use rustc_hash::FxHasher;
use std::fmt;
use std::hash::BuildHasherDefault;
use std::sync::Arc;
use tracing::{debug, trace};

use brickhouse_core::{
    Error, Filter, Normalizer, Record, Resolver, Result, ScanCancelled, ScanResult, Table,
    TableListener,
};

use crate::builder::TableBuilder;
use crate::enrich::fill_dis;
use crate::normalize::NoopNormalizer;

type RecordMap = DashMap<String, Arc<Record>, BuildHasherDefault<FxHasher>>;

/// Concurrent in-memory record table
///
/// # Example
///
/// ```
/// use brickhouse_storage::MemoryTable;
/// use brickhouse_core::{Record, Reference, Table};
///
/// let table = MemoryTable::new(true);
/// table.insert(&Record::with_id(Reference::new("a")).with("dis", "Alpha")).unwrap();
/// assert_eq!(table.read_by_id("a").unwrap().dis(), Some("Alpha"));
/// ```
pub struct MemoryTable {
    data: RecordMap,
    fill_dis: bool,
    normalizer: Arc<dyn Normalizer>,
}

impl MemoryTable {
    /// Create an empty table
    ///
    /// `fill_dis` sets whether reads enrich display labels by default.
    pub fn new(fill_dis: bool) -> Self {
        Self::from_parts(RecordMap::default(), fill_dis, Arc::new(NoopNormalizer))
    }

    /// Start configuring a table
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    pub(crate) fn from_parts(
        data: RecordMap,
        fill_dis: bool,
        normalizer: Arc<dyn Normalizer>,
    ) -> Self {
        debug!(target: "brickhouse::table", fill_dis, "Table created");
        Self {
            data,
            fill_dis,
            normalizer,
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the table holds no records
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if a record is stored under `id`
    pub fn contains(&self, id: &str) -> bool {
        self.data.contains_key(id)
    }

    /// Validate, copy and normalize a record for storage
    ///
    /// Returns the storage key and the record to store.
    fn prepare(&self, record: &Record) -> Result<(String, Arc<Record>)> {
        let id = record.id().ok_or(Error::MissingId)?.id().to_string();
        let mut copy = record.clone();
        self.normalizer.normalize(&mut copy)?;
        match copy.id() {
            Some(r) if r.id() == id => Ok((id, Arc::new(copy))),
            other => Err(Error::IdChanged {
                actual: other.map(|r| r.id().to_string()).unwrap_or_default(),
                expected: id,
            }),
        }
    }

    /// Caller-owned copy of a stored record
    fn materialize(&self, stored: &Record, fill: bool) -> Record {
        let mut copy = stored.clone();
        if fill {
            fill_dis(&mut copy, self);
        }
        copy
    }

    /// Visit every record that matches `filter`
    ///
    /// Stops when `visit` returns `Err(ScanCancelled)`. No map lock is held
    /// while the filter or `visit` runs.
    fn scan<F>(&self, filter: &dyn Filter, mut visit: F)
    where
        F: FnMut(&str, &Arc<Record>) -> ScanResult,
    {
        let ids: Vec<String> = self.data.iter().map(|entry| entry.key().clone()).collect();
        for id in &ids {
            // removed since the scan started
            let Some(stored) = self.find(id) else {
                continue;
            };
            if !filter.include(&stored, self) {
                continue;
            }
            if let Err(ScanCancelled) = visit(id, &stored) {
                trace!(target: "brickhouse::table", at = %id, "Scan cancelled");
                return;
            }
        }
    }
}

impl Default for MemoryTable {
    fn default() -> Self {
        Self::new(false)
    }
}

impl fmt::Debug for MemoryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTable")
            .field("len", &self.len())
            .field("fill_dis", &self.fill_dis)
            .finish()
    }
}

impl Resolver for MemoryTable {
    fn find(&self, id: &str) -> Option<Arc<Record>> {
        self.data.get(id).map(|entry| Arc::clone(entry.value()))
    }
}

impl Table for MemoryTable {
    fn fills_dis(&self) -> bool {
        self.fill_dis
    }

    fn read_with(&self, filter: &dyn Filter, fill: bool) -> Option<Record> {
        let mut first = None;
        self.scan(filter, |_, stored| {
            first = Some(Arc::clone(stored));
            Err(ScanCancelled)
        });
        first.map(|stored| self.materialize(&stored, fill))
    }

    fn read_by_id_with(&self, id: &str, fill: bool) -> Option<Record> {
        let stored = self.find(id)?;
        Some(self.materialize(&stored, fill))
    }

    fn read_all_into_with(
        &self,
        filter: &dyn Filter,
        sink: &mut dyn FnMut(Record) -> ScanResult,
        fill: bool,
    ) {
        self.scan(filter, |_, stored| sink(self.materialize(stored, fill)));
    }

    fn count(&self, filter: &dyn Filter) -> usize {
        let mut count = 0;
        self.scan(filter, |_, _| {
            count += 1;
            Ok(())
        });
        count
    }

    fn insert(&self, record: &Record) -> Result<()> {
        let (id, stored) = self.prepare(record)?;
        debug!(target: "brickhouse::table", id = %id, "Record inserted");
        self.data.insert(id, stored);
        Ok(())
    }

    fn update_by_id(&self, record: &Record) -> Result<usize> {
        let id = record.id().ok_or(Error::MissingId)?.id();
        if !self.data.contains_key(id) {
            return Ok(0);
        }
        let (id, stored) = self.prepare(record)?;
        // the record may have been deleted since the check above
        let rows = match self.data.get_mut(&id) {
            Some(mut slot) => {
                *slot = stored;
                1
            }
            None => 0,
        };
        debug!(target: "brickhouse::table", id = %id, rows, "Record updated");
        Ok(rows)
    }

    fn delete_by_id(&self, id: &str) -> usize {
        let rows = usize::from(self.data.remove(id).is_some());
        debug!(target: "brickhouse::table", id = %id, rows, "Record deleted");
        rows
    }

    fn delete_all(&self, filter: &dyn Filter) -> usize {
        let mut removed = 0;
        self.scan(filter, |id, judged| {
            // only remove the exact record the filter saw
            if self
                .data
                .remove_if(id, |_, current| Arc::ptr_eq(current, judged))
                .is_some()
            {
                removed += 1;
            }
            Ok(())
        });
        debug!(target: "brickhouse::table", removed, "Bulk delete");
        removed
    }

    fn include(&self, record: &Record, filter: &dyn Filter) -> bool {
        filter.include(record, self)
    }

    fn close(&self) {
        trace!(target: "brickhouse::table", "Close requested; nothing to release");
    }

    fn add_listener(&self, _listener: Arc<dyn TableListener>) {
        trace!(target: "brickhouse::table", "Listener ignored; in-memory table emits no events");
    }

    fn remove_listener(&self, _listener: &Arc<dyn TableListener>) {
        trace!(target: "brickhouse::table", "Listener removal ignored");
    }
}
