//! Table builder for fluent configuration

use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

use brickhouse_core::{Normalizer, Result};

use crate::config::TableConfig;
use crate::memory::MemoryTable;
use crate::normalize::{NoopNormalizer, StripFields};

/// Builder for `MemoryTable`
///
/// ```
/// use brickhouse_storage::{MemoryTable, StripFields};
///
/// let table = MemoryTable::builder()
///     .fill_dis(true)
///     .initial_capacity(1024)
///     .normalizer(StripFields::new(["mod"]))
///     .build()
///     .unwrap();
/// assert!(table.is_empty());
/// ```
///
/// An explicit `normalizer` takes precedence over `strip_fields` in the
/// config.
#[derive(Clone, Default)]
pub struct TableBuilder {
    config: TableConfig,
    normalizer: Option<Arc<dyn Normalizer>>,
}

impl TableBuilder {
    /// Create new builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Enrich display labels on read by default
    pub fn fill_dis(mut self, fill_dis: bool) -> Self {
        self.config.fill_dis = fill_dis;
        self
    }

    /// Pre-size the map for `capacity` records
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = Some(capacity);
        self
    }

    /// Number of map shards (power of two, greater than one)
    pub fn shard_amount(mut self, shards: usize) -> Self {
        self.config.shard_amount = Some(shards);
        self
    }

    /// Cleanup hook run on every record before it is stored
    pub fn normalizer(mut self, normalizer: impl Normalizer + 'static) -> Self {
        self.normalizer = Some(Arc::new(normalizer));
        self
    }

    /// Build the table
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration fails validation.
    pub fn build(self) -> Result<MemoryTable> {
        self.config.validate()?;
        let capacity = self.config.initial_capacity.unwrap_or(0);
        let data = match self.config.shard_amount {
            Some(shards) => DashMap::with_capacity_and_hasher_and_shard_amount(
                capacity,
                Default::default(),
                shards,
            ),
            None => DashMap::with_capacity_and_hasher(capacity, Default::default()),
        };
        let normalizer: Arc<dyn Normalizer> = match self.normalizer {
            Some(normalizer) => normalizer,
            None if !self.config.strip_fields.is_empty() => {
                Arc::new(StripFields::new(self.config.strip_fields.iter().cloned()))
            }
            None => Arc::new(NoopNormalizer),
        };
        Ok(MemoryTable::from_parts(data, self.config.fill_dis, normalizer))
    }
}

impl fmt::Debug for TableBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableBuilder")
            .field("config", &self.config)
            .field("custom_normalizer", &self.normalizer.is_some())
            .finish()
    }
}
