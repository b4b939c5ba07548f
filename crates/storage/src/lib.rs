//! Storage layer for Brickhouse
//!
//! This crate implements the in-memory table with:
//! - MemoryTable: DashMap-backed concurrent id → record map
//! - TableBuilder / TableConfig: construction and TOML configuration
//! - Display enrichment of reference fields on read
//! - Stock normalizers for store-managed fields
//!
//! # Concurrency
//!
//! - Per-id reads and writes only touch that id's shard
//! - No global lock, no cross-operation transactions
//! - Bulk scans are weakly consistent (see [`memory`])

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod config;
pub mod enrich;
pub mod memory;
pub mod normalize;

pub use builder::TableBuilder;
pub use config::TableConfig;
pub use enrich::fill_dis;
pub use memory::MemoryTable;
pub use normalize::{NoopNormalizer, RejectFields, StripFields};
