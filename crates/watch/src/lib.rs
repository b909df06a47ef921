//! Watch registry: which chat targets (groups or users) have deleted-message
//! reporting enabled, and where their recalled messages get forwarded.
//!
//! The registry is a single flat table behind the [`store::WatchStore`]
//! trait, with an in-memory implementation for tests and a SQLite
//! implementation for persistent hosts.

pub mod error;
pub mod store;
pub mod store_memory;
pub mod store_sqlite;
pub mod types;

pub use {
    error::{Error, Result},
    store::WatchStore,
    types::{WatchPatch, WatchRecord, WatchRecordCreate},
};
