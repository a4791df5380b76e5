//! SQLite backend for the TaskMaster store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Each [`TaskStore::transaction`] call
//! becomes one SQLite transaction on that thread.
//!
//! [`TaskStore::transaction`]: taskmaster_core::store::TaskStore::transaction

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
