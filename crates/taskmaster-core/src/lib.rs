//! Core types and trait definitions for the TaskMaster academic task manager.
//!
//! This crate has no database or runtime dependencies. It defines the
//! entities, the rules their fields must satisfy, the domain error taxonomy
//! and the storage contract that backends implement.

pub mod error;
pub mod id;
pub mod store;
pub mod subject;
pub mod task;
pub mod user;
pub mod validate;

pub use error::{Error, ErrorCode, ErrorKind, Result};
pub use id::{SubjectId, TaskId, UserId};
