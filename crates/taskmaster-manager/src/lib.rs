//! Business rules for TaskMaster.
//!
//! [`TaskManager`] wraps any [`TaskStore`](taskmaster_core::store::TaskStore)
//! and is the only place that decides whether a request is allowed: field
//! validation, uniqueness, the user cap, ownership of subjects and tasks, and
//! the task status state machine. Each operation runs inside one store
//! transaction, so a rejected request leaves no partial write behind.
//!
//! # Session
//!
//! The manager remembers one *active user*, set by
//! [`TaskManager::select_user`]. Every subject and task mutation is checked
//! against it. Separate managers keep separate sessions.

mod manager;
mod subjects;
mod tasks;
mod users;

pub use manager::TaskManager;

#[cfg(test)]
mod tests;
