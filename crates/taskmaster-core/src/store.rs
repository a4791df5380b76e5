//! The `TaskStore` trait and the per-transaction `Transaction` handle.
//!
//! The trait is implemented by storage backends (e.g.
//! `taskmaster-store-sqlite`). The business layer (`taskmaster-manager`)
//! depends on this abstraction, not on any concrete backend.
//!
//! All reads and writes happen inside [`TaskStore::transaction`]: the backend
//! opens a transaction, hands the closure a [`Transaction`], commits if the
//! closure returns `Ok`, and rolls back otherwise. No handle escapes the call.

use std::future::Future;

use crate::{
  Result,
  id::{SubjectId, TaskId, UserId},
  subject::{NewSubject, Subject},
  task::{NewTask, Task, TaskStatus},
  user::{NewUser, User},
};

// ─── Transaction ─────────────────────────────────────────────────────────────

/// Synchronous CRUD access to the three tables, valid for one transaction.
///
/// Backends report uniqueness violations as
/// [`Error::Constraint`](crate::Error::Constraint) and every other failure as
/// [`Error::Store`](crate::Error::Store).
pub trait Transaction {
  // ── Users ─────────────────────────────────────────────────────────────

  fn count_users(&mut self) -> Result<usize>;

  /// Persist a user and return it with its generated id.
  fn add_user(&mut self, input: NewUser) -> Result<User>;

  fn get_user(&mut self, id: UserId) -> Result<Option<User>>;

  /// Exact match on the stored (already lowercase) email.
  fn find_user_by_email(&mut self, email: &str) -> Result<Option<User>>;

  /// All users in insertion order.
  fn list_users(&mut self) -> Result<Vec<User>>;

  fn update_user(&mut self, user: &User) -> Result<()>;

  fn remove_user(&mut self, id: UserId) -> Result<()>;

  // ── Subjects ──────────────────────────────────────────────────────────

  /// Number of subjects owned by `owner`.
  fn count_subjects(&mut self, owner: UserId) -> Result<usize>;

  fn add_subject(&mut self, input: NewSubject) -> Result<Subject>;

  fn get_subject(&mut self, id: SubjectId) -> Result<Option<Subject>>;

  /// Exact match on `(owner, name)`.
  fn find_subject_by_name(
    &mut self,
    owner: UserId,
    name: &str,
  ) -> Result<Option<Subject>>;

  fn list_subjects(&mut self, owner: UserId) -> Result<Vec<Subject>>;

  fn update_subject(&mut self, subject: &Subject) -> Result<()>;

  /// Remove the subject row only. Callers delete its tasks first.
  fn remove_subject(&mut self, id: SubjectId) -> Result<()>;

  // ── Tasks ─────────────────────────────────────────────────────────────

  /// Persist a task with status `Pending` and return it.
  fn add_task(&mut self, input: NewTask) -> Result<Task>;

  fn get_task(&mut self, id: TaskId) -> Result<Option<Task>>;

  fn list_tasks(&mut self, subject: SubjectId) -> Result<Vec<Task>>;

  /// Tasks across every subject owned by `owner`, optionally restricted to
  /// one status. Ordered like [`list_tasks`](Self::list_tasks).
  fn list_tasks_for_owner(
    &mut self,
    owner: UserId,
    status: Option<TaskStatus>,
  ) -> Result<Vec<Task>>;

  /// Number of tasks in `subject`.
  fn count_tasks(&mut self, subject: SubjectId) -> Result<usize>;

  /// Overwrite every mutable column, status included.
  fn update_task(&mut self, task: &Task) -> Result<()>;

  fn remove_task(&mut self, id: TaskId) -> Result<()>;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a TaskMaster storage backend.
///
/// Returns `Send` futures so the store can be driven from a multi-threaded
/// tokio runtime.
pub trait TaskStore: Send + Sync {
  /// Run `f` inside a single storage transaction.
  ///
  /// `Ok` commits. `Err` rolls back and is returned unchanged. A failure of
  /// the backend itself (connection closed, commit failed) is returned as
  /// [`Error::Store`](crate::Error::Store) or
  /// [`Error::Constraint`](crate::Error::Constraint).
  fn transaction<T, F>(&self, f: F) -> impl Future<Output = Result<T>> + Send
  where
    T: Send + 'static,
    F: FnOnce(&mut dyn Transaction) -> Result<T> + Send + 'static;
}
