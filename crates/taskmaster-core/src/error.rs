//! Error types for `taskmaster-core`.
//!
//! Every business-rule failure surfaces as a variant of [`Error`]. Callers
//! that need to branch on the failure without matching variants can use the
//! flat [`ErrorCode`] taxonomy or the coarse [`ErrorKind`].

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

use crate::id::{SubjectId, TaskId, UserId};

/// An owned resource named in an authorization failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
  Subject(SubjectId),
  Task(TaskId),
}

impl fmt::Display for Resource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Subject(id) => write!(f, "subject {id}"),
      Self::Task(id) => write!(f, "task {id}"),
    }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  // ── Session ─────────────────────────────────────────────────────────────
  #[error("no active user: select a user first")]
  NoActiveUser,

  #[error("no users registered")]
  NoUsersRegistered,

  #[error("user limit reached (maximum {0} users)")]
  UserLimitReached(usize),

  #[error("invalid user id {0}: ids must be greater than 0")]
  InvalidId(i64),

  // ── Field validation ────────────────────────────────────────────────────
  #[error("invalid name: {0}")]
  InvalidName(&'static str),

  #[error("invalid email: {0}")]
  InvalidEmail(&'static str),

  #[error("invalid subject name: {0}")]
  InvalidSubjectName(&'static str),

  #[error("invalid color {0:?}: expected hex format #RRGGBB")]
  InvalidColor(String),

  #[error("invalid task title: {0}")]
  InvalidTitle(&'static str),

  #[error("invalid description: too long ({len} characters, maximum {max})")]
  InvalidDescription { len: usize, max: usize },

  #[error("invalid priority {0:?}: expected low, medium or high")]
  InvalidPriority(String),

  #[error("invalid status {0:?}: expected pending or completed")]
  InvalidStatus(String),

  #[error("invalid due date {0}: the due date cannot be in the past")]
  InvalidDate(NaiveDate),

  // ── Uniqueness ──────────────────────────────────────────────────────────
  #[error("email {0:?} is already registered")]
  DuplicateEmail(String),

  #[error("a subject named {0:?} already exists for this user")]
  DuplicateSubjectName(String),

  // ── Lookup and ownership ────────────────────────────────────────────────
  #[error("user {0} not found")]
  UserNotFound(UserId),

  #[error("subject {0} not found")]
  SubjectNotFound(SubjectId),

  #[error("task {0} not found")]
  TaskNotFound(TaskId),

  #[error("user {0} is not the active user: only the own profile may be changed")]
  NotOwnProfile(UserId),

  #[error("{0} belongs to another user")]
  NotOwned(Resource),

  #[error("user {0} still owns subjects: delete its subjects first")]
  HasSubjects(UserId),

  // ── Task state ──────────────────────────────────────────────────────────
  #[error("task {0} is already completed")]
  AlreadyCompleted(TaskId),

  #[error("task {0} is already pending")]
  AlreadyPending(TaskId),

  // ── Type contract ───────────────────────────────────────────────────────
  #[error("invalid argument {value:?}: expected {expected}")]
  InvalidArgument {
    value:    String,
    expected: &'static str,
  },

  // ── Storage ─────────────────────────────────────────────────────────────
  /// A uniqueness constraint rejected a write at the storage layer.
  #[error("storage constraint violated: {0}")]
  Constraint(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Flat, stable identifier for each failure, rendered in kebab-case.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorCode {
  NoActiveUser,
  NoUsers,
  UserLimit,
  InvalidId,
  InvalidName,
  InvalidEmail,
  InvalidColor,
  InvalidTitle,
  InvalidDescription,
  InvalidPriority,
  InvalidStatus,
  InvalidDate,
  DuplicateEmail,
  DuplicateSubjectName,
  NotFound,
  NotOwnProfile,
  NotOwned,
  HasSubjects,
  AlreadyInState,
  InvalidArgument,
  Constraint,
  Storage,
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// A field rule or business precondition was not met.
  Validation,
  /// An argument had the wrong shape (e.g. a non-integer id).
  TypeContract,
  /// The storage backend failed.
  Storage,
}

impl Error {
  /// Wrap a backend failure.
  pub fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(err))
  }

  pub fn code(&self) -> ErrorCode {
    match self {
      Self::NoActiveUser => ErrorCode::NoActiveUser,
      Self::NoUsersRegistered => ErrorCode::NoUsers,
      Self::UserLimitReached(_) => ErrorCode::UserLimit,
      Self::InvalidId(_) => ErrorCode::InvalidId,
      Self::InvalidName(_) | Self::InvalidSubjectName(_) => {
        ErrorCode::InvalidName
      }
      Self::InvalidEmail(_) => ErrorCode::InvalidEmail,
      Self::InvalidColor(_) => ErrorCode::InvalidColor,
      Self::InvalidTitle(_) => ErrorCode::InvalidTitle,
      Self::InvalidDescription { .. } => ErrorCode::InvalidDescription,
      Self::InvalidPriority(_) => ErrorCode::InvalidPriority,
      Self::InvalidStatus(_) => ErrorCode::InvalidStatus,
      Self::InvalidDate(_) => ErrorCode::InvalidDate,
      Self::DuplicateEmail(_) => ErrorCode::DuplicateEmail,
      Self::DuplicateSubjectName(_) => ErrorCode::DuplicateSubjectName,
      Self::UserNotFound(_)
      | Self::SubjectNotFound(_)
      | Self::TaskNotFound(_) => ErrorCode::NotFound,
      Self::NotOwnProfile(_) => ErrorCode::NotOwnProfile,
      Self::NotOwned(_) => ErrorCode::NotOwned,
      Self::HasSubjects(_) => ErrorCode::HasSubjects,
      Self::AlreadyCompleted(_) | Self::AlreadyPending(_) => {
        ErrorCode::AlreadyInState
      }
      Self::InvalidArgument { .. } => ErrorCode::InvalidArgument,
      Self::Constraint(_) => ErrorCode::Constraint,
      Self::Store(_) => ErrorCode::Storage,
    }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::InvalidArgument { .. } => ErrorKind::TypeContract,
      Self::Constraint(_) | Self::Store(_) => ErrorKind::Storage,
      _ => ErrorKind::Validation,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
