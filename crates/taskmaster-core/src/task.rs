//! Task: a dated piece of coursework belonging to a subject.
//!
//! Priority and status are closed enumerations. Free text is turned into them
//! only through their `FromStr` impls, which reject anything outside the
//! listed variants.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Error,
  id::{SubjectId, TaskId},
};

// ─── Priority ────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::Display,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
  Low,
  Medium,
  High,
}

impl FromStr for Priority {
  type Err = Error;

  /// Accepts the English names and the Spanish ones
  /// (`baja`, `media`, `alta`), ignoring case.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "low" | "baja" => Ok(Self::Low),
      "medium" | "media" => Ok(Self::Medium),
      "high" | "alta" => Ok(Self::High),
      _ => Err(Error::InvalidPriority(s.to_owned())),
    }
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// `Pending ⇄ Completed`; both transitions are explicit and guarded.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskStatus {
  #[default]
  Pending,
  Completed,
}

impl TaskStatus {
  pub fn is_completed(self) -> bool { matches!(self, Self::Completed) }
}

impl FromStr for TaskStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "pending" | "pendiente" => Ok(Self::Pending),
      "completed" | "completada" => Ok(Self::Completed),
      _ => Err(Error::InvalidStatus(s.to_owned())),
    }
  }
}

// ─── Task ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
  pub task_id:     TaskId,
  pub title:       String,
  pub description: Option<String>,
  pub priority:    Priority,
  pub due_date:    NaiveDate,
  pub status:      TaskStatus,
  pub subject_id:  SubjectId,
}

/// Input to [`crate::store::Transaction::add_task`]. New tasks always start
/// [`TaskStatus::Pending`], so there is no status field.
#[derive(Debug, Clone)]
pub struct NewTask {
  pub title:       String,
  pub description: Option<String>,
  pub priority:    Priority,
  pub due_date:    NaiveDate,
  pub subject_id:  SubjectId,
}

impl NewTask {
  /// Convenience constructor with no description.
  pub fn new(
    title: impl Into<String>,
    priority: Priority,
    due_date: NaiveDate,
    subject_id: SubjectId,
  ) -> Self {
    Self {
      title: title.into(),
      description: None,
      priority,
      due_date,
      subject_id,
    }
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }
}

/// Partial update of a task. `None` leaves a field untouched; status is never
/// changed by an edit.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
  pub title:       Option<String>,
  pub description: Option<String>,
  pub priority:    Option<Priority>,
  pub due_date:    Option<NaiveDate>,
  pub subject_id:  Option<SubjectId>,
}

impl TaskUpdate {
  pub fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.description.is_none()
      && self.priority.is_none()
      && self.due_date.is_none()
      && self.subject_id.is_none()
  }
}
