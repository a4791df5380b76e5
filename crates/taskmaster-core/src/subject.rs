//! Subject: an academic course ("materia") owned by a single user.

use serde::{Deserialize, Serialize};

use crate::id::{SubjectId, UserId};

/// A course that groups tasks. `(name, owner_id)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
  pub subject_id: SubjectId,
  pub name:       String,
  /// Display color in `#RRGGBB` form.
  pub color:      String,
  /// Immutable once set.
  pub owner_id:   UserId,
}

/// A subject together with how many tasks it holds, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectSummary {
  #[serde(flatten)]
  pub subject:    Subject,
  pub task_count: usize,
}

/// Input to [`crate::store::Transaction::add_subject`].
#[derive(Debug, Clone)]
pub struct NewSubject {
  pub name:     String,
  pub color:    String,
  pub owner_id: UserId,
}

/// Partial update of a subject. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct SubjectUpdate {
  pub name:  Option<String>,
  pub color: Option<String>,
}

impl SubjectUpdate {
  pub fn name(name: impl Into<String>) -> Self {
    Self { name: Some(name.into()), ..Self::default() }
  }

  pub fn color(color: impl Into<String>) -> Self {
    Self { color: Some(color.into()), ..Self::default() }
  }
}
