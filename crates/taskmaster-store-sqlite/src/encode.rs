//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Calendar dates are stored as `YYYY-MM-DD`. Priority and status are stored
//! as lowercase words. Ids are SQLite integer row ids.

use chrono::NaiveDate;
use taskmaster_core::{
  SubjectId, TaskId, UserId,
  subject::Subject,
  task::{Priority, Task, TaskStatus},
  user::User,
};

use crate::{Error, Result};

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  Ok(NaiveDate::parse_from_str(s, DATE_FORMAT)?)
}

// ─── Priority ────────────────────────────────────────────────────────────────

pub fn encode_priority(p: Priority) -> &'static str { p.into() }

pub fn decode_priority(s: &str) -> Result<Priority> {
  match s {
    "low" => Ok(Priority::Low),
    "medium" => Ok(Priority::Medium),
    "high" => Ok(Priority::High),
    other => Err(Error::Decode { column: "priority", value: other.to_owned() }),
  }
}

// ─── TaskStatus ──────────────────────────────────────────────────────────────

pub fn encode_status(s: TaskStatus) -> &'static str { s.into() }

pub fn decode_status(s: &str) -> Result<TaskStatus> {
  match s {
    "pending" => Ok(TaskStatus::Pending),
    "completed" => Ok(TaskStatus::Completed),
    other => Err(Error::Decode { column: "status", value: other.to_owned() }),
  }
}

// ─── Counts ──────────────────────────────────────────────────────────────────

pub fn decode_count(n: i64) -> Result<usize> {
  usize::try_from(n).map_err(|_| Error::Count(n))
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const USER_COLUMNS: &str = "user_id, name, email, created_on";

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub user_id:    i64,
  pub name:       String,
  pub email:      String,
  pub created_on: String,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:    row.get(0)?,
      name:       row.get(1)?,
      email:      row.get(2)?,
      created_on: row.get(3)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:    UserId::new(self.user_id),
      name:       self.name,
      email:      self.email,
      created_on: decode_date(&self.created_on)?,
    })
  }
}

pub const SUBJECT_COLUMNS: &str = "subject_id, name, color, owner_id";

/// Raw values read directly from a `subjects` row. Every column maps to a
/// domain type without conversion, so this decodes infallibly.
pub struct RawSubject {
  pub subject_id: i64,
  pub name:       String,
  pub color:      String,
  pub owner_id:   i64,
}

impl RawSubject {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      subject_id: row.get(0)?,
      name:       row.get(1)?,
      color:      row.get(2)?,
      owner_id:   row.get(3)?,
    })
  }

  pub fn into_subject(self) -> Subject {
    Subject {
      subject_id: SubjectId::new(self.subject_id),
      name:       self.name,
      color:      self.color,
      owner_id:   UserId::new(self.owner_id),
    }
  }
}

pub const TASK_COLUMNS: &str =
  "task_id, title, description, priority, due_date, status, subject_id";

/// Raw values read directly from a `tasks` row.
pub struct RawTask {
  pub task_id:     i64,
  pub title:       String,
  pub description: Option<String>,
  pub priority:    String,
  pub due_date:    String,
  pub status:      String,
  pub subject_id:  i64,
}

impl RawTask {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      task_id:     row.get(0)?,
      title:       row.get(1)?,
      description: row.get(2)?,
      priority:    row.get(3)?,
      due_date:    row.get(4)?,
      status:      row.get(5)?,
      subject_id:  row.get(6)?,
    })
  }

  pub fn into_task(self) -> Result<Task> {
    Ok(Task {
      task_id:     TaskId::new(self.task_id),
      title:       self.title,
      description: self.description,
      priority:    decode_priority(&self.priority)?,
      due_date:    decode_date(&self.due_date)?,
      status:      decode_status(&self.status)?,
      subject_id:  SubjectId::new(self.subject_id),
    })
  }
}
