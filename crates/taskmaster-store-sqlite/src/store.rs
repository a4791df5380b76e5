//! [`SqliteStore`]: the SQLite implementation of [`TaskStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use taskmaster_core::{
  Error as CoreError, Result as CoreResult, SubjectId, TaskId, UserId,
  store::{TaskStore, Transaction},
  subject::{NewSubject, Subject},
  task::{NewTask, Task, TaskStatus},
  user::{NewUser, User},
};

use crate::{
  Error, Result,
  encode::{
    RawSubject, RawTask, RawUser, SUBJECT_COLUMNS, TASK_COLUMNS, USER_COLUMNS,
    decode_count, encode_date, encode_priority, encode_status,
  },
  schema::SCHEMA,
};

// ─── Error classification ────────────────────────────────────────────────────

/// Map a rusqlite failure onto the core taxonomy. Uniqueness violations
/// become [`CoreError::Constraint`] so the business layer can translate them.
fn classify(err: rusqlite::Error) -> CoreError {
  if let rusqlite::Error::SqliteFailure(ffi_err, msg) = &err
    && matches!(
      ffi_err.extended_code,
      rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
  {
    return CoreError::Constraint(
      msg.clone().unwrap_or_else(|| err.to_string()),
    );
  }
  CoreError::store(Error::Sqlite(err))
}

fn classify_call(err: tokio_rusqlite::Error) -> CoreError {
  match err {
    tokio_rusqlite::Error::Rusqlite(e) => classify(e),
    other => CoreError::store(Error::Database(other)),
  }
}

fn decode_err(err: Error) -> CoreError { CoreError::store(err) }

// ─── Store ───────────────────────────────────────────────────────────────────

/// A TaskMaster store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── TaskStore impl ──────────────────────────────────────────────────────────

impl TaskStore for SqliteStore {
  async fn transaction<T, F>(&self, f: F) -> CoreResult<T>
  where
    T: Send + 'static,
    F: FnOnce(&mut dyn Transaction) -> CoreResult<T> + Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let outcome = f(&mut SqliteTx::new(&tx));
        // Dropping an uncommitted transaction rolls it back.
        if outcome.is_ok() {
          tx.commit()?;
        }
        Ok(outcome)
      })
      .await
      .map_err(classify_call)?
  }
}

// ─── Transaction impl ────────────────────────────────────────────────────────

/// A borrowed view of the open SQLite transaction.
struct SqliteTx<'c> {
  conn: &'c rusqlite::Connection,
}

impl<'c> SqliteTx<'c> {
  fn new(conn: &'c rusqlite::Connection) -> Self { Self { conn } }

  fn count(&self, sql: &str, params: impl rusqlite::Params) -> CoreResult<usize> {
    let n: i64 = self
      .conn
      .query_row(sql, params, |row| row.get(0))
      .map_err(classify)?;
    decode_count(n).map_err(decode_err)
  }
}

impl Transaction for SqliteTx<'_> {
  // ── Users ─────────────────────────────────────────────────────────────────

  fn count_users(&mut self) -> CoreResult<usize> {
    self.count("SELECT COUNT(*) FROM users", [])
  }

  fn add_user(&mut self, input: NewUser) -> CoreResult<User> {
    self
      .conn
      .execute(
        "INSERT INTO users (name, email, created_on) VALUES (?1, ?2, ?3)",
        rusqlite::params![input.name, input.email, encode_date(input.created_on)],
      )
      .map_err(classify)?;

    Ok(User {
      user_id:    UserId::new(self.conn.last_insert_rowid()),
      name:       input.name,
      email:      input.email,
      created_on: input.created_on,
    })
  }

  fn get_user(&mut self, id: UserId) -> CoreResult<Option<User>> {
    let raw = self
      .conn
      .query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1"),
        rusqlite::params![id.get()],
        RawUser::from_row,
      )
      .optional()
      .map_err(classify)?;

    raw.map(RawUser::into_user).transpose().map_err(decode_err)
  }

  fn find_user_by_email(&mut self, email: &str) -> CoreResult<Option<User>> {
    let raw = self
      .conn
      .query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
        rusqlite::params![email],
        RawUser::from_row,
      )
      .optional()
      .map_err(classify)?;

    raw.map(RawUser::into_user).transpose().map_err(decode_err)
  }

  fn list_users(&mut self) -> CoreResult<Vec<User>> {
    let mut stmt = self
      .conn
      .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY user_id"))
      .map_err(classify)?;
    let raws = stmt
      .query_map([], RawUser::from_row)
      .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
      .map_err(classify)?;

    raws
      .into_iter()
      .map(RawUser::into_user)
      .collect::<Result<_>>()
      .map_err(decode_err)
  }

  fn update_user(&mut self, user: &User) -> CoreResult<()> {
    self
      .conn
      .execute(
        "UPDATE users SET name = ?1, email = ?2 WHERE user_id = ?3",
        rusqlite::params![user.name, user.email, user.user_id.get()],
      )
      .map_err(classify)?;
    Ok(())
  }

  fn remove_user(&mut self, id: UserId) -> CoreResult<()> {
    self
      .conn
      .execute("DELETE FROM users WHERE user_id = ?1", rusqlite::params![id.get()])
      .map_err(classify)?;
    Ok(())
  }

  // ── Subjects ──────────────────────────────────────────────────────────────

  fn count_subjects(&mut self, owner: UserId) -> CoreResult<usize> {
    self.count(
      "SELECT COUNT(*) FROM subjects WHERE owner_id = ?1",
      rusqlite::params![owner.get()],
    )
  }

  fn add_subject(&mut self, input: NewSubject) -> CoreResult<Subject> {
    self
      .conn
      .execute(
        "INSERT INTO subjects (name, color, owner_id) VALUES (?1, ?2, ?3)",
        rusqlite::params![input.name, input.color, input.owner_id.get()],
      )
      .map_err(classify)?;

    Ok(Subject {
      subject_id: SubjectId::new(self.conn.last_insert_rowid()),
      name:       input.name,
      color:      input.color,
      owner_id:   input.owner_id,
    })
  }

  fn get_subject(&mut self, id: SubjectId) -> CoreResult<Option<Subject>> {
    let raw = self
      .conn
      .query_row(
        &format!("SELECT {SUBJECT_COLUMNS} FROM subjects WHERE subject_id = ?1"),
        rusqlite::params![id.get()],
        RawSubject::from_row,
      )
      .optional()
      .map_err(classify)?;

    Ok(raw.map(RawSubject::into_subject))
  }

  fn find_subject_by_name(
    &mut self,
    owner: UserId,
    name: &str,
  ) -> CoreResult<Option<Subject>> {
    let raw = self
      .conn
      .query_row(
        &format!(
          "SELECT {SUBJECT_COLUMNS} FROM subjects WHERE owner_id = ?1 AND name = ?2"
        ),
        rusqlite::params![owner.get(), name],
        RawSubject::from_row,
      )
      .optional()
      .map_err(classify)?;

    Ok(raw.map(RawSubject::into_subject))
  }

  fn list_subjects(&mut self, owner: UserId) -> CoreResult<Vec<Subject>> {
    let mut stmt = self
      .conn
      .prepare(&format!(
        "SELECT {SUBJECT_COLUMNS} FROM subjects WHERE owner_id = ?1 ORDER BY subject_id"
      ))
      .map_err(classify)?;
    let raws = stmt
      .query_map(rusqlite::params![owner.get()], RawSubject::from_row)
      .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
      .map_err(classify)?;

    Ok(raws.into_iter().map(RawSubject::into_subject).collect())
  }

  fn update_subject(&mut self, subject: &Subject) -> CoreResult<()> {
    self
      .conn
      .execute(
        "UPDATE subjects SET name = ?1, color = ?2 WHERE subject_id = ?3",
        rusqlite::params![subject.name, subject.color, subject.subject_id.get()],
      )
      .map_err(classify)?;
    Ok(())
  }

  fn remove_subject(&mut self, id: SubjectId) -> CoreResult<()> {
    self
      .conn
      .execute(
        "DELETE FROM subjects WHERE subject_id = ?1",
        rusqlite::params![id.get()],
      )
      .map_err(classify)?;
    Ok(())
  }

  // ── Tasks ─────────────────────────────────────────────────────────────────

  fn add_task(&mut self, input: NewTask) -> CoreResult<Task> {
    let status = TaskStatus::Pending;
    self
      .conn
      .execute(
        "INSERT INTO tasks (title, description, priority, due_date, status, subject_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
          input.title,
          input.description,
          encode_priority(input.priority),
          encode_date(input.due_date),
          encode_status(status),
          input.subject_id.get(),
        ],
      )
      .map_err(classify)?;

    Ok(Task {
      task_id: TaskId::new(self.conn.last_insert_rowid()),
      title: input.title,
      description: input.description,
      priority: input.priority,
      due_date: input.due_date,
      status,
      subject_id: input.subject_id,
    })
  }

  fn get_task(&mut self, id: TaskId) -> CoreResult<Option<Task>> {
    let raw = self
      .conn
      .query_row(
        &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE task_id = ?1"),
        rusqlite::params![id.get()],
        RawTask::from_row,
      )
      .optional()
      .map_err(classify)?;

    raw.map(RawTask::into_task).transpose().map_err(decode_err)
  }

  fn list_tasks(&mut self, subject: SubjectId) -> CoreResult<Vec<Task>> {
    let mut stmt = self
      .conn
      .prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE subject_id = ?1 ORDER BY due_date, task_id"
      ))
      .map_err(classify)?;
    let raws = stmt
      .query_map(rusqlite::params![subject.get()], RawTask::from_row)
      .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
      .map_err(classify)?;

    raws
      .into_iter()
      .map(RawTask::into_task)
      .collect::<Result<_>>()
      .map_err(decode_err)
  }

  fn list_tasks_for_owner(
    &mut self,
    owner: UserId,
    status: Option<TaskStatus>,
  ) -> CoreResult<Vec<Task>> {
    let mut stmt = self
      .conn
      .prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks
         WHERE subject_id IN (SELECT subject_id FROM subjects WHERE owner_id = ?1)
           AND (?2 IS NULL OR status = ?2)
         ORDER BY due_date, task_id"
      ))
      .map_err(classify)?;
    let raws = stmt
      .query_map(
        rusqlite::params![owner.get(), status.map(encode_status)],
        RawTask::from_row,
      )
      .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
      .map_err(classify)?;

    raws
      .into_iter()
      .map(RawTask::into_task)
      .collect::<Result<_>>()
      .map_err(decode_err)
  }

  fn count_tasks(&mut self, subject: SubjectId) -> CoreResult<usize> {
    self.count(
      "SELECT COUNT(*) FROM tasks WHERE subject_id = ?1",
      rusqlite::params![subject.get()],
    )
  }

  fn update_task(&mut self, task: &Task) -> CoreResult<()> {
    self
      .conn
      .execute(
        "UPDATE tasks
         SET title = ?1, description = ?2, priority = ?3,
             due_date = ?4, status = ?5, subject_id = ?6
         WHERE task_id = ?7",
        rusqlite::params![
          task.title,
          task.description,
          encode_priority(task.priority),
          encode_date(task.due_date),
          encode_status(task.status),
          task.subject_id.get(),
          task.task_id.get(),
        ],
      )
      .map_err(classify)?;
    Ok(())
  }

  fn remove_task(&mut self, id: TaskId) -> CoreResult<()> {
    self
      .conn
      .execute("DELETE FROM tasks WHERE task_id = ?1", rusqlite::params![id.get()])
      .map_err(classify)?;
    Ok(())
  }
}
