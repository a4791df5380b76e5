//! Behavioural tests for `TaskManager` over an in-memory SQLite store.

mod tasks;

use chrono::{Days, NaiveDate};
use taskmaster_core::{
  subject::Subject,
  task::{NewTask, Priority, Task},
  user::User,
};
use taskmaster_store_sqlite::SqliteStore;

use crate::TaskManager;

pub(super) async fn manager() -> TaskManager<SqliteStore> {
  let store = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  TaskManager::new(store)
}

/// A manager with one registered user already selected.
pub(super) async fn signed_in(
  name: &str,
  email: &str,
) -> (TaskManager<SqliteStore>, User) {
  let mut m = manager().await;
  let user = m.create_user(name, email).await.unwrap();
  m.select_user(user.user_id).await.unwrap();
  (m, user)
}

pub(super) fn today() -> NaiveDate { chrono::Local::now().date_naive() }

pub(super) fn in_days(n: u64) -> NaiveDate {
  today().checked_add_days(Days::new(n)).unwrap()
}

pub(super) async fn subject(
  m: &TaskManager<SqliteStore>,
  name: &str,
) -> Subject {
  m.create_subject(name, "#3B82F6").await.unwrap()
}

pub(super) async fn task(
  m: &TaskManager<SqliteStore>,
  subject: &Subject,
  title: &str,
) -> Task {
  m.create_task(NewTask::new(title, Priority::Medium, in_days(7), subject.subject_id))
    .await
    .unwrap()
}

/// Switch `m` to another user that is registered in the same store.
pub(super) async fn switch_to(
  m: &mut TaskManager<SqliteStore>,
  name: &str,
  email: &str,
) -> User {
  let user = m.create_user(name, email).await.unwrap();
  m.select_user(user.user_id).await.unwrap();
  user
}
