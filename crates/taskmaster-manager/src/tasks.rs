//! Task operations, all scoped to the active user through the
//! task → subject → user ownership chain.

use taskmaster_core::{
  Error, Result, SubjectId, TaskId, UserId,
  error::Resource,
  store::{TaskStore, Transaction},
  task::{NewTask, Task, TaskStatus, TaskUpdate},
  validate,
};
use tracing::{debug, info};

use crate::{TaskManager, manager::owned_subject};

/// Load a task and check its subject belongs to `owner`.
fn owned_task(
  tx: &mut dyn Transaction,
  id: TaskId,
  owner: UserId,
) -> Result<Task> {
  let task = tx.get_task(id)?.ok_or(Error::TaskNotFound(id))?;
  let subject = tx
    .get_subject(task.subject_id)?
    .ok_or(Error::SubjectNotFound(task.subject_id))?;
  if subject.owner_id != owner {
    return Err(Error::NotOwned(Resource::Task(id)));
  }
  Ok(task)
}

impl<S: TaskStore> TaskManager<S> {
  /// Create a `Pending` task under one of the active user's subjects.
  pub async fn create_task(&self, input: NewTask) -> Result<Task> {
    let owner = self.require_active()?;

    let mut input = input;
    input.title = validate::task_title(&input.title)?;
    if let Some(description) = &input.description {
      validate::description(description)?;
    }
    validate::due_date(input.due_date, Self::today())?;

    let task = self
      .store
      .transaction(move |tx| {
        owned_subject(tx, input.subject_id, owner)?;
        tx.add_task(input)
      })
      .await?;

    info!(task_id = %task.task_id, subject_id = %task.subject_id, "created task");
    Ok(task)
  }

  /// `Pending → Completed`. Rejected if the task is already completed.
  pub async fn mark_task(&self, id: TaskId) -> Result<Task> {
    self.set_status(id, TaskStatus::Completed).await
  }

  /// `Completed → Pending`. Rejected if the task is already pending.
  pub async fn unmark_task(&self, id: TaskId) -> Result<Task> {
    self.set_status(id, TaskStatus::Pending).await
  }

  async fn set_status(&self, id: TaskId, target: TaskStatus) -> Result<Task> {
    let owner = self.require_active()?;

    let task = self
      .store
      .transaction(move |tx| {
        let mut task = owned_task(tx, id, owner)?;
        if task.status == target {
          return Err(match target {
            TaskStatus::Completed => Error::AlreadyCompleted(id),
            TaskStatus::Pending => Error::AlreadyPending(id),
          });
        }
        task.status = target;
        tx.update_task(&task)?;
        Ok(task)
      })
      .await?;

    info!(task_id = %id, status = %target, "changed task status");
    Ok(task)
  }

  /// Apply the provided fields to one of the active user's tasks. Fields left
  /// as `None`, and the status, are not touched. Moving the task is only
  /// allowed to another subject of the same user.
  pub async fn edit_task(&self, id: TaskId, update: TaskUpdate) -> Result<Task> {
    let owner = self.require_active()?;

    let title = update.title.as_deref().map(validate::task_title).transpose()?;
    if let Some(description) = &update.description {
      validate::description(description)?;
    }
    if let Some(due_date) = update.due_date {
      validate::due_date(due_date, Self::today())?;
    }

    let task = self
      .store
      .transaction(move |tx| {
        let mut task = owned_task(tx, id, owner)?;
        if let Some(subject_id) = update.subject_id {
          owned_subject(tx, subject_id, owner)?;
          task.subject_id = subject_id;
        }
        if let Some(title) = title {
          task.title = title;
        }
        if let Some(description) = update.description {
          task.description = Some(description);
        }
        if let Some(priority) = update.priority {
          task.priority = priority;
        }
        if let Some(due_date) = update.due_date {
          task.due_date = due_date;
        }
        tx.update_task(&task)?;
        Ok(task)
      })
      .await?;

    info!(task_id = %id, "edited task");
    Ok(task)
  }

  /// Delete one of the active user's tasks.
  pub async fn delete_task(&self, id: TaskId) -> Result<()> {
    let owner = self.require_active()?;

    self
      .store
      .transaction(move |tx| {
        owned_task(tx, id, owner)?;
        tx.remove_task(id)
      })
      .await?;

    info!(task_id = %id, "deleted task");
    Ok(())
  }

  /// Unrestricted lookup by id; `None` if absent.
  pub async fn select_task(&self, id: TaskId) -> Result<Option<Task>> {
    let task = self.store.transaction(move |tx| tx.get_task(id)).await?;
    debug!(task_id = %id, found = task.is_some(), "looked up task");
    Ok(task)
  }

  /// Tasks of one of the active user's subjects, earliest due first.
  pub async fn list_tasks(&self, subject: SubjectId) -> Result<Vec<Task>> {
    let owner = self.require_active()?;
    self
      .store
      .transaction(move |tx| {
        owned_subject(tx, subject, owner)?;
        tx.list_tasks(subject)
      })
      .await
  }

  /// Every task of the active user across all subjects, earliest due first.
  /// `status` keeps only tasks in that state.
  pub async fn list_all_tasks(&self, status: Option<TaskStatus>) -> Result<Vec<Task>> {
    let owner = self.require_active()?;
    let tasks = self
      .store
      .transaction(move |tx| tx.list_tasks_for_owner(owner, status))
      .await?;
    debug!(owner_id = %owner, ?status, count = tasks.len(), "listed tasks");
    Ok(tasks)
  }
}
