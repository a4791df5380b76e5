//! Subject operations, all scoped to the active user.

use taskmaster_core::{
  Error, Result, SubjectId,
  store::TaskStore,
  subject::{NewSubject, Subject, SubjectSummary, SubjectUpdate},
  validate,
};
use tracing::{debug, info, warn};

use crate::{TaskManager, manager::owned_subject};

impl<S: TaskStore> TaskManager<S> {
  /// Create a subject owned by the active user. Names are unique per owner.
  pub async fn create_subject(&self, name: &str, color: &str) -> Result<Subject> {
    let owner = self.require_active()?;
    let name = validate::subject_name(name)?;
    validate::hex_color(color)?;

    let input = NewSubject { name: name.clone(), color: color.to_owned(), owner_id: owner };
    let result = self
      .store
      .transaction(move |tx| {
        if tx.find_subject_by_name(owner, &input.name)?.is_some() {
          return Err(Error::DuplicateSubjectName(input.name));
        }
        tx.add_subject(input)
      })
      .await;

    match result {
      Ok(subject) => {
        info!(subject_id = %subject.subject_id, owner_id = %owner, "created subject");
        Ok(subject)
      }
      Err(Error::Constraint(detail)) => {
        warn!(%name, %detail, "subject name uniqueness violated at commit");
        Err(Error::DuplicateSubjectName(name))
      }
      Err(e) => Err(e),
    }
  }

  /// Rename and/or recolor one of the active user's subjects.
  pub async fn edit_subject(
    &self,
    id: SubjectId,
    update: SubjectUpdate,
  ) -> Result<Subject> {
    let owner = self.require_active()?;
    let name = update.name.as_deref().map(validate::subject_name).transpose()?;
    if let Some(color) = &update.color {
      validate::hex_color(color)?;
    }

    let requested_name = name.clone();
    let result = self
      .store
      .transaction(move |tx| {
        let mut subject = owned_subject(tx, id, owner)?;
        if let Some(name) = name {
          if let Some(other) = tx.find_subject_by_name(owner, &name)?
            && other.subject_id != id
          {
            return Err(Error::DuplicateSubjectName(name));
          }
          subject.name = name;
        }
        if let Some(color) = update.color {
          subject.color = color;
        }
        tx.update_subject(&subject)?;
        Ok(subject)
      })
      .await;

    let subject = match (result, requested_name) {
      (Err(Error::Constraint(_)), Some(name)) => {
        return Err(Error::DuplicateSubjectName(name));
      }
      (result, _) => result?,
    };

    info!(subject_id = %id, "edited subject");
    Ok(subject)
  }

  /// Delete one of the active user's subjects together with all its tasks,
  /// in one transaction.
  pub async fn delete_subject(&self, id: SubjectId) -> Result<()> {
    let owner = self.require_active()?;

    let removed_tasks = self
      .store
      .transaction(move |tx| {
        owned_subject(tx, id, owner)?;
        let tasks = tx.list_tasks(id)?;
        for task in &tasks {
          tx.remove_task(task.task_id)?;
        }
        tx.remove_subject(id)?;
        Ok(tasks.len())
      })
      .await?;

    info!(subject_id = %id, removed_tasks, "deleted subject");
    Ok(())
  }

  /// Unrestricted lookup by id; `None` if absent.
  pub async fn select_subject(&self, id: SubjectId) -> Result<Option<Subject>> {
    let subject = self.store.transaction(move |tx| tx.get_subject(id)).await?;
    debug!(subject_id = %id, found = subject.is_some(), "looked up subject");
    Ok(subject)
  }

  /// The active user's subjects.
  pub async fn list_subjects(&self) -> Result<Vec<Subject>> {
    let owner = self.require_active()?;
    self.store.transaction(move |tx| tx.list_subjects(owner)).await
  }

  /// The active user's subjects with their task counts.
  pub async fn list_subject_summaries(&self) -> Result<Vec<SubjectSummary>> {
    let owner = self.require_active()?;
    self
      .store
      .transaction(move |tx| {
        let subjects = tx.list_subjects(owner)?;
        subjects
          .into_iter()
          .map(|subject| {
            let task_count = tx.count_tasks(subject.subject_id)?;
            Ok(SubjectSummary { subject, task_count })
          })
          .collect::<Result<Vec<_>>>()
      })
      .await
  }
}
