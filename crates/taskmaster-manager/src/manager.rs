//! [`TaskManager`] struct and its session state.

use chrono::NaiveDate;
use taskmaster_core::{
  Error, Result, SubjectId, UserId,
  error::Resource,
  store::Transaction,
  subject::Subject,
  user::User,
};

/// Validated CRUD over users, subjects and tasks, scoped to an active user.
pub struct TaskManager<S> {
  pub(crate) store:       S,
  pub(crate) active_user: Option<User>,
}

impl<S> TaskManager<S> {
  /// A manager with no active user.
  pub fn new(store: S) -> Self { Self { store, active_user: None } }

  /// The user selected by the last successful
  /// [`select_user`](Self::select_user), if any.
  pub fn active_user(&self) -> Option<&User> { self.active_user.as_ref() }

  pub fn store(&self) -> &S { &self.store }

  /// Id of the active user, or [`Error::NoActiveUser`].
  pub(crate) fn require_active(&self) -> Result<UserId> {
    self
      .active_user
      .as_ref()
      .map(|u| u.user_id)
      .ok_or(Error::NoActiveUser)
  }

  pub(crate) fn today() -> NaiveDate { chrono::Local::now().date_naive() }
}

/// Load a subject and check it belongs to `owner`.
pub(crate) fn owned_subject(
  tx: &mut dyn Transaction,
  id: SubjectId,
  owner: UserId,
) -> Result<Subject> {
  let subject = tx.get_subject(id)?.ok_or(Error::SubjectNotFound(id))?;
  if subject.owner_id != owner {
    return Err(Error::NotOwned(Resource::Subject(id)));
  }
  Ok(subject)
}
