//! User operations: registration, listing, selection, profile edits and
//! deletion.

use taskmaster_core::{
  Error, Result, UserId,
  store::TaskStore,
  user::{MAX_USERS, NewUser, User, UserUpdate},
  validate,
};
use tracing::{debug, info, warn};

use crate::TaskManager;

impl<S: TaskStore> TaskManager<S> {
  /// Register a new user. Does not touch the active user.
  ///
  /// Fails when the name or email is invalid, when [`MAX_USERS`] users
  /// already exist, or when the (lowercased) email is taken. A uniqueness
  /// violation raised by the store, e.g. from a concurrent writer, is reported
  /// as the same [`Error::DuplicateEmail`].
  pub async fn create_user(&self, name: &str, email: &str) -> Result<User> {
    let name = validate::user_name(name)?;
    let email = validate::email(email)?;

    let input = NewUser { name, email: email.clone(), created_on: Self::today() };
    let result = self
      .store
      .transaction(move |tx| {
        if tx.count_users()? >= MAX_USERS {
          return Err(Error::UserLimitReached(MAX_USERS));
        }
        if tx.find_user_by_email(&input.email)?.is_some() {
          return Err(Error::DuplicateEmail(input.email));
        }
        tx.add_user(input)
      })
      .await;

    match result {
      Ok(user) => {
        info!(user_id = %user.user_id, email = %user.email, "created user");
        Ok(user)
      }
      Err(Error::Constraint(detail)) => {
        warn!(%email, %detail, "email uniqueness violated at commit");
        Err(Error::DuplicateEmail(email))
      }
      Err(e) => Err(e),
    }
  }

  /// All registered users in insertion order.
  pub async fn list_users(&self) -> Result<Vec<User>> {
    self.store.transaction(|tx| tx.list_users()).await
  }

  /// Unrestricted lookup by id; `None` if absent. Leaves the session alone.
  pub async fn get_user(&self, id: UserId) -> Result<Option<User>> {
    let user = self.store.transaction(move |tx| tx.get_user(id)).await?;
    debug!(user_id = %id, found = user.is_some(), "looked up user");
    Ok(user)
  }

  /// Look a user up by email, normalising it first. Unrestricted.
  pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let email = validate::email(email)?;
    debug!(%email, "looking up user by email");
    self
      .store
      .transaction(move |tx| tx.find_user_by_email(&email))
      .await
  }

  /// Make `id` the active user.
  ///
  /// Fails with [`Error::NoUsersRegistered`] on an empty store and
  /// [`Error::InvalidId`] for non-positive ids. An unknown positive id is not
  /// an error: it returns `Ok(None)` and leaves the session unchanged.
  pub async fn select_user(&mut self, id: UserId) -> Result<Option<User>> {
    let user = self
      .store
      .transaction(move |tx| {
        if tx.count_users()? == 0 {
          return Err(Error::NoUsersRegistered);
        }
        if id.get() <= 0 {
          return Err(Error::InvalidId(id.get()));
        }
        tx.get_user(id)
      })
      .await?;

    match &user {
      Some(u) => {
        info!(user_id = %u.user_id, "selected active user");
        self.active_user = Some(u.clone());
      }
      None => debug!(user_id = %id, "no user with that id"),
    }
    Ok(user)
  }

  /// Change the active user's own name and/or email.
  pub async fn edit_user(
    &mut self,
    id: UserId,
    update: UserUpdate,
  ) -> Result<User> {
    let active = self.require_active()?;
    if id != active {
      return Err(Error::NotOwnProfile(id));
    }

    let name = update.name.as_deref().map(validate::user_name).transpose()?;
    let email = update.email.as_deref().map(validate::email).transpose()?;

    let requested_email = email.clone();
    let result = self
      .store
      .transaction(move |tx| {
        let mut user = tx.get_user(id)?.ok_or(Error::UserNotFound(id))?;
        if let Some(name) = name {
          user.name = name;
        }
        if let Some(email) = email {
          if let Some(other) = tx.find_user_by_email(&email)?
            && other.user_id != id
          {
            return Err(Error::DuplicateEmail(email));
          }
          user.email = email;
        }
        tx.update_user(&user)?;
        Ok(user)
      })
      .await;

    let user = match (result, requested_email) {
      (Err(Error::Constraint(detail)), Some(email)) => {
        warn!(%email, %detail, "email uniqueness violated at commit");
        return Err(Error::DuplicateEmail(email));
      }
      (result, _) => result?,
    };

    info!(user_id = %user.user_id, "edited user");
    self.active_user = Some(user.clone());
    Ok(user)
  }

  /// Delete the active user. The user must own no subjects. Clears the
  /// session on success.
  pub async fn delete_user(&mut self, id: UserId) -> Result<()> {
    let active = self.require_active()?;
    if id != active {
      return Err(Error::NotOwnProfile(id));
    }

    self
      .store
      .transaction(move |tx| {
        tx.get_user(id)?.ok_or(Error::UserNotFound(id))?;
        if tx.count_subjects(id)? > 0 {
          return Err(Error::HasSubjects(id));
        }
        tx.remove_user(id)
      })
      .await?;

    info!(user_id = %id, "deleted user");
    self.active_user = None;
    Ok(())
  }
}
