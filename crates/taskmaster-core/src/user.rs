//! User: a registered student and the root of the ownership chain.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// System-wide cap on registered users.
pub const MAX_USERS: usize = 5;

/// A registered student. Owns zero or more subjects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub user_id:    UserId,
  pub name:       String,
  /// Always stored trimmed and lowercase.
  pub email:      String,
  /// Set by the store at creation; never changes.
  pub created_on: NaiveDate,
}

/// Input to [`crate::store::Transaction::add_user`].
/// Fields must already be validated and normalised.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name:       String,
  pub email:      String,
  pub created_on: NaiveDate,
}

/// Partial update of a user's profile. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
  pub name:  Option<String>,
  pub email: Option<String>,
}

impl UserUpdate {
  pub fn name(name: impl Into<String>) -> Self {
    Self { name: Some(name.into()), ..Self::default() }
  }

  pub fn email(email: impl Into<String>) -> Self {
    Self { email: Some(email.into()), ..Self::default() }
  }
}
