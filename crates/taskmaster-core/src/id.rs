//! Integer identity newtypes for the three entities.
//!
//! Ids are generated by the store. Parsing an id from text is the boundary at
//! which a non-integer argument is rejected with
//! [`Error::InvalidArgument`](crate::Error::InvalidArgument), the
//! type-contract error kind.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

macro_rules! entity_id {
  ($(#[$meta:meta])* $name:ident, $expected:literal) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
      Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(i64);

    impl $name {
      pub const fn new(raw: i64) -> Self { Self(raw) }

      pub const fn get(self) -> i64 { self.0 }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
      }
    }

    impl From<$name> for i64 {
      fn from(id: $name) -> i64 { id.0 }
    }

    impl FromStr for $name {
      type Err = Error;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self).map_err(|_| {
          Error::InvalidArgument { value: s.to_owned(), expected: $expected }
        })
      }
    }
  };
}

entity_id!(
  /// Identity of a [`User`](crate::user::User).
  UserId,
  "an integer user id"
);

entity_id!(
  /// Identity of a [`Subject`](crate::subject::Subject).
  SubjectId,
  "an integer subject id"
);

entity_id!(
  /// Identity of a [`Task`](crate::task::Task).
  TaskId,
  "an integer task id"
);
