//! Field validation rules.
//!
//! Every function here is pure: it either returns the normalised value or the
//! [`Error`] naming the broken rule. Lengths are counted in characters, not
//! bytes, so accented names measure the way users expect.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::{Error, Result};

pub const USER_NAME_MIN: usize = 3;
pub const USER_NAME_MAX: usize = 50;
pub const EMAIL_MAX: usize = 100;
pub const SUBJECT_NAME_MIN: usize = 3;
pub const SUBJECT_NAME_MAX: usize = 50;
pub const TASK_TITLE_MIN: usize = 3;
pub const TASK_TITLE_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 500;

/// Spanish-alphabet letters (unaccented Latin, acute vowels, `ñ`) and
/// whitespace.
static USER_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s]+$").expect("name pattern compiles")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[a-z0-9._-]+@[a-z0-9.-]+\.[a-z]{2,}$")
    .expect("email pattern compiles")
});

static HEX_COLOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("color pattern compiles")
});

/// Trim and check a user's full name: 3–50 characters, Spanish-alphabet
/// letters and spaces only.
pub fn user_name(raw: &str) -> Result<String> {
  let name = raw.trim();
  match name.chars().count() {
    0 => return Err(Error::InvalidName("name cannot be empty")),
    n if n < USER_NAME_MIN => {
      return Err(Error::InvalidName("name must be at least 3 characters"));
    }
    n if n > USER_NAME_MAX => {
      return Err(Error::InvalidName("name is too long (maximum 50 characters)"));
    }
    _ => {}
  }
  if !USER_NAME_PATTERN.is_match(name) {
    return Err(Error::InvalidName(
      "name may only contain letters and spaces, without digits or symbols",
    ));
  }
  Ok(name.to_owned())
}

/// Trim and lowercase an email address, then check its shape.
pub fn email(raw: &str) -> Result<String> {
  let email = raw.trim().to_lowercase();
  if email.is_empty() {
    return Err(Error::InvalidEmail("email cannot be empty"));
  }
  if email.chars().count() > EMAIL_MAX {
    return Err(Error::InvalidEmail("email is too long (maximum 100 characters)"));
  }
  if email.chars().any(char::is_whitespace) {
    return Err(Error::InvalidEmail("email cannot contain spaces"));
  }
  if email.matches('@').count() != 1 {
    return Err(Error::InvalidEmail("email must contain exactly one @"));
  }
  if email.starts_with('@') {
    return Err(Error::InvalidEmail("email cannot start with @"));
  }
  if email.ends_with('.') {
    return Err(Error::InvalidEmail("email cannot end with a dot"));
  }
  if !EMAIL_PATTERN.is_match(&email) {
    return Err(Error::InvalidEmail("email must look like user@domain.tld"));
  }
  Ok(email)
}

/// Trim and check a subject name: 3–50 characters.
pub fn subject_name(raw: &str) -> Result<String> {
  let name = raw.trim();
  match name.chars().count() {
    0 => Err(Error::InvalidSubjectName("subject name cannot be empty")),
    n if n < SUBJECT_NAME_MIN => Err(Error::InvalidSubjectName(
      "subject name must be at least 3 characters",
    )),
    n if n > SUBJECT_NAME_MAX => Err(Error::InvalidSubjectName(
      "subject name is too long (maximum 50 characters)",
    )),
    _ => Ok(name.to_owned()),
  }
}

/// `#` followed by exactly six hex digits, either case.
pub fn hex_color(raw: &str) -> Result<()> {
  if HEX_COLOR_PATTERN.is_match(raw) {
    Ok(())
  } else {
    Err(Error::InvalidColor(raw.to_owned()))
  }
}

/// Trim and check a task title: 3–100 characters.
pub fn task_title(raw: &str) -> Result<String> {
  let title = raw.trim();
  match title.chars().count() {
    0 => Err(Error::InvalidTitle("title cannot be empty")),
    n if n < TASK_TITLE_MIN => {
      Err(Error::InvalidTitle("title must be at least 3 characters"))
    }
    n if n > TASK_TITLE_MAX => {
      Err(Error::InvalidTitle("title is too long (maximum 100 characters)"))
    }
    _ => Ok(title.to_owned()),
  }
}

pub fn description(raw: &str) -> Result<()> {
  let len = raw.chars().count();
  if len > DESCRIPTION_MAX {
    return Err(Error::InvalidDescription { len, max: DESCRIPTION_MAX });
  }
  Ok(())
}

/// A due date may be today or later, never earlier.
pub fn due_date(date: NaiveDate, today: NaiveDate) -> Result<()> {
  if date < today {
    return Err(Error::InvalidDate(date));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  // ─── User name ─────────────────────────────────────────────────────────────

  #[test]
  fn user_name_is_trimmed() {
    assert_eq!(user_name("  Juan Pérez  ").unwrap(), "Juan Pérez");
  }

  #[test]
  fn user_name_accepts_accents_and_enye() {
    assert!(user_name("Ñandú Álvarez Muñoz").is_ok());
  }

  #[test]
  fn user_name_rejects_letters_outside_the_spanish_alphabet() {
    for name in ["Müller Ana", "Ωmega Zeta", "李雷韩梅梅", "Zoë Martín"] {
      assert!(
        matches!(user_name(name), Err(Error::InvalidName(_))),
        "{name:?} should be rejected"
      );
    }
    assert!(user_name("José Ñúñez").is_ok());
  }

  #[test]
  fn user_name_length_bounds() {
    assert!(matches!(user_name("   "), Err(Error::InvalidName(_))));
    assert!(user_name("Al").is_err());
    assert!(user_name("Ana").is_ok());
    assert!(user_name(&"a".repeat(50)).is_ok());
    assert!(user_name(&"a".repeat(51)).is_err());
  }

  #[test]
  fn user_name_rejects_digits_and_symbols() {
    assert!(user_name("Juan 2").is_err());
    assert!(user_name("Juan_Lopez").is_err());
    let err = user_name("R2D2").unwrap_err();
    assert!(err.to_string().contains("name"));
  }

  // ─── Email ─────────────────────────────────────────────────────────────────

  #[test]
  fn email_is_trimmed_and_lowercased() {
    assert_eq!(email("  Juan.Lopez@Mail.COM ").unwrap(), "juan.lopez@mail.com");
  }

  #[test]
  fn email_rejects_malformed_addresses() {
    for bad in [
      "",
      "juan lopez@mail.com",
      "juan@@mail.com",
      "juan@mail@com.co",
      "@mail.com",
      "juan@mail.com.",
      "juanmail.com",
      "juan@mail",
      "juan@mail.c",
      "juan+tag@mail.com",
    ] {
      let err = email(bad).unwrap_err();
      assert!(matches!(err, Error::InvalidEmail(_)), "{bad:?} should be rejected");
      assert!(err.to_string().contains("email"));
    }
  }

  #[test]
  fn email_length_limit() {
    let local = "a".repeat(91);
    assert!(email(&format!("{local}@mail.com")).is_ok());
    let local = "a".repeat(92);
    assert!(email(&format!("{local}@mail.com")).is_err());
  }

  // ─── Subject ───────────────────────────────────────────────────────────────

  #[test]
  fn subject_name_bounds() {
    assert_eq!(subject_name(" Cálculo I ").unwrap(), "Cálculo I");
    assert!(subject_name("").is_err());
    assert!(subject_name("Ma").is_err());
    assert!(subject_name(&"x".repeat(51)).is_err());
    // digits and symbols are fine for subjects
    assert!(subject_name("Física 2 (lab)").is_ok());
  }

  #[test]
  fn hex_color_shape() {
    assert!(hex_color("#FF5733").is_ok());
    assert!(hex_color("#3b82f6").is_ok());
    for bad in ["FF5733", "#FF573", "#FF57333", "#GG5733", "", "#ff5733 "] {
      assert!(matches!(hex_color(bad), Err(Error::InvalidColor(_))), "{bad:?}");
    }
  }

  // ─── Task ──────────────────────────────────────────────────────────────────

  #[test]
  fn task_title_bounds() {
    assert_eq!(task_title("  Parcial 1 ").unwrap(), "Parcial 1");
    assert!(task_title("  ").is_err());
    assert!(task_title("ab").is_err());
    assert!(task_title(&"t".repeat(100)).is_ok());
    assert!(task_title(&"t".repeat(101)).is_err());
  }

  #[test]
  fn description_limit_counts_characters() {
    assert!(description(&"é".repeat(500)).is_ok());
    let err = description(&"é".repeat(501)).unwrap_err();
    assert!(matches!(err, Error::InvalidDescription { len: 501, max: 500 }));
  }

  #[test]
  fn due_date_today_is_allowed() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
    assert!(due_date(today, today).is_ok());
    assert!(due_date(today.succ_opt().unwrap(), today).is_ok());
    assert!(matches!(
      due_date(today.pred_opt().unwrap(), today),
      Err(Error::InvalidDate(_))
    ));
  }
}
