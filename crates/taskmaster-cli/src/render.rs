//! Plain-text and JSON rendering of entities on stdout.

use serde::Serialize;
use taskmaster_core::{
  subject::{Subject, SubjectSummary},
  task::Task,
  user::User,
};

/// One-line human rendering.
pub trait Render {
  fn render(&self) -> String;
}

impl Render for User {
  fn render(&self) -> String {
    format!(
      "#{:<3} {:<30} <{}>  since {}",
      self.user_id, self.name, self.email, self.created_on
    )
  }
}

impl Render for Subject {
  fn render(&self) -> String {
    format!("#{:<3} {:<30} {}  owner #{}", self.subject_id, self.name, self.color, self.owner_id)
  }
}

impl Render for SubjectSummary {
  fn render(&self) -> String {
    let noun = if self.task_count == 1 { "task" } else { "tasks" };
    format!("{}  {} {noun}", self.subject.render(), self.task_count)
  }
}

impl Render for Task {
  fn render(&self) -> String {
    let mark = if self.status.is_completed() { 'x' } else { ' ' };
    let mut line = format!(
      "#{:<3} [{mark}] {:<40} due {}  {:<6}  subject #{}",
      self.task_id, self.title, self.due_date, self.priority, self.subject_id
    );
    if let Some(description) = &self.description {
      line.push_str("\n      ");
      line.push_str(description);
    }
    line
  }
}

#[derive(Debug, Clone, Copy)]
pub struct Printer {
  pub json: bool,
}

impl Printer {
  pub fn one<T: Serialize + Render>(&self, item: &T) -> anyhow::Result<()> {
    if self.json {
      println!("{}", serde_json::to_string_pretty(item)?);
    } else {
      println!("{}", item.render());
    }
    Ok(())
  }

  pub fn many<T: Serialize + Render>(&self, items: &[T]) -> anyhow::Result<()> {
    if self.json {
      println!("{}", serde_json::to_string_pretty(items)?);
    } else if items.is_empty() {
      println!("(none)");
    } else {
      for item in items {
        println!("{}", item.render());
      }
    }
    Ok(())
  }

  /// Print a lookup result; `what` names the entity when it is absent.
  pub fn maybe<T: Serialize + Render>(
    &self,
    item: Option<&T>,
    what: &str,
  ) -> anyhow::Result<()> {
    match item {
      Some(item) => self.one(item),
      None if self.json => {
        println!("null");
        Ok(())
      }
      None => {
        println!("no {what} found");
        Ok(())
      }
    }
  }

  /// Confirmation for operations that return nothing.
  pub fn done(&self, action: &str, entity: &str, id: i64) -> anyhow::Result<()> {
    if self.json {
      let body = serde_json::json!({ "action": action, "entity": entity, "id": id });
      println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
      println!("{action} {entity} #{id}");
    }
    Ok(())
  }
}
