//! Subcommands and their dispatch onto [`TaskManager`].

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use taskmaster_core::{
  SubjectId, TaskId, UserId,
  subject::SubjectUpdate,
  task::{NewTask, Priority, TaskStatus, TaskUpdate},
  user::UserUpdate,
};
use taskmaster_manager::TaskManager;
use taskmaster_store_sqlite::SqliteStore;

use crate::render::Printer;

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Register, inspect and manage users.
  #[command(subcommand)]
  User(UserCommand),
  /// Manage the active user's subjects.
  #[command(subcommand)]
  Subject(SubjectCommand),
  /// Manage tasks inside the active user's subjects.
  #[command(subcommand)]
  Task(TaskCommand),
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
  /// Register a new user (at most five).
  Create { name: String, email: String },
  /// List every registered user.
  List,
  /// Show one user by id.
  Show { id: UserId },
  /// Look a user up by email.
  Find { email: String },
  /// Edit the active user's profile.
  Edit {
    id:    UserId,
    #[arg(long)]
    name:  Option<String>,
    #[arg(long)]
    email: Option<String>,
  },
  /// Delete the active user. Their subjects must be deleted first.
  Delete { id: UserId },
}

#[derive(Subcommand, Debug)]
pub enum SubjectCommand {
  /// Create a subject with a `#RRGGBB` color.
  Create { name: String, color: String },
  /// List the active user's subjects with their task counts.
  List,
  /// Show one subject by id.
  Show { id: SubjectId },
  Edit {
    id:    SubjectId,
    #[arg(long)]
    name:  Option<String>,
    #[arg(long)]
    color: Option<String>,
  },
  /// Delete a subject and every task in it.
  Delete { id: SubjectId },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
  /// Create a pending task.
  Create(CreateTask),
  /// List the tasks of one subject, or of every subject with `--all`.
  List {
    #[arg(required_unless_present = "all")]
    subject: Option<SubjectId>,
    /// List tasks across all of the active user's subjects.
    #[arg(long, conflicts_with = "subject")]
    all:     bool,
    /// pending | completed (pendiente | completada also accepted).
    #[arg(long, requires = "all")]
    status:  Option<TaskStatus>,
  },
  /// Show one task by id.
  Show { id: TaskId },
  Edit(EditTask),
  /// Mark a pending task as completed.
  Mark { id: TaskId },
  /// Return a completed task to pending.
  Unmark { id: TaskId },
  Delete { id: TaskId },
}

#[derive(Args, Debug)]
pub struct CreateTask {
  subject:     SubjectId,
  title:       String,
  /// Due date, `YYYY-MM-DD`. Must not be in the past.
  #[arg(long)]
  due:         NaiveDate,
  /// low | medium | high (baja | media | alta also accepted).
  #[arg(long, default_value = "medium")]
  priority:    Priority,
  #[arg(long)]
  description: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditTask {
  id:          TaskId,
  #[arg(long)]
  title:       Option<String>,
  #[arg(long)]
  description: Option<String>,
  #[arg(long)]
  priority:    Option<Priority>,
  #[arg(long)]
  due:         Option<NaiveDate>,
  /// Move the task to another of the active user's subjects.
  #[arg(long)]
  subject:     Option<SubjectId>,
}

pub async fn run(
  manager: &mut TaskManager<SqliteStore>,
  command: Command,
  out: Printer,
) -> anyhow::Result<()> {
  match command {
    Command::User(cmd) => run_user(manager, cmd, out).await,
    Command::Subject(cmd) => run_subject(manager, cmd, out).await,
    Command::Task(cmd) => run_task(manager, cmd, out).await,
  }
}

async fn run_user(
  manager: &mut TaskManager<SqliteStore>,
  command: UserCommand,
  out: Printer,
) -> anyhow::Result<()> {
  match command {
    UserCommand::Create { name, email } => {
      out.one(&manager.create_user(&name, &email).await?)
    }
    UserCommand::List => out.many(&manager.list_users().await?),
    UserCommand::Show { id } => {
      let user = manager.get_user(id).await?;
      out.maybe(user.as_ref(), "user")
    }
    UserCommand::Find { email } => {
      let user = manager.find_user_by_email(&email).await?;
      out.maybe(user.as_ref(), "user")
    }
    UserCommand::Edit { id, name, email } => {
      out.one(&manager.edit_user(id, UserUpdate { name, email }).await?)
    }
    UserCommand::Delete { id } => {
      manager.delete_user(id).await?;
      out.done("deleted", "user", id.get())
    }
  }
}

async fn run_subject(
  manager: &TaskManager<SqliteStore>,
  command: SubjectCommand,
  out: Printer,
) -> anyhow::Result<()> {
  match command {
    SubjectCommand::Create { name, color } => {
      out.one(&manager.create_subject(&name, &color).await?)
    }
    SubjectCommand::List => out.many(&manager.list_subject_summaries().await?),
    SubjectCommand::Show { id } => {
      let subject = manager.select_subject(id).await?;
      out.maybe(subject.as_ref(), "subject")
    }
    SubjectCommand::Edit { id, name, color } => {
      out.one(&manager.edit_subject(id, SubjectUpdate { name, color }).await?)
    }
    SubjectCommand::Delete { id } => {
      manager.delete_subject(id).await?;
      out.done("deleted", "subject", id.get())
    }
  }
}

async fn run_task(
  manager: &TaskManager<SqliteStore>,
  command: TaskCommand,
  out: Printer,
) -> anyhow::Result<()> {
  match command {
    TaskCommand::Create(args) => {
      let mut input = NewTask::new(args.title, args.priority, args.due, args.subject);
      input.description = args.description;
      out.one(&manager.create_task(input).await?)
    }
    TaskCommand::List { subject: Some(subject), .. } => {
      out.many(&manager.list_tasks(subject).await?)
    }
    TaskCommand::List { subject: None, status, .. } => {
      out.many(&manager.list_all_tasks(status).await?)
    }
    TaskCommand::Show { id } => {
      let task = manager.select_task(id).await?;
      out.maybe(task.as_ref(), "task")
    }
    TaskCommand::Edit(args) => {
      let update = TaskUpdate {
        title:       args.title,
        description: args.description,
        priority:    args.priority,
        due_date:    args.due,
        subject_id:  args.subject,
      };
      if update.is_empty() {
        anyhow::bail!("nothing to change: pass at least one of --title, --description, --priority, --due, --subject");
      }
      out.one(&manager.edit_task(args.id, update).await?)
    }
    TaskCommand::Mark { id } => out.one(&manager.mark_task(id).await?),
    TaskCommand::Unmark { id } => out.one(&manager.unmark_task(id).await?),
    TaskCommand::Delete { id } => {
      manager.delete_task(id).await?;
      out.done("deleted", "task", id.get())
    }
  }
}
