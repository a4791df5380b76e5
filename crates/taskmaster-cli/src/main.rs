//! `taskmaster`: command-line front end for the TaskMaster academic task
//! manager.
//!
//! # Usage
//!
//! ```
//! taskmaster user create "Ana Torres" ana@mail.com
//! taskmaster --user 1 subject create "Cálculo I" "#3B82F6"
//! taskmaster --user 1 task create 1 "Problemas 3.2" --due 2030-05-02 --priority alta
//! taskmaster --user 1 --json task list 1
//! ```

mod commands;
mod render;
mod settings;

use std::{path::PathBuf, str::FromStr};

use anyhow::Context as _;
use clap::Parser;
use commands::Command;
use render::Printer;
use settings::CliConfig;
use taskmaster_core::UserId;
use taskmaster_manager::TaskManager;
use taskmaster_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Personal academic task manager")]
struct Cli {
  /// Path to a TOML config file (database_path, log_level).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// SQLite database file; overrides the config file.
  #[arg(long, env = "TASKMASTER_DATABASE", value_name = "FILE")]
  database: Option<PathBuf>,

  /// Select this user as the active user before running the command.
  #[arg(short, long, env = "TASKMASTER_USER", value_name = "ID")]
  user: Option<UserId>,

  /// Print entities as JSON.
  #[arg(long)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let cfg = CliConfig::load(cli.config.as_deref())?;

  // Initialise tracing on stderr so stdout stays machine-readable.
  let default_level = LevelFilter::from_str(&cfg.log_level).unwrap_or(LevelFilter::WARN);
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .init();

  let db_path = cli
    .database
    .map(|p| settings::expand_tilde(&p))
    .unwrap_or(cfg.database_path);
  if let Some(parent) = db_path.parent()
    && !parent.as_os_str().is_empty()
  {
    tokio::fs::create_dir_all(parent)
      .await
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("failed to open store at {db_path:?}"))?;
  let mut manager = TaskManager::new(store);

  if let Some(id) = cli.user
    && manager.select_user(id).await?.is_none()
  {
    anyhow::bail!("no user with id {id}");
  }

  let result = commands::run(&mut manager, cli.command, Printer { json: cli.json }).await;
  if let Err(err) = &result
    && let Some(e) = err.downcast_ref::<taskmaster_core::Error>()
  {
    tracing::debug!(code = %e.code(), kind = ?e.kind(), "command rejected");
  }
  result
}
