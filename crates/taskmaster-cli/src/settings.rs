//! Layered configuration: built-in defaults, then an optional TOML file, then
//! `TASKMASTER_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "~/.config/taskmaster/config.toml";
const DEFAULT_DATABASE_PATH: &str = "~/.local/share/taskmaster/taskmaster.db";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
  /// SQLite database file. `~` is expanded.
  pub database_path: PathBuf,
  /// Default `tracing` filter directive when `RUST_LOG` is unset.
  pub log_level:     String,
}

impl Default for CliConfig {
  fn default() -> Self {
    Self {
      database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
      log_level:     "warn".to_string(),
    }
  }
}

impl CliConfig {
  /// Read the config file at `path` (or the default location) and the
  /// environment. A missing file is not an error.
  pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
    let file = match path {
      Some(p) => expand_tilde(p),
      None => expand_tilde(Path::new(DEFAULT_CONFIG_PATH)),
    };

    let settings = config::Config::builder()
      .add_source(config::File::from(file.clone()).required(path.is_some()))
      .add_source(config::Environment::with_prefix("TASKMASTER"))
      .build()
      .with_context(|| format!("failed to read config file {}", file.display()))?;

    let mut cfg: CliConfig = settings
      .try_deserialize()
      .context("failed to deserialise CliConfig")?;
    cfg.database_path = expand_tilde(&cfg.database_path);
    Ok(cfg)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn absolute_paths_are_left_alone() {
    let p = Path::new("/var/lib/taskmaster.db");
    assert_eq!(expand_tilde(p), p);
  }

  #[test]
  fn tilde_is_expanded_against_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    let expanded = expand_tilde(Path::new("~/notes/tm.db"));
    assert_eq!(expanded, PathBuf::from(home).join("notes/tm.db"));
  }

  #[test]
  fn explicit_file_overrides_defaults() {
    let dir = std::env::temp_dir().join(format!("taskmaster-cfg-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("config.toml");
    std::fs::write(&file, "database_path = \"/tmp/tm.db\"\nlog_level = \"debug\"\n").unwrap();

    let cfg = CliConfig::load(Some(&file)).unwrap();
    assert_eq!(cfg.database_path, PathBuf::from("/tmp/tm.db"));
    assert_eq!(cfg.log_level, "debug");

    std::fs::remove_dir_all(&dir).ok();
  }

  #[test]
  fn explicit_missing_file_is_an_error() {
    let missing = Path::new("/nonexistent/taskmaster/config.toml");
    assert!(CliConfig::load(Some(missing)).is_err());
  }
}
