//! SQL schema for the TaskMaster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL UNIQUE,   -- stored lowercase
    created_on  TEXT NOT NULL           -- YYYY-MM-DD
);

CREATE TABLE IF NOT EXISTS subjects (
    subject_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    color       TEXT NOT NULL,          -- #RRGGBB
    owner_id    INTEGER NOT NULL REFERENCES users(user_id),
    UNIQUE (owner_id, name)
);

-- Tasks are removed explicitly before their subject; the FK cascade only
-- guards against rows orphaned by a direct delete.
CREATE TABLE IF NOT EXISTS tasks (
    task_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    description TEXT,
    priority    TEXT NOT NULL,          -- 'low' | 'medium' | 'high'
    due_date    TEXT NOT NULL,          -- YYYY-MM-DD
    status      TEXT NOT NULL DEFAULT 'pending',  -- 'pending' | 'completed'
    subject_id  INTEGER NOT NULL REFERENCES subjects(subject_id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS subjects_owner_idx ON subjects(owner_id);
CREATE INDEX IF NOT EXISTS tasks_subject_idx  ON tasks(subject_id);

PRAGMA user_version = 1;
";
