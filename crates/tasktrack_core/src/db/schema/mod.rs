//! Tracker schema bootstrap.
//!
//! # Responsibility
//! - Ensure the `projects`, `users` and `tasks` tables and task indexes exist.
//!
//! # Invariants
//! - Every statement is `IF NOT EXISTS`; running the script on an already
//!   initialized database is a no-op.
//! - `tasks.project_id` and `tasks.assignee_id` reference their parents with
//!   `ON DELETE SET NULL`.

use crate::db::DbResult;
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("0001_tracker.sql");

/// Tables owned by the tracker schema.
pub const TABLES: &[&str] = &["projects", "users", "tasks"];

/// Indexes owned by the tracker schema.
pub const INDEXES: &[&str] = &["idx_tasks_project", "idx_tasks_status", "idx_tasks_due"];

/// Creates missing tables and indexes on the provided connection.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
