//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and filtered reads over the `tasks` table.
//! - Map rows back to [`Task`] values.
//!
//! # Invariants
//! - List results are ordered by ascending id.
//! - `project_id`/`assignee_id` are nulled by SQLite when the parent row is
//!   deleted; this repository never deletes tasks as a side effect.

use crate::model::task::{Priority, Task, TaskPatch, TaskStatus};
use crate::model::RecordId;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::sql::{
    contains_pattern, optional_id_value, optional_timestamp_value, parse_stored_timestamp,
    text_value, timestamp_to_db, ColumnUpdates,
};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Params, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    priority,
    status,
    due_date,
    project_id,
    assignee_id
FROM tasks";

/// Repository interface for task operations.
pub trait TaskRepository {
    /// Inserts a validated task and returns the generated id.
    fn add_task(&self, task: &Task) -> RepoResult<RecordId>;
    fn get_task_by_id(&self, id: RecordId) -> RepoResult<Option<Task>>;
    fn get_all_tasks(&self) -> RepoResult<Vec<Task>>;
    fn get_tasks_by_project(&self, project_id: RecordId) -> RepoResult<Vec<Task>>;
    fn get_tasks_by_user(&self, user_id: RecordId) -> RepoResult<Vec<Task>>;
    /// Substring match over title or description. Surrounding whitespace in
    /// `query` is ignored; a blank query matches every task.
    fn search_tasks(&self, query: &str) -> RepoResult<Vec<Task>>;
    /// Writes the patched columns without validating their values.
    ///
    /// Returns `false` for an empty patch, `true` otherwise, including when
    /// no row has the given id.
    fn update_task(&self, id: RecordId, patch: &TaskPatch) -> RepoResult<bool>;
    /// Removes the row and returns how many rows were deleted (0 or 1).
    fn delete_task_counted(&self, id: RecordId) -> RepoResult<usize>;

    /// Validates and trims the patch like construction would, then writes it.
    fn update_task_checked(&self, id: RecordId, patch: &TaskPatch) -> RepoResult<bool> {
        let patch = patch.normalized()?;
        self.update_task(id, &patch)
    }

    /// Idempotent delete: `true` whether or not the row existed.
    fn delete_task(&self, id: RecordId) -> RepoResult<bool> {
        self.delete_task_counted(id)?;
        Ok(true)
    }
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_tasks<P: Params>(&self, filter_sql: &str, params: P) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} {filter_sql} ORDER BY id ASC;"))?;
        let mut rows = stmt.query(params)?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn add_task(&self, task: &Task) -> RepoResult<RecordId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                title,
                description,
                priority,
                status,
                due_date,
                project_id,
                assignee_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                task.title.as_str(),
                task.description.as_str(),
                i64::from(task.priority),
                task.status.as_str(),
                timestamp_to_db(task.due_date.as_ref()),
                task.project_id,
                task.assignee_id,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_task_by_id(&self, id: RecordId) -> RepoResult<Option<Task>> {
        let mut tasks = self.query_tasks("WHERE id = ?1", [id])?;
        Ok(tasks.pop())
    }

    fn get_all_tasks(&self) -> RepoResult<Vec<Task>> {
        self.query_tasks("", [])
    }

    fn get_tasks_by_project(&self, project_id: RecordId) -> RepoResult<Vec<Task>> {
        self.query_tasks("WHERE project_id = ?1", [project_id])
    }

    fn get_tasks_by_user(&self, user_id: RecordId) -> RepoResult<Vec<Task>> {
        self.query_tasks("WHERE assignee_id = ?1", [user_id])
    }

    fn search_tasks(&self, query: &str) -> RepoResult<Vec<Task>> {
        let pattern = contains_pattern(query.trim());
        self.query_tasks(
            "WHERE title LIKE ?1 ESCAPE '\\' OR description LIKE ?1 ESCAPE '\\'",
            [pattern],
        )
    }

    fn update_task(&self, id: RecordId, patch: &TaskPatch) -> RepoResult<bool> {
        let mut updates = ColumnUpdates::default();
        if let Some(title) = patch.title.as_deref() {
            updates.set("title", text_value(title));
        }
        if let Some(description) = patch.description.as_deref() {
            updates.set("description", text_value(description));
        }
        if let Some(priority) = patch.priority {
            updates.set("priority", Value::Integer(i64::from(priority)));
        }
        if let Some(status) = patch.status {
            updates.set("status", text_value(status.as_str()));
        }
        if let Some(due_date) = patch.due_date {
            updates.set("due_date", optional_timestamp_value(due_date.as_ref()));
        }
        if let Some(project_id) = patch.project_id {
            updates.set("project_id", optional_id_value(project_id));
        }
        if let Some(assignee_id) = patch.assignee_id {
            updates.set("assignee_id", optional_id_value(assignee_id));
        }

        if updates.is_empty() {
            return Ok(false);
        }
        updates.execute(self.conn, "tasks", id)?;
        Ok(true)
    }

    fn delete_task_counted(&self, id: RecordId) -> RepoResult<usize> {
        Ok(self.conn.execute("DELETE FROM tasks WHERE id = ?1;", [id])?)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let priority_value: i64 = row.get("priority")?;
    let priority = Priority::new(priority_value).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid priority `{priority_value}` in tasks.priority"
        ))
    })?;

    let status_text: String = row.get("status")?;
    let status = status_text.parse::<TaskStatus>().map_err(|_| {
        RepoError::InvalidData(format!("invalid task status `{status_text}` in tasks.status"))
    })?;

    let due_date = parse_stored_timestamp("tasks.due_date", row.get("due_date")?)?;

    let description: Option<String> = row.get("description")?;
    let description = description.unwrap_or_default();

    Ok(Task::restore(
        row.get("id")?,
        row.get("title")?,
        description,
        priority,
        status,
        due_date,
        row.get("project_id")?,
        row.get("assignee_id")?,
    ))
}
