//! Project repository contract and SQLite implementation.

use crate::model::project::{Project, ProjectPatch, ProjectStatus};
use crate::model::RecordId;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::sql::{
    optional_timestamp_value, parse_stored_timestamp, text_value, timestamp_to_db, ColumnUpdates,
};
use rusqlite::{params, Connection, Params, Row};

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    start_date,
    end_date,
    status
FROM projects";

/// Repository interface for project operations.
pub trait ProjectRepository {
    fn add_project(&self, project: &Project) -> RepoResult<RecordId>;
    fn get_project_by_id(&self, id: RecordId) -> RepoResult<Option<Project>>;
    fn get_all_projects(&self) -> RepoResult<Vec<Project>>;
    /// Unchecked column update; see [`crate::repo::task_repo::TaskRepository::update_task`].
    fn update_project(&self, id: RecordId, patch: &ProjectPatch) -> RepoResult<bool>;
    /// Deleting a project nulls `project_id` on its tasks.
    fn delete_project_counted(&self, id: RecordId) -> RepoResult<usize>;

    fn update_project_checked(&self, id: RecordId, patch: &ProjectPatch) -> RepoResult<bool> {
        let patch = patch.normalized()?;
        self.update_project(id, &patch)
    }

    fn delete_project(&self, id: RecordId) -> RepoResult<bool> {
        self.delete_project_counted(id)?;
        Ok(true)
    }
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_projects<P: Params>(&self, filter_sql: &str, params: P) -> RepoResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} {filter_sql} ORDER BY id ASC;"))?;
        let mut rows = stmt.query(params)?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn add_project(&self, project: &Project) -> RepoResult<RecordId> {
        project.validate()?;

        self.conn.execute(
            "INSERT INTO projects (
                name,
                description,
                start_date,
                end_date,
                status
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                project.name.as_str(),
                project.description.as_str(),
                timestamp_to_db(project.start_date.as_ref()),
                timestamp_to_db(project.end_date.as_ref()),
                project.status.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_project_by_id(&self, id: RecordId) -> RepoResult<Option<Project>> {
        let mut projects = self.query_projects("WHERE id = ?1", [id])?;
        Ok(projects.pop())
    }

    fn get_all_projects(&self) -> RepoResult<Vec<Project>> {
        self.query_projects("", [])
    }

    fn update_project(&self, id: RecordId, patch: &ProjectPatch) -> RepoResult<bool> {
        let mut updates = ColumnUpdates::default();
        if let Some(name) = patch.name.as_deref() {
            updates.set("name", text_value(name));
        }
        if let Some(description) = patch.description.as_deref() {
            updates.set("description", text_value(description));
        }
        if let Some(start_date) = patch.start_date {
            updates.set("start_date", optional_timestamp_value(start_date.as_ref()));
        }
        if let Some(end_date) = patch.end_date {
            updates.set("end_date", optional_timestamp_value(end_date.as_ref()));
        }
        if let Some(status) = patch.status {
            updates.set("status", text_value(status.as_str()));
        }

        if updates.is_empty() {
            return Ok(false);
        }
        updates.execute(self.conn, "projects", id)?;
        Ok(true)
    }

    fn delete_project_counted(&self, id: RecordId) -> RepoResult<usize> {
        Ok(self
            .conn
            .execute("DELETE FROM projects WHERE id = ?1;", [id])?)
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let status_text: String = row.get("status")?;
    let status = status_text.parse::<ProjectStatus>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid project status `{status_text}` in projects.status"
        ))
    })?;

    let description: Option<String> = row.get("description")?;
    let description = description.unwrap_or_default();

    Ok(Project::restore(
        row.get("id")?,
        row.get("name")?,
        description,
        parse_stored_timestamp("projects.start_date", row.get("start_date")?)?,
        parse_stored_timestamp("projects.end_date", row.get("end_date")?)?,
        status,
    ))
}
