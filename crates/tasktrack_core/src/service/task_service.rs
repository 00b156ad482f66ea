//! Task use-case service.
//!
//! # Responsibility
//! - Build validated tasks from raw form/CLI input and persist them.
//! - Route every mutation through the validated update path.
//! - Derive overdue lists and table rows for presentation.
//!
//! # Invariants
//! - Service APIs never call the unchecked `update_task` repository method.
//! - Service layer remains storage-agnostic.

use crate::model::task::{Priority, Task, TaskPatch};
use crate::model::timestamp::{format_timestamp, Timestamp};
use crate::model::RecordId;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::task_repo::TaskRepository;
use log::{debug, info};

/// Raw input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    /// Unvalidated priority; must be 1, 2 or 3.
    pub priority: i64,
    pub due_date: Option<Timestamp>,
    pub project_id: Option<RecordId>,
    pub assignee_id: Option<RecordId>,
}

impl NewTask {
    /// Input with the given title and form defaults for everything else.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: i64::from(Priority::DEFAULT),
            due_date: None,
            project_id: None,
            assignee_id: None,
        }
    }
}

/// Flattened task view for tabular rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTableRow {
    pub id: Option<RecordId>,
    pub title: String,
    pub status: String,
    pub priority: u8,
    /// ISO-8601 text, empty when the task has no due date.
    pub due_date: String,
    pub project_id: Option<RecordId>,
    pub assignee_id: Option<RecordId>,
}

impl From<&Task> for TaskTableRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            status: task.status.as_str().to_string(),
            priority: task.priority.value(),
            due_date: task
                .due_date
                .as_ref()
                .map(format_timestamp)
                .unwrap_or_default(),
            project_id: task.project_id,
            assignee_id: task.assignee_id,
        }
    }
}

/// Use-case service wrapper for task operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates input through `Task::new` and inserts the task.
    ///
    /// Returns the generated task id.
    pub fn add_task(&self, input: &NewTask) -> RepoResult<RecordId> {
        let task = Task::new(
            &input.title,
            &input.description,
            input.priority,
            input.due_date,
            input.project_id,
            input.assignee_id,
        )?;
        let id = self.repo.add_task(&task)?;
        info!("event=task_add module=service status=ok task_id={id}");
        Ok(id)
    }

    pub fn get_task(&self, id: RecordId) -> RepoResult<Option<Task>> {
        self.repo.get_task_by_id(id)
    }

    pub fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.repo.get_all_tasks()
    }

    pub fn list_tasks_by_project(&self, project_id: RecordId) -> RepoResult<Vec<Task>> {
        self.repo.get_tasks_by_project(project_id)
    }

    pub fn list_tasks_by_assignee(&self, user_id: RecordId) -> RepoResult<Vec<Task>> {
        self.repo.get_tasks_by_user(user_id)
    }

    pub fn search_tasks(&self, query: &str) -> RepoResult<Vec<Task>> {
        let tasks = self.repo.search_tasks(query)?;
        debug!(
            "event=task_search module=service status=ok hits={}",
            tasks.len()
        );
        Ok(tasks)
    }

    /// Applies a validated partial update.
    ///
    /// Returns `false` when the patch is empty.
    pub fn update_task(&self, id: RecordId, patch: &TaskPatch) -> RepoResult<bool> {
        self.repo.update_task_checked(id, patch)
    }

    /// Parses `status`, applies it to the stored task and returns the result.
    ///
    /// # Errors
    /// - `NotFound` when no task has `id`.
    /// - `Validation` when `status` is not a task status.
    pub fn set_task_status(&self, id: RecordId, status: &str) -> RepoResult<Task> {
        let mut task = self
            .repo
            .get_task_by_id(id)?
            .ok_or(RepoError::NotFound { entity: "task", id })?;
        task.update_status(status)?;
        self.repo
            .update_task_checked(id, &TaskPatch::status(task.status))?;
        info!(
            "event=task_status module=service status=ok task_id={id} task_status={}",
            task.status
        );
        Ok(task)
    }

    /// Idempotent delete; returns `true` even when the task did not exist.
    pub fn delete_task(&self, id: RecordId) -> RepoResult<bool> {
        let removed = self.repo.delete_task_counted(id)?;
        info!("event=task_delete module=service status=ok task_id={id} removed={removed}");
        Ok(true)
    }

    /// Tasks that are overdue as of `now`, in ascending id order.
    pub fn list_overdue_tasks_at(&self, now: Timestamp) -> RepoResult<Vec<Task>> {
        Ok(self
            .repo
            .get_all_tasks()?
            .into_iter()
            .filter(|task| task.is_overdue_at(now))
            .collect())
    }

    /// All tasks flattened for table rendering.
    pub fn table_rows(&self) -> RepoResult<Vec<TaskTableRow>> {
        Ok(self
            .repo
            .get_all_tasks()?
            .iter()
            .map(TaskTableRow::from)
            .collect())
    }
}
