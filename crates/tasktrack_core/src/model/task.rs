//! Task domain model.
//!
//! # Responsibility
//! - Define the validated task record and its partial-update shape.
//! - Provide status lifecycle helpers and the overdue query.
//!
//! # Invariants
//! - `title` is non-empty after trim.
//! - `priority` is always one of 1, 2, 3 (enforced by [`Priority`]).
//! - Status transitions are free: any status may replace any other.

use crate::model::timestamp::{format_timestamp, now, Timestamp};
use crate::model::validation::{require_non_empty, ValidationError};
use crate::model::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Task urgency bucket, constrained to `1..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Priority(u8);

impl Priority {
    /// Priority preselected by task entry forms.
    pub const DEFAULT: Priority = Priority(2);

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        match value {
            1..=3 => Ok(Self(value as u8)),
            other => Err(ValidationError::InvalidPriority(other)),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for Priority {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for i64 {
    fn from(value: Priority) -> Self {
        i64::from(value.0)
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created but not started.
    #[default]
    Pending,
    InProgress,
    Completed,
    /// Dropped without completion.
    Cancelled,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];

    /// Stable storage and wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == trimmed)
            .ok_or_else(|| ValidationError::InvalidTaskStatus(trimmed.to_string()))
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracked unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Storage id; `None` until inserted.
    pub id: Option<RecordId>,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub due_date: Option<Timestamp>,
    /// Optional link to `projects.id`.
    pub project_id: Option<RecordId>,
    /// Optional link to `users.id`.
    pub assignee_id: Option<RecordId>,
}

impl Task {
    /// Creates a pending task from raw field input.
    ///
    /// # Errors
    /// - `EmptyField` when `title` is blank.
    /// - `InvalidPriority` when `priority` is outside `1..=3`.
    pub fn new(
        title: &str,
        description: &str,
        priority: i64,
        due_date: Option<Timestamp>,
        project_id: Option<RecordId>,
        assignee_id: Option<RecordId>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: None,
            title: require_non_empty("title", title)?,
            description: description.trim().to_string(),
            priority: Priority::new(priority)?,
            status: TaskStatus::Pending,
            due_date,
            project_id,
            assignee_id,
        })
    }

    /// Rebuilds a task from stored values without validation.
    ///
    /// Only for rows read back from storage, which were validated on the way
    /// in. Values written through the unchecked update path are carried over
    /// as-is.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: RecordId,
        title: String,
        description: String,
        priority: Priority,
        status: TaskStatus,
        due_date: Option<Timestamp>,
        project_id: Option<RecordId>,
        assignee_id: Option<RecordId>,
    ) -> Self {
        Self {
            id: Some(id),
            title,
            description,
            priority,
            status,
            due_date,
            project_id,
            assignee_id,
        }
    }

    /// Re-checks invariants after direct field mutation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("title", &self.title)?;
        Ok(())
    }

    /// Parses and applies a new status. Any status may follow any other.
    pub fn update_status(&mut self, status: &str) -> Result<(), ValidationError> {
        self.status = status.parse()?;
        Ok(())
    }

    /// Returns whether the task is past due as of local now.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(now())
    }

    /// Overdue iff a due date is set, the task is not completed, and the due
    /// date is strictly before `now`.
    pub fn is_overdue_at(&self, now: Timestamp) -> bool {
        match self.due_date {
            Some(due) => self.status != TaskStatus::Completed && due < now,
            None => false,
        }
    }

    /// Field map with ISO-8601 dates and explicit nulls.
    pub fn to_record(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "description": self.description,
            "priority": self.priority.value(),
            "status": self.status.as_str(),
            "due_date": self.due_date.as_ref().map(format_timestamp),
            "project_id": self.project_id,
            "assignee_id": self.assignee_id,
        })
    }
}

/// Column-wise partial update for a stored task.
///
/// `None` leaves a column untouched. Nullable columns use a nested option so
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<Option<Timestamp>>,
    pub project_id: Option<Option<RecordId>>,
    pub assignee_id: Option<Option<RecordId>>,
}

impl TaskPatch {
    /// Patch that only changes status.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
            && self.project_id.is_none()
            && self.assignee_id.is_none()
    }

    /// Applies construction rules to the fields present in this patch and
    /// returns the patch with trimmed text.
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            title: self
                .title
                .as_deref()
                .map(|title| require_non_empty("title", title))
                .transpose()?,
            description: self
                .description
                .as_deref()
                .map(|description| description.trim().to_string()),
            ..self.clone()
        })
    }
}
