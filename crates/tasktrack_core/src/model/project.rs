//! Project domain model.
//!
//! # Invariants
//! - `name` is non-empty after trim.
//! - Progress is a coarse derived value, never stored.

use crate::model::timestamp::{format_timestamp, now, Timestamp};
use crate::model::validation::{require_non_empty, ValidationError};
use crate::model::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Project lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    OnHold,
    Cancelled,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Active,
        ProjectStatus::Completed,
        ProjectStatus::OnHold,
        ProjectStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == trimmed)
            .ok_or_else(|| ValidationError::InvalidProjectStatus(trimmed.to_string()))
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named group of tasks with an optional planned window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: Option<RecordId>,
    pub name: String,
    pub description: String,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub status: ProjectStatus,
}

impl Project {
    /// Creates an active project.
    ///
    /// # Errors
    /// - `EmptyField` when `name` is blank.
    pub fn new(
        name: &str,
        description: &str,
        start_date: Option<Timestamp>,
        end_date: Option<Timestamp>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: None,
            name: require_non_empty("name", name)?,
            description: description.trim().to_string(),
            start_date,
            end_date,
            status: ProjectStatus::Active,
        })
    }

    /// Rebuilds a project from stored values without validation.
    pub fn restore(
        id: RecordId,
        name: String,
        description: String,
        start_date: Option<Timestamp>,
        end_date: Option<Timestamp>,
        status: ProjectStatus,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            description,
            start_date,
            end_date,
            status,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        Ok(())
    }

    /// Parses and applies a new status. Transitions are unrestricted.
    pub fn update_status(&mut self, status: &str) -> Result<(), ValidationError> {
        self.status = status.parse()?;
        Ok(())
    }

    /// Coarse completion percentage as of local now.
    pub fn progress(&self) -> u8 {
        self.progress_at(now())
    }

    /// Returns 100 for completed, 50 for on hold, 100 once `end_date` has
    /// passed, otherwise 0. Checked in that order.
    pub fn progress_at(&self, now: Timestamp) -> u8 {
        match self.status {
            ProjectStatus::Completed => 100,
            ProjectStatus::OnHold => 50,
            _ => match self.end_date {
                Some(end) if end < now => 100,
                _ => 0,
            },
        }
    }

    pub fn to_record(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "description": self.description,
            "start_date": self.start_date.as_ref().map(format_timestamp),
            "end_date": self.end_date.as_ref().map(format_timestamp),
            "status": self.status.as_str(),
        })
    }
}

/// Column-wise partial update for a stored project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Option<Timestamp>>,
    pub end_date: Option<Option<Timestamp>>,
    pub status: Option<ProjectStatus>,
}

impl ProjectPatch {
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.status.is_none()
    }

    /// Checked, trimmed copy of this patch.
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: self
                .name
                .as_deref()
                .map(|name| require_non_empty("name", name))
                .transpose()?,
            description: self
                .description
                .as_deref()
                .map(|description| description.trim().to_string()),
            ..self.clone()
        })
    }
}
